//! On-disk token persistence between CLI invocations.

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::{AuthError, AuthToken, SessionContext};

/// Stores the current token as JSON in a single file.
#[derive(Debug, Clone)]
pub struct TokenStore {
    path: PathBuf,
}

impl TokenStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the stored session. A missing file is an anonymous session.
    pub fn load(&self) -> Result<SessionContext, AuthError> {
        if !self.path.exists() {
            return Ok(SessionContext::anonymous());
        }
        let content = fs::read_to_string(&self.path)?;
        let token: AuthToken = serde_json::from_str(&content)?;
        Ok(SessionContext::from_token(token))
    }

    /// Persist a token, creating parent directories as needed.
    ///
    /// On unix the file is readable and writable by the owner only.
    pub fn save(&self, token: &AuthToken) -> Result<(), AuthError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(token)?;

        let mut options = OpenOptions::new();
        options.write(true).create(true).truncate(true);
        #[cfg(unix)]
        {
            use std::os::unix::fs::OpenOptionsExt;
            options.mode(0o600);
        }
        let mut file = options.open(&self.path)?;

        // mode only applies on create; tighten a file left by an older save
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            file.set_permissions(fs::Permissions::from_mode(0o600))?;
        }

        file.write_all(content.as_bytes())?;
        Ok(())
    }

    /// Forget the stored token. Returns whether a file was removed.
    pub fn clear(&self) -> Result<bool, AuthError> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::UnauthenticatedReason;

    #[test]
    fn test_missing_file_is_anonymous() {
        let dir = tempfile::tempdir().unwrap();
        let store = TokenStore::new(dir.path().join("token.json"));
        assert_eq!(store.load().unwrap(), SessionContext::anonymous());
    }

    #[test]
    fn test_save_load_clear() {
        let dir = tempfile::tempdir().unwrap();
        let store = TokenStore::new(dir.path().join("nested").join("token.json"));

        store.save(&AuthToken::new("abc")).unwrap();
        assert_eq!(store.load().unwrap().bearer().unwrap(), "abc");

        assert!(store.clear().unwrap());
        assert!(!store.clear().unwrap());
        assert!(!store.load().unwrap().is_authenticated());
    }

    #[cfg(unix)]
    #[test]
    fn test_token_file_is_owner_only() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("token.json");
        std::fs::write(&path, "{}").unwrap();
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o644)).unwrap();

        let store = TokenStore::new(&path);
        store.save(&AuthToken::new("abc")).unwrap();
        let mode = std::fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);

        store.clear().unwrap();
        store.save(&AuthToken::new("abc")).unwrap();
        let mode = std::fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }

    #[test]
    fn test_expired_stored_token() {
        let dir = tempfile::tempdir().unwrap();
        let store = TokenStore::new(dir.path().join("token.json"));
        store
            .save(&AuthToken {
                token: "old".to_string(),
                issued_at: 0,
                expires_at: Some(10),
            })
            .unwrap();

        assert_eq!(
            store.load().unwrap(),
            SessionContext::Unauthenticated(UnauthenticatedReason::Expired)
        );
    }

    #[test]
    fn test_corrupt_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("token.json");
        std::fs::write(&path, "not json").unwrap();
        assert!(TokenStore::new(path).load().is_err());
    }
}
