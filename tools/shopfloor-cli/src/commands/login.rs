//! Session commands.

use anyhow::{bail, Context as _, Result};
use dialoguer::{Input, Password};
use shopfloor_auth::{login, AuthError, Credentials};

use super::LoginArgs;
use crate::context::Context;

/// Run the login command.
pub async fn run(args: LoginArgs, ctx: &Context) -> Result<()> {
    let username = match args.username {
        Some(username) => username,
        None => Input::<String>::new()
            .with_prompt("Username")
            .interact_text()?,
    };

    let password = match args.password_env {
        Some(var) => std::env::var(&var)
            .with_context(|| format!("Environment variable {} is not set", var))?,
        None => Password::new().with_prompt("Password").interact()?,
    };

    let credentials = Credentials::new(username.trim(), password);
    let client = ctx.http_client();

    let spinner = ctx.output.spinner("Signing in...");
    let result = login(&client, &credentials, ctx.config.session.ttl_secs).await;
    spinner.finish_and_clear();

    let session = match result {
        Ok(session) => session,
        Err(AuthError::InvalidCredentials) => bail!("Invalid username or password"),
        Err(e) => return Err(e).context("Login failed"),
    };

    let Some(token) = session.token() else {
        bail!("Login returned no session");
    };

    let store = ctx.token_store();
    store.save(token).context("Failed to store session")?;
    ctx.output
        .debug(&format!("Session stored at {}", store.path().display()));

    if ctx.output.is_json() {
        ctx.output.json(&serde_json::json!({
            "username": credentials.username,
            "expires_at": token.expires_at,
        }));
    } else {
        ctx.output
            .success(&format!("Logged in as {}", credentials.username));
    }

    Ok(())
}

/// Run the logout command.
pub async fn logout(ctx: &Context) -> Result<()> {
    let removed = ctx
        .token_store()
        .clear()
        .context("Failed to remove stored session")?;

    if ctx.output.is_json() {
        ctx.output.json(&serde_json::json!({ "logged_out": removed }));
    } else if removed {
        ctx.output.success("Logged out");
    } else {
        ctx.output.info("No stored session");
    }

    Ok(())
}
