//! Opaque identifiers.
//!
//! The backend hands out ids as JSON integers or strings depending on the
//! table. Each id type keeps whichever shape it arrived in so it is sent
//! back unchanged, and separate types keep a `MachineId` from being passed
//! where an `ItemId` is expected.

use serde::{Deserialize, Serialize};
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

/// Macro to generate opaque id enums.
macro_rules! define_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(untagged)]
        pub enum $name {
            Int(i64),
            Text(String),
        }

        impl $name {
            /// Parse user input: integers become `Int`, anything else `Text`.
            pub fn parse(input: &str) -> Self {
                let input = input.trim();
                input
                    .parse::<i64>()
                    .map(Self::Int)
                    .unwrap_or_else(|_| Self::Text(input.to_string()))
            }

            /// Path segment for REST routes.
            pub fn to_path_segment(&self) -> String {
                self.to_string()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                match self {
                    Self::Int(n) => write!(f, "{}", n),
                    Self::Text(s) => f.write_str(s),
                }
            }
        }

        impl FromStr for $name {
            type Err = Infallible;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Ok(Self::parse(s))
            }
        }

        impl From<i64> for $name {
            fn from(n: i64) -> Self {
                Self::Int(n)
            }
        }

        impl From<String> for $name {
            fn from(s: String) -> Self {
                Self::Text(s)
            }
        }
    };
}

define_id!(
    /// Catalog item (product) identifier.
    ItemId
);
define_id!(
    /// Supplier identifier.
    SupplierId
);
define_id!(
    /// Machine identifier on the production line.
    MachineId
);
define_id!(
    /// Employee identifier.
    EmployeeId
);
define_id!(
    /// Inventory entry identifier.
    EntryId
);
define_id!(
    /// Delivery estimate identifier.
    EstimateId
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keeps_wire_shape() {
        let id: ItemId = serde_json::from_str("7").unwrap();
        assert_eq!(id, ItemId::Int(7));
        assert_eq!(serde_json::to_string(&id).unwrap(), "7");

        let id: ItemId = serde_json::from_str("\"sku-7\"").unwrap();
        assert_eq!(id, ItemId::Text("sku-7".to_string()));
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"sku-7\"");
    }

    #[test]
    fn test_parse_user_input() {
        assert_eq!(ItemId::parse(" 12 "), ItemId::Int(12));
        assert_eq!(ItemId::parse("abc"), ItemId::Text("abc".to_string()));
        assert_eq!("3".parse::<SupplierId>().unwrap(), SupplierId::Int(3));
    }

    #[test]
    fn test_int_and_text_are_distinct() {
        assert_ne!(ItemId::Int(1), ItemId::Text("1".to_string()));
    }

    #[test]
    fn test_display() {
        assert_eq!(MachineId::Int(4).to_string(), "4");
        assert_eq!(MachineId::from("m-4".to_string()).to_path_segment(), "m-4");
    }
}
