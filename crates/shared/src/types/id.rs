//! Typed IDs for type-safe entity references.
//!
//! Using typed IDs prevents accidentally passing a `BankAccountId` where a
//! `CategoryId` is expected. `TenantId` is the owning account scope every
//! lookup is partitioned by.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Macro to generate typed ID wrappers.
macro_rules! typed_id {
    ($name:ident, $doc:expr) => {
        #[doc = $doc]
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub Uuid);

        impl $name {
            /// Creates a new random ID using UUID v7 (time-ordered).
            #[must_use]
            pub fn new() -> Self {
                Self(Uuid::now_v7())
            }

            /// Creates an ID from an existing UUID.
            #[must_use]
            pub const fn from_uuid(uuid: Uuid) -> Self {
                Self(uuid)
            }

            /// Returns the inner UUID.
            #[must_use]
            pub const fn into_inner(self) -> Uuid {
                self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl From<Uuid> for $name {
            fn from(uuid: Uuid) -> Self {
                Self(uuid)
            }
        }

        impl From<$name> for Uuid {
            fn from(id: $name) -> Self {
                id.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl std::str::FromStr for $name {
            type Err = uuid::Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Ok(Self(Uuid::parse_str(s)?))
            }
        }
    };
}

typed_id!(TenantId, "Unique identifier for the owning account (tenant).");
typed_id!(BankProviderId, "Unique identifier for a bank provider.");
typed_id!(BankAccountId, "Unique identifier for a bank account.");
typed_id!(BudgetId, "Unique identifier for a budget.");
typed_id!(BudgetDateId, "Unique identifier for a budget month.");
typed_id!(BudgetItemId, "Unique identifier for a budget allocation line.");
typed_id!(CategoryId, "Unique identifier for a category.");
typed_id!(TransactionId, "Unique identifier for a transaction.");

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_typed_id_from_uuid() {
        let uuid = Uuid::new_v4();
        let id = BankAccountId::from_uuid(uuid);
        assert_eq!(id.into_inner(), uuid);
        assert_eq!(Uuid::from(id), uuid);
    }

    #[test]
    fn test_typed_id_new_is_unique() {
        assert_ne!(TransactionId::new(), TransactionId::new());
        assert_eq!(TransactionId::new().into_inner().get_version_num(), 7);
    }

    #[test]
    fn test_typed_id_display_and_parse() {
        let uuid = Uuid::new_v4();
        let id = TenantId::from_uuid(uuid);
        assert_eq!(id.to_string(), uuid.to_string());
        assert_eq!(TenantId::from_str(&uuid.to_string()).unwrap(), id);
        assert!(TenantId::from_str("invalid").is_err());
    }

    #[test]
    fn test_typed_id_serializes_transparently() {
        let uuid = Uuid::new_v4();
        let json = serde_json::to_string(&CategoryId::from_uuid(uuid)).unwrap();
        assert_eq!(json, format!("\"{uuid}\""));
    }
}
