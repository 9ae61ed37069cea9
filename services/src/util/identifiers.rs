use crate::error::{self, Result};
use snafu::ResultExt;
use std::str::FromStr;

/// An identifier that wraps a [`uuid::Uuid`]
pub trait Identifier: Sized {
    /// Create identifier from given `id`
    fn from_uuid(id: uuid::Uuid) -> Self;

    /// Create identifier from given `id`
    fn from_uuid_str(uuid_str: &str) -> Result<Self> {
        Ok(Self::from_uuid(
            uuid::Uuid::from_str(uuid_str).context(error::InvalidUuid)?,
        ))
    }

    /// Get the internal uuid
    fn uuid(&self) -> uuid::Uuid;
}

#[macro_export]
macro_rules! identifier {
    ($id_name: ident) => {
        #[derive(Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize, Clone, Copy, Hash)]
        pub struct $id_name(uuid::Uuid);

        impl $crate::util::identifiers::Identifier for $id_name {
            fn from_uuid(id: uuid::Uuid) -> Self {
                Self(id)
            }

            fn uuid(&self) -> uuid::Uuid {
                self.0
            }
        }

        impl std::fmt::Display for $id_name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}
