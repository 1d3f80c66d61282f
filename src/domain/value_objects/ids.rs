//! Strongly-typed identifiers for domain entities

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

macro_rules! define_id {
    ($name:ident) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub struct $name(Uuid);

        impl $name {
            pub fn new() -> Self {
                Self(Uuid::new_v4())
            }

            pub fn from_uuid(uuid: Uuid) -> Self {
                Self(uuid)
            }

            pub fn as_uuid(&self) -> &Uuid {
                &self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<Uuid> for $name {
            fn from(uuid: Uuid) -> Self {
                Self(uuid)
            }
        }

        impl From<$name> for Uuid {
            fn from(id: $name) -> Uuid {
                id.0
            }
        }
    };
}

define_id!(EntryId);

/// A stable, globally unique key for one game data record.
///
/// Records are addressed by their local form id together with the plugin file
/// that defines them, rendered as six uppercase hex digits followed by the
/// plugin name: `01A696:Skyrim.esm`. The same addressing covers NPCs,
/// outfits, factions, races and keywords.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct FormKey {
    plugin: String,
    local_id: u32,
}

impl FormKey {
    pub fn new(local_id: u32, plugin: impl Into<String>) -> Self {
        Self {
            plugin: plugin.into(),
            local_id,
        }
    }

    /// The local form id within the owning plugin.
    pub fn local_id(&self) -> u32 {
        self.local_id
    }

    /// The plugin file that defines the record.
    pub fn plugin(&self) -> &str {
        &self.plugin
    }
}

impl fmt::Display for FormKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:06X}:{}", self.local_id, self.plugin)
    }
}

/// Error parsing a form key from its string rendering
#[derive(Debug, Clone, thiserror::Error)]
pub enum FormKeyParseError {
    #[error("Form key must be formatted as <hex id>:<plugin>, got '{0}'")]
    MissingSeparator(String),

    #[error("Form key '{0}' has an invalid hex id")]
    InvalidId(String),

    #[error("Form key '{0}' has an empty plugin name")]
    EmptyPlugin(String),
}

impl FromStr for FormKey {
    type Err = FormKeyParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (id_part, plugin) = s
            .split_once(':')
            .ok_or_else(|| FormKeyParseError::MissingSeparator(s.to_string()))?;

        let local_id = u32::from_str_radix(id_part, 16)
            .map_err(|_| FormKeyParseError::InvalidId(s.to_string()))?;

        if plugin.trim().is_empty() {
            return Err(FormKeyParseError::EmptyPlugin(s.to_string()));
        }

        Ok(Self::new(local_id, plugin))
    }
}

impl TryFrom<String> for FormKey {
    type Error = FormKeyParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<FormKey> for String {
    fn from(key: FormKey) -> String {
        key.to_string()
    }
}
