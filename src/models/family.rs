use crate::CreationalError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifies which user-manager implementation produced an entity.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Family {
    #[serde(rename = "sql")]
    Sql,
    #[serde(rename = "in_memory", alias = "memory")]
    InMemory,
}

impl Default for Family {
    fn default() -> Self {
        Self::Sql
    }
}

impl fmt::Display for Family {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Sql => write!(f, "sql"),
            Self::InMemory => write!(f, "in_memory"),
        }
    }
}

impl TryFrom<&str> for Family {
    type Error = CreationalError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.to_lowercase().as_str() {
            "sql" | "sqlite" => Ok(Self::Sql),
            "in_memory" | "memory" | "in-memory" => Ok(Self::InMemory),
            _ => Err(CreationalError::validation(format!(
                "Invalid user family: '{}'. Use 'sql' or 'in_memory'",
                value
            ))),
        }
    }
}
