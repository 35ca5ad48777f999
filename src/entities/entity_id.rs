use crate::CreationalError;
use std::fmt;
use uuid::Uuid;

/// Identifier of a stored user or department.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EntityId(Uuid);

impl EntityId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for EntityId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<Uuid> for EntityId {
    fn from(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

impl TryFrom<&str> for EntityId {
    type Error = CreationalError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let uuid = Uuid::parse_str(value)
            .map_err(|e| CreationalError::validation(format!("Invalid entity ID: {}", e)))?;
        Ok(Self(uuid))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_entity_id() {
        let id = EntityId::new();
        let parsed = EntityId::try_from(id.to_string().as_str()).unwrap();
        assert_eq!(id, parsed);
        assert!(EntityId::try_from("not-a-uuid").is_err());
    }
}
