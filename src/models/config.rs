use crate::{CreationalError, Family, ProductType};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct CreationalConfig {
    pub family_check: FamilyCheck,
    pub user_family: Family,
    pub default_product: ProductType,
}

impl CreationalConfig {
    pub fn from_toml_str(content: &str) -> Result<Self, CreationalError> {
        toml::from_str(content).map_err(|e| CreationalError::config(e.to_string()))
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, CreationalError> {
        let content = std::fs::read_to_string(path.as_ref())?;
        let config = Self::from_toml_str(&content)?;

        tracing::debug!(path = %path.as_ref().display(), "loaded creational config");
        Ok(config)
    }

    pub fn to_toml_string(&self) -> Result<String, CreationalError> {
        toml::to_string(self).map_err(|e| CreationalError::config(e.to_string()))
    }

    pub fn with_family_check(mut self, family_check: FamilyCheck) -> Self {
        self.family_check = family_check;
        self
    }

    pub fn with_user_family(mut self, family: Family) -> Self {
        self.user_family = family;
        self
    }
}

/// Whether wiring a user to a department validates that both come from the same store.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FamilyCheck {
    #[serde(rename = "strict", alias = "on")]
    Strict,
    #[serde(rename = "unchecked", alias = "off")]
    Unchecked,
}

impl FamilyCheck {
    pub fn is_strict(&self) -> bool {
        matches!(self, Self::Strict)
    }
}

impl Default for FamilyCheck {
    fn default() -> Self {
        Self::Unchecked
    }
}

impl fmt::Display for FamilyCheck {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Strict => write!(f, "strict"),
            Self::Unchecked => write!(f, "unchecked"),
        }
    }
}

impl TryFrom<&str> for FamilyCheck {
    type Error = CreationalError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.to_lowercase().as_str() {
            "strict" | "on" | "true" => Ok(Self::Strict),
            "unchecked" | "off" | "false" => Ok(Self::Unchecked),
            _ => Err(CreationalError::validation(format!(
                "Invalid family check: '{}'. Use 'strict' or 'unchecked'",
                value
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = CreationalConfig::default();
        assert_eq!(config.family_check, FamilyCheck::Unchecked);
        assert_eq!(config.user_family, Family::Sql);
        assert_eq!(config.default_product, ProductType::DefaultProduct);
    }

    #[test]
    fn test_parse_toml_with_aliases() {
        let config = CreationalConfig::from_toml_str(
            r#"
family_check = "on"
user_family = "in_memory"
default_product = "special_product"
"#,
        )
        .unwrap();

        assert!(config.family_check.is_strict());
        assert_eq!(config.user_family, Family::InMemory);
        assert!(config.default_product.is_special());
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = CreationalConfig::from_toml_str("family_check = \"strict\"").unwrap();
        assert_eq!(config.user_family, Family::Sql);
        assert!(config.family_check.is_strict());
    }

    #[test]
    fn test_invalid_family_check() {
        assert!(CreationalConfig::from_toml_str("family_check = \"maybe\"").is_err());
        assert!(FamilyCheck::try_from("maybe").is_err());
        assert_eq!(FamilyCheck::try_from("OFF").unwrap(), FamilyCheck::Unchecked);
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "family_check = \"strict\"").unwrap();
        writeln!(file, "user_family = \"memory\"").unwrap();

        let config = CreationalConfig::load(file.path()).unwrap();
        assert!(config.family_check.is_strict());
        assert_eq!(config.user_family, Family::InMemory);
    }

    #[test]
    fn test_unknown_keys_rejected() {
        let result = CreationalConfig::from_toml_str("database_path = \"users.db\"");
        assert!(matches!(result, Err(CreationalError::ConfigError(_))));
    }

    #[test]
    fn test_toml_roundtrip() {
        let config = CreationalConfig::default().with_family_check(FamilyCheck::Strict);
        let text = config.to_toml_string().unwrap();
        assert!(text.contains("family_check = \"strict\""));
        assert_eq!(CreationalConfig::from_toml_str(&text).unwrap(), config);
    }
}
