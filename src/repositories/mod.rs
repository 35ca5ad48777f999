pub mod database;
pub mod memory_users;
pub mod sql_users;

pub use database::UserDatabase;
pub use memory_users::InMemoryUserManager;
pub use sql_users::SqlUserManager;

use crate::CreationalError;

/// Trims `name` and rejects it when nothing is left.
fn validate_name<'a>(kind: &str, name: &'a str) -> Result<&'a str, CreationalError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(CreationalError::validation(format!(
            "{} name cannot be empty or whitespace",
            kind
        )));
    }

    Ok(trimmed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_name_trims() {
        assert_eq!(validate_name("user", "  alice ").unwrap(), "alice");
        assert!(validate_name("user", "\t\n").is_err());
    }
}
