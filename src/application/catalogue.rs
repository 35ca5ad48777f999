use crate::{
    CreationalConfig, CreationalError, Family, Product, User, UserManager,
    factories::Factories,
    repositories::{InMemoryUserManager, SqlUserManager},
};

/// Composition root wiring the factories and the configured user family.
///
/// Callers ask the catalogue for products and users and only ever see the
/// shared capability traits, never the concrete variants.
pub struct Catalogue {
    config: CreationalConfig,
    factories: Factories,
    users: Box<dyn UserManager>,
}

impl Catalogue {
    pub fn new(config: CreationalConfig) -> Result<Self, CreationalError> {
        let users = user_manager_for(&config)?;

        tracing::debug!(
            family = %users.family(),
            family_check = %config.family_check,
            "catalogue ready"
        );

        Ok(Self {
            config,
            factories: Factories::new(),
            users,
        })
    }

    pub fn config(&self) -> &CreationalConfig {
        &self.config
    }

    pub fn factories(&self) -> &Factories {
        &self.factories
    }

    pub fn users(&self) -> &dyn UserManager {
        self.users.as_ref()
    }

    /// Builds the product configured as `default_product`.
    pub fn default_product(&self) -> Box<dyn Product> {
        self.factories
            .simple()
            .create_product(self.config.default_product)
    }

    /// Creates or fetches a user and a department and assigns one to the other.
    pub fn enroll(
        &self,
        user_name: &str,
        department_name: &str,
    ) -> Result<Box<dyn User>, CreationalError> {
        let user = self.users.create_or_get_user(user_name)?;
        let department = self.users.create_or_get_department(department_name)?;

        user.set_department(department.as_ref())?;
        tracing::debug!(user = %user.id(), department = %department.id(), "enrolled user");

        Ok(user)
    }
}

/// Picks the user-manager family named by the configuration.
pub fn user_manager_for(
    config: &CreationalConfig,
) -> Result<Box<dyn UserManager>, CreationalError> {
    match config.user_family {
        Family::Sql => Ok(Box::new(SqlUserManager::from_config(config)?)),
        Family::InMemory => Ok(Box::new(InMemoryUserManager::new(config.family_check))),
    }
}
