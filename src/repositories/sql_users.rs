use super::{database::UserDatabase, validate_name};
use crate::{
    CreationalConfig, CreationalError, Department, EntityId, Family, FamilyCheck, User,
    UserManager,
};
use std::any::Any;
use std::sync::Arc;

/// User manager whose users and departments live in SQLite.
///
/// Handles returned by this manager read and write through the database, so
/// two handles for the same name always observe the same state. Clones of a
/// manager share one database.
#[derive(Debug, Clone)]
pub struct SqlUserManager {
    database: Arc<UserDatabase>,
    family_check: FamilyCheck,
}

impl SqlUserManager {
    pub fn in_memory(family_check: FamilyCheck) -> Result<Self, CreationalError> {
        Ok(Self {
            database: Arc::new(UserDatabase::open_in_memory()?),
            family_check,
        })
    }

    pub fn from_config(config: &CreationalConfig) -> Result<Self, CreationalError> {
        Self::in_memory(config.family_check)
    }

    pub fn database(&self) -> &UserDatabase {
        &self.database
    }
}

impl UserManager for SqlUserManager {
    fn family(&self) -> Family {
        Family::Sql
    }

    fn create_or_get_user(&self, name: &str) -> Result<Box<dyn User>, CreationalError> {
        let name = validate_name("user", name)?;
        let (id, created) = self.database.get_or_insert_user(name)?;

        if created {
            tracing::debug!(%id, name, "created sql user");
        } else {
            tracing::trace!(%id, name, "found existing sql user");
        }

        Ok(Box::new(SqlUser {
            id,
            database: Arc::clone(&self.database),
            family_check: self.family_check,
        }))
    }

    fn create_or_get_department(
        &self,
        name: &str,
    ) -> Result<Box<dyn Department>, CreationalError> {
        let name = validate_name("department", name)?;
        let (id, created) = self.database.get_or_insert_department(name)?;

        if created {
            tracing::debug!(%id, name, "created sql department");
        } else {
            tracing::trace!(%id, name, "found existing sql department");
        }

        Ok(Box::new(SqlDepartment {
            id,
            database: Arc::clone(&self.database),
        }))
    }
}

#[derive(Debug)]
struct SqlUser {
    id: EntityId,
    database: Arc<UserDatabase>,
    family_check: FamilyCheck,
}

impl User for SqlUser {
    fn id(&self) -> &EntityId {
        &self.id
    }

    fn name(&self) -> Result<String, CreationalError> {
        self.database.user_name(&self.id)
    }

    fn set_name(&self, name: &str) -> Result<(), CreationalError> {
        let name = validate_name("user", name)?;
        self.database.rename_user(&self.id, name)
    }

    fn department(&self) -> Result<Option<Box<dyn Department>>, CreationalError> {
        let Some(department_id) = self.database.user_department(&self.id)? else {
            return Ok(None);
        };

        // An id taken from another store does not resolve here.
        if !self.database.department_exists(&department_id)? {
            return Ok(None);
        }

        Ok(Some(Box::new(SqlDepartment {
            id: department_id,
            database: Arc::clone(&self.database),
        })))
    }

    fn set_department(&self, department: &dyn Department) -> Result<(), CreationalError> {
        let Some(narrowed) = department.as_any().downcast_ref::<SqlDepartment>() else {
            if self.family_check.is_strict() {
                tracing::warn!(
                    user = %self.id,
                    found = %department.family(),
                    "rejected department from another family"
                );
                return Err(CreationalError::IncompatibleFamily {
                    expected: Family::Sql,
                    found: department.family(),
                });
            }

            tracing::debug!(user = %self.id, "department did not narrow, clearing association");
            return self.database.set_user_department(&self.id, None);
        };

        if !Arc::ptr_eq(&self.database, &narrowed.database) && self.family_check.is_strict() {
            tracing::warn!(
                user = %self.id,
                department = %narrowed.id,
                "rejected department from another store"
            );
            return Err(CreationalError::ForeignStore(Family::Sql));
        }

        self.database.set_user_department(&self.id, Some(&narrowed.id))
    }

    fn family(&self) -> Family {
        Family::Sql
    }
}

#[derive(Debug)]
struct SqlDepartment {
    id: EntityId,
    database: Arc<UserDatabase>,
}

impl Department for SqlDepartment {
    fn id(&self) -> &EntityId {
        &self.id
    }

    fn name(&self) -> Result<String, CreationalError> {
        self.database.department_name(&self.id)
    }

    fn set_name(&self, name: &str) -> Result<(), CreationalError> {
        let name = validate_name("department", name)?;
        self.database.rename_department(&self.id, name)
    }

    fn family(&self) -> Family {
        Family::Sql
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
