use super::validate_name;
use crate::{CreationalError, Department, EntityId, Family, FamilyCheck, User, UserManager};
use std::any::Any;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard, Weak};

#[derive(Debug)]
struct DepartmentRecord {
    id: EntityId,
    name: RwLock<String>,
}

#[derive(Debug)]
struct UserRecord {
    id: EntityId,
    name: RwLock<String>,
    // Non-owning: the registry keeps departments alive.
    department: RwLock<Option<Weak<DepartmentRecord>>>,
}

#[derive(Debug, Default)]
struct Registry {
    users: Vec<Arc<UserRecord>>,
    departments: Vec<Arc<DepartmentRecord>>,
}

type SharedRegistry = Arc<RwLock<Registry>>;

fn poisoned() -> CreationalError {
    CreationalError::StorageError("in-memory store lock poisoned".to_string())
}

fn read<T>(lock: &RwLock<T>) -> Result<RwLockReadGuard<'_, T>, CreationalError> {
    lock.read().map_err(|_| poisoned())
}

fn write<T>(lock: &RwLock<T>) -> Result<RwLockWriteGuard<'_, T>, CreationalError> {
    lock.write().map_err(|_| poisoned())
}

fn name_taken<'a, I>(names: I, name: &str, except: &EntityId) -> Result<bool, CreationalError>
where
    I: IntoIterator<Item = (&'a EntityId, &'a RwLock<String>)>,
{
    for (id, current) in names {
        if id != except && *read(current)? == name {
            return Ok(true);
        }
    }
    Ok(false)
}

/// User manager that keeps its family in process memory.
#[derive(Debug, Clone, Default)]
pub struct InMemoryUserManager {
    registry: SharedRegistry,
    family_check: FamilyCheck,
}

impl InMemoryUserManager {
    pub fn new(family_check: FamilyCheck) -> Self {
        Self {
            registry: SharedRegistry::default(),
            family_check,
        }
    }

    pub fn user_count(&self) -> Result<usize, CreationalError> {
        Ok(read(&self.registry)?.users.len())
    }

    pub fn department_count(&self) -> Result<usize, CreationalError> {
        Ok(read(&self.registry)?.departments.len())
    }
}

impl UserManager for InMemoryUserManager {
    fn family(&self) -> Family {
        Family::InMemory
    }

    fn create_or_get_user(&self, name: &str) -> Result<Box<dyn User>, CreationalError> {
        let name = validate_name("user", name)?;
        let mut registry = write(&self.registry)?;

        let mut found = None;
        for record in &registry.users {
            if *read(&record.name)? == name {
                found = Some(Arc::clone(record));
                break;
            }
        }

        let record = match found {
            Some(record) => record,
            None => {
                let record = Arc::new(UserRecord {
                    id: EntityId::new(),
                    name: RwLock::new(name.to_string()),
                    department: RwLock::new(None),
                });
                tracing::debug!(id = %record.id, name, "created in-memory user");
                registry.users.push(Arc::clone(&record));
                record
            }
        };

        Ok(Box::new(MemoryUser {
            record,
            registry: Arc::clone(&self.registry),
            family_check: self.family_check,
        }))
    }

    fn create_or_get_department(
        &self,
        name: &str,
    ) -> Result<Box<dyn Department>, CreationalError> {
        let name = validate_name("department", name)?;
        let mut registry = write(&self.registry)?;

        let mut found = None;
        for record in &registry.departments {
            if *read(&record.name)? == name {
                found = Some(Arc::clone(record));
                break;
            }
        }

        let record = match found {
            Some(record) => record,
            None => {
                let record = Arc::new(DepartmentRecord {
                    id: EntityId::new(),
                    name: RwLock::new(name.to_string()),
                });
                tracing::debug!(id = %record.id, name, "created in-memory department");
                registry.departments.push(Arc::clone(&record));
                record
            }
        };

        Ok(Box::new(MemoryDepartment {
            record,
            registry: Arc::clone(&self.registry),
        }))
    }
}

#[derive(Debug)]
struct MemoryUser {
    record: Arc<UserRecord>,
    registry: SharedRegistry,
    family_check: FamilyCheck,
}

impl User for MemoryUser {
    fn id(&self) -> &EntityId {
        &self.record.id
    }

    fn name(&self) -> Result<String, CreationalError> {
        Ok(read(&self.record.name)?.clone())
    }

    fn set_name(&self, name: &str) -> Result<(), CreationalError> {
        let name = validate_name("user", name)?;
        let registry = write(&self.registry)?;

        let names = registry.users.iter().map(|u| (&u.id, &u.name));
        if name_taken(names, name, &self.record.id)? {
            return Err(CreationalError::DuplicateName(name.to_string()));
        }

        *write(&self.record.name)? = name.to_string();
        Ok(())
    }

    fn department(&self) -> Result<Option<Box<dyn Department>>, CreationalError> {
        let department = read(&self.record.department)?;

        Ok(department.as_ref().and_then(Weak::upgrade).map(|record| {
            Box::new(MemoryDepartment {
                record,
                registry: Arc::clone(&self.registry),
            }) as Box<dyn Department>
        }))
    }

    fn set_department(&self, department: &dyn Department) -> Result<(), CreationalError> {
        let Some(narrowed) = department.as_any().downcast_ref::<MemoryDepartment>() else {
            if self.family_check.is_strict() {
                tracing::warn!(
                    user = %self.record.id,
                    found = %department.family(),
                    "rejected department from another family"
                );
                return Err(CreationalError::IncompatibleFamily {
                    expected: Family::InMemory,
                    found: department.family(),
                });
            }

            tracing::debug!(user = %self.record.id, "department did not narrow, clearing association");
            *write(&self.record.department)? = None;
            return Ok(());
        };

        if !Arc::ptr_eq(&self.registry, &narrowed.registry) && self.family_check.is_strict() {
            tracing::warn!(
                user = %self.record.id,
                department = %narrowed.record.id,
                "rejected department from another store"
            );
            return Err(CreationalError::ForeignStore(Family::InMemory));
        }

        *write(&self.record.department)? = Some(Arc::downgrade(&narrowed.record));
        Ok(())
    }

    fn family(&self) -> Family {
        Family::InMemory
    }
}

#[derive(Debug)]
struct MemoryDepartment {
    record: Arc<DepartmentRecord>,
    registry: SharedRegistry,
}

impl Department for MemoryDepartment {
    fn id(&self) -> &EntityId {
        &self.record.id
    }

    fn name(&self) -> Result<String, CreationalError> {
        Ok(read(&self.record.name)?.clone())
    }

    fn set_name(&self, name: &str) -> Result<(), CreationalError> {
        let name = validate_name("department", name)?;
        let registry = write(&self.registry)?;

        let names = registry.departments.iter().map(|d| (&d.id, &d.name));
        if name_taken(names, name, &self.record.id)? {
            return Err(CreationalError::DuplicateName(name.to_string()));
        }

        *write(&self.record.name)? = name.to_string();
        Ok(())
    }

    fn family(&self) -> Family {
        Family::InMemory
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repositories::SqlUserManager;

    #[test]
    fn test_wire_user_to_department() {
        let manager = InMemoryUserManager::new(FamilyCheck::Unchecked);
        let user = manager.create_or_get_user("X").unwrap();
        let department = manager.create_or_get_department("Y").unwrap();

        user.set_department(department.as_ref()).unwrap();
        assert_eq!(user.department().unwrap().unwrap().name().unwrap(), "Y");
    }

    #[test]
    fn test_create_or_get_is_consistent() {
        let manager = InMemoryUserManager::new(FamilyCheck::Unchecked);
        let first = manager.create_or_get_department("finance").unwrap();
        let second = manager.create_or_get_department("finance").unwrap();

        assert_eq!(first.id(), second.id());
        assert_eq!(manager.department_count().unwrap(), 1);

        second.set_name("treasury").unwrap();
        assert_eq!(first.name().unwrap(), "treasury");
        // The old name is free again and creates a new department.
        let third = manager.create_or_get_department("finance").unwrap();
        assert_ne!(third.id(), first.id());
    }

    #[test]
    fn test_rename_to_taken_name_fails() {
        let manager = InMemoryUserManager::new(FamilyCheck::Unchecked);
        let _alice = manager.create_or_get_user("alice").unwrap();
        let bob = manager.create_or_get_user("bob").unwrap();

        assert!(matches!(
            bob.set_name("alice"),
            Err(CreationalError::DuplicateName(_))
        ));
        bob.set_name("bob").unwrap();
        assert_eq!(bob.name().unwrap(), "bob");
    }

    #[test]
    fn test_many_users_share_a_department() {
        let manager = InMemoryUserManager::new(FamilyCheck::Strict);
        let department = manager.create_or_get_department("support").unwrap();

        let users: Vec<_> = ["a", "b", "c"]
            .into_iter()
            .map(|name| manager.create_or_get_user(name).unwrap())
            .collect();
        for user in &users {
            user.set_department(department.as_ref()).unwrap();
        }
        assert_eq!(manager.user_count().unwrap(), 3);

        department.set_name("helpdesk").unwrap();
        for user in &users {
            assert_eq!(user.department().unwrap().unwrap().name().unwrap(), "helpdesk");
        }
    }

    #[test]
    fn test_strict_rejects_sql_department() {
        let manager = InMemoryUserManager::new(FamilyCheck::Strict);
        let sql = SqlUserManager::in_memory(FamilyCheck::Strict).unwrap();

        let user = manager.create_or_get_user("hank").unwrap();
        let foreign = sql.create_or_get_department("ops").unwrap();

        let err = user.set_department(foreign.as_ref()).unwrap_err();
        assert!(err.is_family_mismatch());
        assert!(user.department().unwrap().is_none());
    }

    #[test]
    fn test_strict_rejects_other_registry() {
        let manager = InMemoryUserManager::new(FamilyCheck::Strict);
        let other = InMemoryUserManager::new(FamilyCheck::Strict);

        let user = manager.create_or_get_user("ivy").unwrap();
        let foreign = other.create_or_get_department("ops").unwrap();

        assert!(matches!(
            user.set_department(foreign.as_ref()),
            Err(CreationalError::ForeignStore(Family::InMemory))
        ));
    }
}
