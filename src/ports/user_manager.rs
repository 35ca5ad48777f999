use crate::{CreationalError, EntityId, Family};
use std::any::Any;
use std::fmt;

/// Department capability. Does not track which users reference it.
pub trait Department: fmt::Debug + Send + Sync {
    fn id(&self) -> &EntityId;

    fn name(&self) -> Result<String, CreationalError>;

    fn set_name(&self, name: &str) -> Result<(), CreationalError>;

    fn family(&self) -> Family;

    /// Lets the owning family narrow a `&dyn Department` back to its own variant.
    fn as_any(&self) -> &dyn Any;
}

/// User capability with a non-owning association to at most one department.
pub trait User: fmt::Debug + Send + Sync {
    fn id(&self) -> &EntityId;

    fn name(&self) -> Result<String, CreationalError>;

    fn set_name(&self, name: &str) -> Result<(), CreationalError>;

    /// Returns the associated department, if any is set and still resolvable.
    fn department(&self) -> Result<Option<Box<dyn Department>>, CreationalError>;

    /// Associates a department with this user.
    ///
    /// Departments from another family or store are rejected under
    /// [`FamilyCheck::Strict`](crate::FamilyCheck::Strict) and narrowed
    /// without validation otherwise.
    fn set_department(&self, department: &dyn Department) -> Result<(), CreationalError>;

    fn family(&self) -> Family;
}

/// Abstract factory for a family of related users and departments.
///
/// Both operations are create-or-get: repeated calls with the same name on
/// the same manager resolve to the same stored entity.
pub trait UserManager: Send + Sync {
    fn family(&self) -> Family;

    fn create_or_get_user(&self, name: &str) -> Result<Box<dyn User>, CreationalError>;

    fn create_or_get_department(
        &self,
        name: &str,
    ) -> Result<Box<dyn Department>, CreationalError>;
}
