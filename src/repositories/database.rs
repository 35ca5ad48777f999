use crate::{CreationalError, EntityId};
use rusqlite::{Connection, ErrorCode, OptionalExtension, params};
use std::sync::{Mutex, MutexGuard};

/// In-memory SQLite store backing the SQL user/department family.
///
/// Rows are looked up by name, so names are unique per table. A user's
/// department is a plain column without a foreign key.
#[derive(Debug)]
pub struct UserDatabase {
    connection: Mutex<Connection>,
}

impl UserDatabase {
    pub fn open_in_memory() -> Result<Self, CreationalError> {
        let connection = Connection::open_in_memory()
            .map_err(|e| CreationalError::DatabaseError(e.to_string()))?;

        let db = Self {
            connection: Mutex::new(connection),
        };
        db.init_tables()?;

        tracing::debug!("opened in-memory user database");
        Ok(db)
    }

    fn init_tables(&self) -> Result<(), CreationalError> {
        let conn = self.lock()?;

        conn.execute(
            "CREATE TABLE IF NOT EXISTS departments (
                id TEXT PRIMARY KEY,
                name TEXT NOT NULL UNIQUE,
                created_at DATETIME NOT NULL
            )",
            [],
        )
        .map_err(|e| CreationalError::DatabaseError(e.to_string()))?;

        conn.execute(
            "CREATE TABLE IF NOT EXISTS users (
                id TEXT PRIMARY KEY,
                name TEXT NOT NULL UNIQUE,
                department_id TEXT,
                created_at DATETIME NOT NULL
            )",
            [],
        )
        .map_err(|e| CreationalError::DatabaseError(e.to_string()))?;

        Ok(())
    }

    fn lock(&self) -> Result<MutexGuard<'_, Connection>, CreationalError> {
        self.connection
            .lock()
            .map_err(|_| CreationalError::DatabaseError("connection lock poisoned".to_string()))
    }

    /// Returns the id of the user named `name`, inserting it when absent.
    /// The boolean is true when a new row was created.
    pub fn get_or_insert_user(&self, name: &str) -> Result<(EntityId, bool), CreationalError> {
        let conn = self.lock()?;
        get_or_insert(&conn, Table::Users, name)
    }

    pub fn get_or_insert_department(
        &self,
        name: &str,
    ) -> Result<(EntityId, bool), CreationalError> {
        let conn = self.lock()?;
        get_or_insert(&conn, Table::Departments, name)
    }

    pub fn user_name(&self, id: &EntityId) -> Result<String, CreationalError> {
        let conn = self.lock()?;
        read_name(&conn, Table::Users, id)
    }

    pub fn department_name(&self, id: &EntityId) -> Result<String, CreationalError> {
        let conn = self.lock()?;
        read_name(&conn, Table::Departments, id)
    }

    pub fn rename_user(&self, id: &EntityId, name: &str) -> Result<(), CreationalError> {
        let conn = self.lock()?;
        rename(&conn, Table::Users, id, name)
    }

    pub fn rename_department(&self, id: &EntityId, name: &str) -> Result<(), CreationalError> {
        let conn = self.lock()?;
        rename(&conn, Table::Departments, id, name)
    }

    pub fn department_exists(&self, id: &EntityId) -> Result<bool, CreationalError> {
        let conn = self.lock()?;
        let found = conn
            .query_row(
                "SELECT 1 FROM departments WHERE id = ?1",
                params![id.to_string()],
                |_| Ok(()),
            )
            .optional()?;

        Ok(found.is_some())
    }

    pub fn user_department(&self, id: &EntityId) -> Result<Option<EntityId>, CreationalError> {
        let conn = self.lock()?;
        let department_id: Option<Option<String>> = conn
            .query_row(
                "SELECT department_id FROM users WHERE id = ?1",
                params![id.to_string()],
                |row| row.get(0),
            )
            .optional()?;

        match department_id {
            None => Err(CreationalError::not_found(format!("user {}", id))),
            Some(None) => Ok(None),
            Some(Some(raw)) => Ok(Some(EntityId::try_from(raw.as_str())?)),
        }
    }

    pub fn set_user_department(
        &self,
        id: &EntityId,
        department_id: Option<&EntityId>,
    ) -> Result<(), CreationalError> {
        let conn = self.lock()?;
        let updated = conn.execute(
            "UPDATE users SET department_id = ?1 WHERE id = ?2",
            params![department_id.map(|d| d.to_string()), id.to_string()],
        )?;

        if updated == 0 {
            return Err(CreationalError::not_found(format!("user {}", id)));
        }

        Ok(())
    }

    pub fn count_users(&self) -> Result<usize, CreationalError> {
        let conn = self.lock()?;
        count(&conn, Table::Users)
    }

    pub fn count_departments(&self) -> Result<usize, CreationalError> {
        let conn = self.lock()?;
        count(&conn, Table::Departments)
    }
}

#[derive(Debug, Clone, Copy)]
enum Table {
    Users,
    Departments,
}

impl Table {
    fn name(&self) -> &'static str {
        match self {
            Self::Users => "users",
            Self::Departments => "departments",
        }
    }

    fn entity(&self) -> &'static str {
        match self {
            Self::Users => "user",
            Self::Departments => "department",
        }
    }
}

fn get_or_insert(
    conn: &Connection,
    table: Table,
    name: &str,
) -> Result<(EntityId, bool), CreationalError> {
    let existing: Option<String> = conn
        .query_row(
            &format!("SELECT id FROM {} WHERE name = ?1", table.name()),
            params![name],
            |row| row.get(0),
        )
        .optional()?;

    if let Some(raw) = existing {
        return Ok((EntityId::try_from(raw.as_str())?, false));
    }

    let id = EntityId::new();
    conn.execute(
        &format!(
            "INSERT INTO {} (id, name, created_at) VALUES (?1, ?2, ?3)",
            table.name()
        ),
        params![id.to_string(), name, chrono::Utc::now().to_rfc3339()],
    )?;

    Ok((id, true))
}

fn read_name(conn: &Connection, table: Table, id: &EntityId) -> Result<String, CreationalError> {
    conn.query_row(
        &format!("SELECT name FROM {} WHERE id = ?1", table.name()),
        params![id.to_string()],
        |row| row.get(0),
    )
    .optional()?
    .ok_or_else(|| CreationalError::not_found(format!("{} {}", table.entity(), id)))
}

fn rename(
    conn: &Connection,
    table: Table,
    id: &EntityId,
    name: &str,
) -> Result<(), CreationalError> {
    let updated = conn
        .execute(
            &format!("UPDATE {} SET name = ?1 WHERE id = ?2", table.name()),
            params![name, id.to_string()],
        )
        .map_err(|e| match e {
            rusqlite::Error::SqliteFailure(err, _) if err.code == ErrorCode::ConstraintViolation => {
                CreationalError::DuplicateName(name.to_string())
            }
            other => CreationalError::from(other),
        })?;

    if updated == 0 {
        return Err(CreationalError::not_found(format!(
            "{} {}",
            table.entity(),
            id
        )));
    }

    Ok(())
}

fn count(conn: &Connection, table: Table) -> Result<usize, CreationalError> {
    let total: i64 = conn.query_row(
        &format!("SELECT COUNT(*) FROM {}", table.name()),
        [],
        |row| row.get(0),
    )?;

    Ok(total as usize)
}
