use std::path::{Path, PathBuf};

use rusqlite::{Connection, params};

use crate::error::{Error, Result};
use crate::models::{Employee, EmployeeUpdate, NewEmployee, Role};

/// Schema for the single backing table. SQLite has no ENUM, so the
/// role domain is a CHECK constraint; the age bound lives in the
/// schema as well so the store stays the authority over the client.
const CREATE_TABLE: &str = r#"
    CREATE TABLE employee_details(
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT NOT NULL,
        email TEXT NOT NULL UNIQUE,
        age INTEGER NOT NULL CHECK (age > 17),
        role TEXT NOT NULL DEFAULT 'Intern' CHECK (role IN ('Manager', 'Developer', 'HR', 'Sales', 'Intern')),
        salary REAL NOT NULL
    )
"#;

pub struct Database {
    conn: Connection,
    path: PathBuf,
}

impl Database {
    pub fn open(path: Option<&Path>) -> Result<Self> {
        let path = match path {
            Some(p) => p.to_path_buf(),
            None => Self::default_path(),
        };
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| Error::Database(format!("cannot create {}: {}", parent.display(), e)))?;
        }
        let conn = Connection::open(&path)?;
        Ok(Self { conn, path })
    }

    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        Ok(Self {
            conn,
            path: PathBuf::from(":memory:"),
        })
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }

    fn default_path() -> PathBuf {
        // Use XDG data directory or fallback
        if let Some(proj_dirs) = directories::ProjectDirs::from("", "", "roster") {
            proj_dirs.data_dir().join("roster.db")
        } else {
            PathBuf::from("roster.db")
        }
    }

    /// Lazy table bootstrap: the table is created on the first list
    /// request rather than by a separate migration step.
    pub fn ensure_table(&self) -> Result<()> {
        let tables: i64 = self.conn.query_row(
            "SELECT COUNT(*) FROM sqlite_master WHERE type='table' AND name='employee_details'",
            [],
            |row| row.get(0),
        )?;
        if tables == 0 {
            self.conn.execute(CREATE_TABLE, [])?;
        }
        Ok(())
    }

    pub fn list(&self) -> Result<Vec<Employee>> {
        self.ensure_table()?;
        let mut stmt = self
            .conn
            .prepare("SELECT id, name, email, age, role, salary FROM employee_details")?;
        let rows = stmt.query_map([], Self::row_to_employee)?;
        Ok(rows.collect::<std::result::Result<Vec<_>, _>>()?)
    }

    pub fn get(&self, id: i64) -> Result<Employee> {
        let result = self.conn.query_row(
            "SELECT id, name, email, age, role, salary FROM employee_details WHERE id = ?1",
            [id],
            Self::row_to_employee,
        );
        match result {
            Ok(emp) => Ok(emp),
            Err(rusqlite::Error::QueryReturnedNoRows) => Err(Error::not_found(id)),
            Err(e) => Err(e.into()),
        }
    }

    /// Insert a record and return it with the assigned id. An absent
    /// role coalesces to Intern inside the statement.
    pub fn create(&self, new: &NewEmployee) -> Result<Employee> {
        self.conn.execute(
            "INSERT INTO employee_details(name, email, age, role, salary)
             VALUES(?1, ?2, ?3, COALESCE(?4, 'Intern'), ?5)",
            params![
                new.name,
                new.email,
                new.age,
                new.role.map(|r| r.as_str()),
                new.salary
            ],
        )?;
        self.get(self.conn.last_insert_rowid())
    }

    /// Partial update: every column coalesces with its stored value,
    /// so absent fields keep what was there before.
    pub fn update(&self, id: i64, update: &EmployeeUpdate) -> Result<Employee> {
        let changed = self.conn.execute(
            "UPDATE employee_details
             SET name = COALESCE(?1, name),
                 email = COALESCE(?2, email),
                 age = COALESCE(?3, age),
                 role = COALESCE(?4, role),
                 salary = COALESCE(?5, salary)
             WHERE id = ?6",
            params![
                update.name,
                update.email,
                update.age,
                update.role.map(|r| r.as_str()),
                update.salary,
                id
            ],
        )?;
        if changed == 0 {
            return Err(Error::not_found(id));
        }
        self.get(id)
    }

    pub fn delete(&self, id: i64) -> Result<()> {
        let changed = self
            .conn
            .execute("DELETE FROM employee_details WHERE id = ?1", [id])?;
        if changed == 0 {
            return Err(Error::not_found(id));
        }
        Ok(())
    }

    /// Insert demo rows unless the table already holds data. Returns
    /// the number of rows added.
    pub fn seed(&self) -> Result<usize> {
        self.ensure_table()?;
        let existing: i64 =
            self.conn
                .query_row("SELECT COUNT(*) FROM employee_details", [], |row| row.get(0))?;
        if existing > 0 {
            return Ok(0);
        }
        let rows = [
            ("Honda", "honda@email.com", 23, Role::Developer, 50000.0),
            ("Toyota", "toyota@email.com", 49, Role::Manager, 75000.0),
            ("Suzuki", "suzuki@email.com", 19, Role::Intern, 30000.0),
            ("Yamaha", "yamaha@email.com", 29, Role::Developer, 55000.0),
            ("Kawasaki", "kawasaki@email.com", 33, Role::Hr, 60000.0),
        ];
        for (name, email, age, role, salary) in &rows {
            self.conn.execute(
                "INSERT INTO employee_details(name, email, age, role, salary)
                 VALUES(?1, ?2, ?3, ?4, ?5)",
                params![name, email, age, role.as_str(), salary],
            )?;
        }
        Ok(rows.len())
    }

    fn row_to_employee(row: &rusqlite::Row) -> rusqlite::Result<Employee> {
        let role: String = row.get(4)?;
        let role = role.parse::<Role>().map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(4, rusqlite::types::Type::Text, e.into())
        })?;
        Ok(Employee {
            id: row.get(0)?,
            name: row.get(1)?,
            email: row.get(2)?,
            age: row.get(3)?,
            role: Some(role),
            salary: row.get(5)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn db() -> Database {
        Database::open_in_memory().unwrap()
    }

    fn honda() -> NewEmployee {
        NewEmployee {
            name: "Honda".to_string(),
            email: "honda@email.com".to_string(),
            age: 23,
            role: None,
            salary: 50000.0,
        }
    }

    #[test]
    fn list_bootstraps_the_table() {
        let db = db();
        assert!(db.list().unwrap().is_empty());
    }

    #[test]
    fn create_assigns_id_and_defaults_role_to_intern() {
        let db = db();
        db.ensure_table().unwrap();
        let emp = db.create(&honda()).unwrap();
        assert_eq!(emp.id, 1);
        assert_eq!(emp.role, Some(Role::Intern));
        assert_eq!(emp.name, "Honda");
    }

    #[test]
    fn duplicate_email_is_a_constraint_violation() {
        let db = db();
        db.ensure_table().unwrap();
        db.create(&honda()).unwrap();
        let mut again = honda();
        again.name = "Honda II".to_string();
        match db.create(&again) {
            Err(Error::Constraint(_)) => {}
            other => panic!("expected constraint violation, got {:?}", other),
        }
    }

    #[test]
    fn age_bound_is_store_enforced() {
        let db = db();
        db.ensure_table().unwrap();
        let mut minor = honda();
        minor.age = 17;
        assert!(matches!(db.create(&minor), Err(Error::Constraint(_))));
    }

    #[test]
    fn update_keeps_absent_fields() {
        let db = db();
        db.ensure_table().unwrap();
        let mut new = honda();
        new.role = Some(Role::Developer);
        let created = db.create(&new).unwrap();

        let updated = db
            .update(
                created.id,
                &EmployeeUpdate {
                    salary: Some(60000.0),
                    ..Default::default()
                },
            )
            .unwrap();
        assert_eq!(updated.salary, 60000.0);
        assert_eq!(updated.name, created.name);
        assert_eq!(updated.email, created.email);
        assert_eq!(updated.age, created.age);
        assert_eq!(updated.role, created.role);
    }

    #[test]
    fn missing_ids_surface_not_found() {
        let db = db();
        db.ensure_table().unwrap();
        assert!(matches!(db.get(999), Err(Error::NotFound(_))));
        assert!(matches!(db.delete(999), Err(Error::NotFound(_))));
        assert!(matches!(
            db.update(999, &EmployeeUpdate::default()),
            Err(Error::NotFound(_))
        ));
    }

    #[test]
    fn seed_is_idempotent() {
        let db = db();
        assert_eq!(db.seed().unwrap(), 5);
        assert_eq!(db.seed().unwrap(), 0);
        assert_eq!(db.list().unwrap().len(), 5);
    }
}
