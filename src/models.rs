use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Job roles allowed by the store schema. Anything else is rejected
/// by the CHECK constraint on the `role` column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    Manager,
    Developer,
    #[serde(rename = "HR")]
    Hr,
    Sales,
    Intern,
}

impl Role {
    pub const ALL: [Role; 5] = [
        Role::Manager,
        Role::Developer,
        Role::Hr,
        Role::Sales,
        Role::Intern,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Manager => "Manager",
            Role::Developer => "Developer",
            Role::Hr => "HR",
            Role::Sales => "Sales",
            Role::Intern => "Intern",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Manager" => Ok(Role::Manager),
            "Developer" => Ok(Role::Developer),
            "HR" => Ok(Role::Hr),
            "Sales" => Ok(Role::Sales),
            "Intern" => Ok(Role::Intern),
            other => Err(format!(
                "unknown role '{}' (expected Manager, Developer, HR, Sales or Intern)",
                other
            )),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Employee {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub age: i64,
    pub role: Option<Role>, // stored rows always carry one; derived lists may not
    pub salary: f64,
}

/// Payload for creating an employee. The store assigns the id and
/// resolves an absent role to Intern.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewEmployee {
    pub name: String,
    pub email: String,
    pub age: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<Role>,
    pub salary: f64,
}

/// Partial update. Absent fields keep their stored values (the update
/// statement coalesces every column).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EmployeeUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<Role>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub salary: Option<f64>,
}

impl EmployeeUpdate {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.email.is_none()
            && self.age.is_none()
            && self.role.is_none()
            && self.salary.is_none()
    }
}
