use std::cmp::Ordering;
use std::fmt;

use crate::models::Employee;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    Id,
    Name,
    Email,
    Age,
    Role,
    Salary,
}

impl SortKey {
    pub const ALL: [SortKey; 6] = [
        SortKey::Id,
        SortKey::Name,
        SortKey::Email,
        SortKey::Age,
        SortKey::Role,
        SortKey::Salary,
    ];
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SortKey::Id => "id",
            SortKey::Name => "name",
            SortKey::Email => "email",
            SortKey::Age => "age",
            SortKey::Role => "role",
            SortKey::Salary => "salary",
        };
        f.write_str(name)
    }
}

impl std::str::FromStr for SortKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "id" => Ok(SortKey::Id),
            "name" => Ok(SortKey::Name),
            "email" => Ok(SortKey::Email),
            "age" => Ok(SortKey::Age),
            "role" => Ok(SortKey::Role),
            "salary" => Ok(SortKey::Salary),
            other => Err(format!("unknown sort key '{}'", other)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Direction {
    #[default]
    Ascending,
    Descending,
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SortConfig {
    pub key: Option<SortKey>,
    pub direction: Direction,
}

impl SortConfig {
    /// Column-header behavior: clicking the active key flips the
    /// direction, picking a new key starts ascending.
    pub fn toggle(&mut self, key: SortKey) {
        if self.key == Some(key) {
            self.direction = match self.direction {
                Direction::Ascending => Direction::Descending,
                Direction::Descending => Direction::Ascending,
            };
        } else {
            self.key = Some(key);
            self.direction = Direction::Ascending;
        }
    }

    pub fn reset(&mut self) {
        *self = SortConfig::default();
    }
}

/// Value of a sort key for one record. Role is the only field that
/// can be absent.
enum SortValue {
    Num(f64),
    Text(String),
}

fn sort_value(employee: &Employee, key: SortKey) -> Option<SortValue> {
    match key {
        SortKey::Id => Some(SortValue::Num(employee.id as f64)),
        SortKey::Age => Some(SortValue::Num(employee.age as f64)),
        SortKey::Salary => Some(SortValue::Num(employee.salary)),
        SortKey::Name => Some(SortValue::Text(employee.name.to_lowercase())),
        SortKey::Email => Some(SortValue::Text(employee.email.to_lowercase())),
        SortKey::Role => employee
            .role
            .map(|r| SortValue::Text(r.as_str().to_lowercase())),
    }
}

fn compare_present(a: &SortValue, b: &SortValue) -> Ordering {
    match (a, b) {
        (SortValue::Num(x), SortValue::Num(y)) => x.partial_cmp(y).unwrap_or(Ordering::Equal),
        (SortValue::Text(x), SortValue::Text(y)) => x.cmp(y),
        // Mixed kinds cannot happen for a single key; keep input order.
        _ => Ordering::Equal,
    }
}

/// Reorder records by the configured key. `key = None` is the
/// identity. Records missing the key value sort after all present
/// values in either direction; the sort is stable, so equal keys keep
/// their input order.
pub fn sort(records: &[Employee], config: &SortConfig) -> Vec<Employee> {
    let mut sorted: Vec<Employee> = records.to_vec();
    let Some(key) = config.key else {
        return sorted;
    };

    sorted.sort_by(|a, b| {
        match (sort_value(a, key), sort_value(b, key)) {
            (None, None) => Ordering::Equal,
            (None, Some(_)) => Ordering::Greater,
            (Some(_), None) => Ordering::Less,
            (Some(va), Some(vb)) => {
                let ord = compare_present(&va, &vb);
                match config.direction {
                    Direction::Ascending => ord,
                    Direction::Descending => ord.reverse(),
                }
            }
        }
    });
    sorted
}
