use crate::models::{Employee, Role};

/// Criteria for narrowing the employee list. Every predicate defaults
/// to "match everything", so a fresh value passes the list through
/// untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Filters {
    pub search: String,
    pub role: Option<Role>,
    pub salary_min: Option<f64>,
    pub salary_max: Option<f64>,
    pub age_min: Option<i64>,
    pub age_max: Option<i64>,
}

impl Filters {
    /// All four predicates must hold: search over name or email
    /// (case-insensitive substring), exact role, and inclusive
    /// salary/age ranges with absent bounds unbounded.
    pub fn matches(&self, employee: &Employee) -> bool {
        let matches_search = self.search.is_empty() || {
            let term = self.search.to_lowercase();
            employee.name.to_lowercase().contains(&term)
                || employee.email.to_lowercase().contains(&term)
        };

        let matches_role = match self.role {
            None => true,
            Some(role) => employee.role == Some(role),
        };

        let matches_salary = employee.salary >= self.salary_min.unwrap_or(f64::NEG_INFINITY)
            && employee.salary <= self.salary_max.unwrap_or(f64::INFINITY);

        let matches_age = employee.age >= self.age_min.unwrap_or(i64::MIN)
            && employee.age <= self.age_max.unwrap_or(i64::MAX);

        matches_search && matches_role && matches_salary && matches_age
    }

    pub fn reset(&mut self) {
        *self = Filters::default();
    }

    pub fn is_active(&self) -> bool {
        *self != Filters::default()
    }
}

pub fn filter(records: &[Employee], filters: &Filters) -> Vec<Employee> {
    records
        .iter()
        .filter(|e| filters.matches(e))
        .cloned()
        .collect()
}
