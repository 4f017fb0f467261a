use std::sync::LazyLock;

use regex::Regex;

use crate::models::NewEmployee;

static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid email regex"));

/// 2-50 characters after trimming.
pub fn is_valid_name(name: &str) -> bool {
    let trimmed = name.trim();
    (2..=50).contains(&trimmed.chars().count())
}

/// Simple `local@domain.tld` shape; the store enforces uniqueness.
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_RE.is_match(email.trim())
}

/// The store only requires age > 17; the client recommends 18-70.
pub fn is_valid_age(age: i64) -> bool {
    (18..=70).contains(&age)
}

pub fn is_valid_salary(salary: f64) -> bool {
    salary.is_finite() && salary > 0.0
}

/// Field-level checks run before submission so obviously bad requests
/// never make a round trip. The store remains the authority; passing
/// here does not guarantee acceptance (duplicate email, for one).
pub fn validate(employee: &NewEmployee) -> Vec<String> {
    let mut errors = Vec::new();

    if !is_valid_name(&employee.name) {
        errors.push("Name must be between 2 and 50 characters".to_string());
    }
    if !is_valid_email(&employee.email) {
        errors.push("Invalid email format".to_string());
    }
    if !is_valid_age(employee.age) {
        errors.push("Age must be between 18 and 70".to_string());
    }
    if !is_valid_salary(employee.salary) {
        errors.push("Salary must be a positive number".to_string());
    }

    errors
}
