use std::collections::BTreeMap;

use serde::Serialize;

use crate::models::Employee;

/// Bucket label for records without a role.
pub const NO_ROLE: &str = "No Role";

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Range {
    pub min: f64,
    pub max: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RoleShare {
    pub count: usize,
    pub percentage: i64,
}

/// Summary metrics over the full (unfiltered) list.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Statistics {
    pub total_employees: usize,
    pub average_salary: i64,
    pub average_age: i64,
    pub salary_range: Range,
    pub age_range: Range,
    pub role_distribution: BTreeMap<String, usize>,
}

impl Statistics {
    /// Per-role counts with rounded percentages; empty when there are
    /// no employees at all.
    pub fn role_percentages(&self) -> BTreeMap<String, RoleShare> {
        if self.total_employees == 0 {
            return BTreeMap::new();
        }
        self.role_distribution
            .iter()
            .map(|(role, &count)| {
                let percentage =
                    (100.0 * count as f64 / self.total_employees as f64).round() as i64;
                (role.clone(), RoleShare { count, percentage })
            })
            .collect()
    }
}

pub fn calculate(employees: &[Employee]) -> Statistics {
    if employees.is_empty() {
        return Statistics {
            total_employees: 0,
            average_salary: 0,
            average_age: 0,
            salary_range: Range { min: 0.0, max: 0.0 },
            age_range: Range { min: 0.0, max: 0.0 },
            role_distribution: BTreeMap::new(),
        };
    }

    let total = employees.len();
    let salary_sum: f64 = employees.iter().map(|e| e.salary).sum();
    let age_sum: i64 = employees.iter().map(|e| e.age).sum();

    let mut salary_range = Range {
        min: f64::INFINITY,
        max: f64::NEG_INFINITY,
    };
    let mut age_range = salary_range;
    let mut role_distribution: BTreeMap<String, usize> = BTreeMap::new();

    for employee in employees {
        salary_range.min = salary_range.min.min(employee.salary);
        salary_range.max = salary_range.max.max(employee.salary);
        age_range.min = age_range.min.min(employee.age as f64);
        age_range.max = age_range.max.max(employee.age as f64);

        let bucket = employee
            .role
            .map(|r| r.as_str().to_string())
            .unwrap_or_else(|| NO_ROLE.to_string());
        *role_distribution.entry(bucket).or_insert(0) += 1;
    }

    Statistics {
        total_employees: total,
        average_salary: (salary_sum / total as f64).round() as i64,
        average_age: (age_sum as f64 / total as f64).round() as i64,
        salary_range,
        age_range,
        role_distribution,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Role;

    fn emp(age: i64, role: Option<Role>, salary: f64) -> Employee {
        Employee {
            id: 0,
            name: "X".to_string(),
            email: "x@email.com".to_string(),
            age,
            role,
            salary,
        }
    }

    #[test]
    fn empty_list_yields_zeroes_not_division_failures() {
        let stats = calculate(&[]);
        assert_eq!(stats.total_employees, 0);
        assert_eq!(stats.average_salary, 0);
        assert_eq!(stats.average_age, 0);
        assert_eq!(stats.salary_range, Range { min: 0.0, max: 0.0 });
        assert_eq!(stats.age_range, Range { min: 0.0, max: 0.0 });
        assert!(stats.role_distribution.is_empty());
        assert!(stats.role_percentages().is_empty());
    }

    #[test]
    fn average_salary_rounds_to_nearest_integer() {
        let stats = calculate(&[emp(20, None, 100.0), emp(30, None, 200.0)]);
        assert_eq!(stats.average_salary, 150);
        assert_eq!(stats.average_age, 25);
    }

    #[test]
    fn ranges_span_min_and_max() {
        let stats = calculate(&[
            emp(19, None, 30000.0),
            emp(49, None, 75000.0),
            emp(23, None, 50000.0),
        ]);
        assert_eq!(stats.salary_range, Range { min: 30000.0, max: 75000.0 });
        assert_eq!(stats.age_range, Range { min: 19.0, max: 49.0 });
    }

    #[test]
    fn role_distribution_buckets_missing_roles() {
        let stats = calculate(&[
            emp(30, Some(Role::Hr), 1.0),
            emp(30, Some(Role::Hr), 1.0),
            emp(30, None, 1.0),
        ]);
        assert_eq!(stats.role_distribution.get("HR"), Some(&2));
        assert_eq!(stats.role_distribution.get(NO_ROLE), Some(&1));
    }

    #[test]
    fn role_percentages_round() {
        let stats = calculate(&[
            emp(30, Some(Role::Hr), 1.0),
            emp(30, Some(Role::Hr), 1.0),
            emp(30, None, 1.0),
        ]);
        let shares = stats.role_percentages();
        assert_eq!(shares["HR"], RoleShare { count: 2, percentage: 67 });
        assert_eq!(shares[NO_ROLE], RoleShare { count: 1, percentage: 33 });
    }
}
