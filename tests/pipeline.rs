//! End-to-end checks of the client-side derivation pipeline:
//! filter -> sort -> paginate -> bulk-select over one employee list.

use roster::filter::{Filters, filter};
use roster::models::{Employee, Role};
use roster::paginate::Pager;
use roster::selection::Selection;
use roster::sort::{Direction, SortConfig, SortKey, sort};
use roster::stats;

fn staff() -> Vec<Employee> {
    let rows = [
        (1, "Honda", 23, Some(Role::Developer), 50000.0),
        (2, "Toyota", 49, Some(Role::Manager), 75000.0),
        (3, "Suzuki", 19, Some(Role::Intern), 30000.0),
        (4, "Yamaha", 29, Some(Role::Developer), 55000.0),
        (5, "Kawasaki", 33, Some(Role::Hr), 60000.0),
        (6, "Ducati", 41, Some(Role::Sales), 65000.0),
        (7, "Aprilia", 26, Some(Role::Developer), 48000.0),
        (8, "Triumph", 38, None, 52000.0),
    ];
    rows.iter()
        .map(|(id, name, age, role, salary)| Employee {
            id: *id,
            name: name.to_string(),
            email: format!("{}@email.com", name.to_lowercase()),
            age: *age,
            role: *role,
            salary: *salary,
        })
        .collect()
}

#[test]
fn filter_output_is_a_subset_satisfying_every_predicate() {
    let staff = staff();
    let filters = Filters {
        role: Some(Role::Developer),
        salary_min: Some(40000.0),
        salary_max: Some(60000.0),
        ..Default::default()
    };
    let out = filter(&staff, &filters);
    assert!(out.len() < staff.len());
    for emp in &out {
        assert!(staff.contains(emp));
        assert!(filters.matches(emp));
    }
    assert_eq!(out.iter().map(|e| e.id).collect::<Vec<_>>(), vec![1, 4, 7]);
}

#[test]
fn shrinking_filter_result_snaps_pagination_back_to_page_one() {
    let staff = staff();
    let mut pager = Pager::new(3);

    // Browse to the last page of the unfiltered list.
    let full = filter(&staff, &Filters::default());
    pager.go_to(3, full.len());
    assert_eq!(pager.page(&full).page, 3);

    // A narrow filter shrinks the list below page 3.
    let narrow = filter(
        &staff,
        &Filters {
            role: Some(Role::Developer),
            ..Default::default()
        },
    );
    let page = pager.page(&narrow);
    assert_eq!(page.page, 1);
    assert_eq!(page.total_items, 3);
}

#[test]
fn selection_tracks_the_visible_page_through_the_pipeline() {
    let staff = staff();
    let sorted = sort(
        &filter(&staff, &Filters::default()),
        &SortConfig {
            key: Some(SortKey::Salary),
            direction: Direction::Descending,
        },
    );
    let mut pager = Pager::new(3);
    let mut selection = Selection::default();

    let page1 = pager.page(&sorted);
    let page1_ids: Vec<i64> = page1.items.iter().map(|e| e.id).collect();
    assert_eq!(page1_ids, vec![2, 6, 5]); // top salaries first
    selection.toggle_all(&page1_ids);
    assert!(selection.is_all_selected(&page1_ids));

    // Move to page 2: the old selection is retained but no longer
    // "all" or "some" of the new page.
    pager.next(sorted.len());
    let page2 = pager.page(&sorted);
    let page2_ids: Vec<i64> = page2.items.iter().map(|e| e.id).collect();
    assert!(!selection.is_all_selected(&page2_ids));
    assert!(!selection.is_some_selected(&page2_ids));
    assert_eq!(selection.count(), 3);

    selection.toggle(page2_ids[0]);
    assert!(selection.is_some_selected(&page2_ids));

    // After a mutation the caller clears the selection.
    selection.clear();
    assert!(selection.is_empty());
}

#[test]
fn sort_with_nulls_keeps_them_last_while_pages_stay_contiguous() {
    let staff = staff();
    let config = SortConfig {
        key: Some(SortKey::Role),
        direction: Direction::Ascending,
    };
    let sorted = sort(&staff, &config);
    assert_eq!(sorted.last().unwrap().id, 8); // the role-less record

    let mut pager = Pager::new(5);
    pager.go_to(2, sorted.len());
    let page = pager.page(&sorted);
    assert_eq!(page.items.len(), 3);
    assert_eq!(page.items.last().unwrap().id, 8);
}

#[test]
fn statistics_are_computed_over_the_unfiltered_list() {
    let staff = staff();
    let filtered = filter(
        &staff,
        &Filters {
            role: Some(Role::Developer),
            ..Default::default()
        },
    );
    assert_eq!(filtered.len(), 3);

    // The dashboard always aggregates the full list.
    let stats = stats::calculate(&staff);
    assert_eq!(stats.total_employees, 8);
    assert_eq!(stats.role_distribution.get("Developer"), Some(&3));
    assert_eq!(stats.role_distribution.get(stats::NO_ROLE), Some(&1));
}
