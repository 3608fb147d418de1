//! Ordering of field lists by a [`SortRule`].

use std::cmp::Ordering;

use fieldpath_types::{Field, SortBy, SortDirection, SortRule};

fn sort_key(field: &Field, sort_by: SortBy) -> String {
    match sort_by {
        SortBy::Field => field.label.to_lowercase(),
        SortBy::Type => field.r#type.as_str().to_lowercase(),
    }
}

/// Compares two fields under `rule`. Equal keys compare equal in both
/// directions, so a stable sort keeps their input order.
pub fn compare_fields(a: &Field, b: &Field, rule: &SortRule) -> Ordering {
    let ordering = sort_key(a, rule.sort_by).cmp(&sort_key(b, rule.sort_by));
    match rule.dir {
        SortDirection::Asc => ordering,
        SortDirection::Desc => ordering.reverse(),
    }
}

/// Stable sort; `None` leaves the list as is.
pub fn apply_sort(mut fields: Vec<Field>, rule: Option<&SortRule>) -> Vec<Field> {
    if let Some(rule) = rule {
        fields.sort_by(|a, b| compare_fields(a, b, rule));
    }
    fields
}
