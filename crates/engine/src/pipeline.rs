//! Composition of the displayed regular-field list.
//!
//! Stages run in a fixed order: type filter, search, sort. Each stage takes
//! the previous stage's output.

use fieldpath_types::{Field, SortRule};

use crate::{filter::FilterSet, sort::apply_sort};

/// Case-insensitive substring match against label or API name. An empty term
/// keeps every field.
pub fn apply_search(fields: Vec<Field>, search_term: &str) -> Vec<Field> {
    if search_term.is_empty() {
        return fields;
    }
    let needle = search_term.to_lowercase();
    fields
        .into_iter()
        .filter(|field| field.label.to_lowercase().contains(&needle) || field.api_name.to_lowercase().contains(&needle))
        .collect()
}

/// Produces the displayed list from the full regular-field list.
pub fn apply_pipeline(regular_fields: &[Field], filters: &FilterSet, search_term: &str, sort: Option<&SortRule>) -> Vec<Field> {
    let filtered = filters.apply(regular_fields.to_vec());
    let searched = apply_search(filtered, search_term);
    apply_sort(searched, sort)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::{DisabledFilterOrder, FilterSelectionMode};
    use fieldpath_types::{DisplayType, SortBy, SortDirection};

    fn sample_fields() -> Vec<Field> {
        vec![
            Field::regular("Email__c", "Email", DisplayType::Email),
            Field::regular("Name", "Name", DisplayType::String),
            Field::regular("Backup_Email__c", "Backup Email", DisplayType::Email),
            Field::regular("IsActive__c", "Active", DisplayType::Boolean),
        ]
    }

    fn filters_for(fields: &[Field]) -> FilterSet {
        let mut filters = FilterSet::new(Vec::new(), FilterSelectionMode::Single, DisabledFilterOrder::Declared);
        filters.refresh(fields);
        filters
    }

    #[test]
    fn search_matches_label_or_api_name() {
        let fields = vec![
            Field::regular("Email__c", "Email", DisplayType::Email),
            Field::regular("Name", "Name", DisplayType::String),
        ];
        let found = apply_search(fields, "ema");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].api_name, "Email__c");

        let by_api_name = apply_search(sample_fields(), "ISACTIVE");
        assert_eq!(by_api_name.len(), 1);
        assert_eq!(by_api_name[0].label, "Active");
    }

    #[test]
    fn stages_compose_in_order() {
        let fields = sample_fields();
        let mut filters = filters_for(&fields);
        filters.toggle(&DisplayType::Email).expect("select email");
        let rule = SortRule::new(SortBy::Field, SortDirection::Asc);

        let displayed = apply_pipeline(&fields, &filters, "email", Some(&rule));
        let names: Vec<_> = displayed.iter().map(|field| field.label.as_str()).collect();
        assert_eq!(names, vec!["Backup Email", "Email"]);
    }

    #[test]
    fn applying_twice_matches_applying_once() {
        let fields = sample_fields();
        let filters = filters_for(&fields);
        let rule = SortRule::new(SortBy::Type, SortDirection::Desc);

        let once = apply_pipeline(&fields, &filters, "e", Some(&rule));
        let twice = apply_pipeline(&once, &filters, "e", Some(&rule));
        assert_eq!(once, twice);
    }

    #[test]
    fn empty_search_and_no_sort_pass_through() {
        let fields = sample_fields();
        let filters = filters_for(&fields);
        assert_eq!(apply_pipeline(&fields, &filters, "", None), fields);
    }
}
