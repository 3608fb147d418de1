//! Field selection state machine.
//!
//! [`FieldSelectionController`] owns the navigation history, the filter menu,
//! the sort rule, the search term and the current selection, and drives field
//! loads through a [`SchemaProvider`].
//!
//! Loads are split in two halves so a host can run the fetch wherever it
//! likes: [`FieldSelectionController::begin_load`] (or any navigation
//! operation) hands out a [`LoadRequest`], and
//! [`FieldSelectionController::complete_load`] applies the provider's answer.
//! Only the newest request is ever applied; older completions are reported as
//! [`LoadOutcome::Stale`] and change nothing.

mod events;
mod state;

use std::sync::Arc;

use anyhow::Result;
use fieldpath_types::{
    DisplayType, Field, FilterOption, LookupStackEntry, RawField, SORT_OPTIONS, SelectedField, SortOption, SortRule,
    find_sort_option,
};
use tracing::{debug, info, warn};

pub use events::{ErrorReport, EventSink, NavigationEvent, NavigationEventShape, PickerEvent, RecordingEventSink, TracingEventSink};
pub use state::{FieldLists, LoadOutcome, LoadRequest, PickerState};

use crate::{
    config::{PickerConfig, ResolvedPickerConfig, normalize_base_object_name},
    error::PickerError,
    filter::FilterSet,
    highlight::{LabelPart, label_parts},
    navigation::{Breadcrumb, NavigationError, NavigationStack, TruncateOutcome},
    pipeline::apply_pipeline,
    schema::SchemaProvider,
};

const LOAD_FIELDS_OPERATION: &str = "loadFields";

pub struct FieldSelectionController {
    provider: Arc<dyn SchemaProvider>,
    sink: Arc<dyn EventSink>,
    config: ResolvedPickerConfig,
    base_object: String,
    stack: NavigationStack,
    filters: FilterSet,
    sort: Option<SortRule>,
    search_term: String,
    selected: Option<SelectedField>,
    state: PickerState,
    generation: u64,
}

impl FieldSelectionController {
    /// Creates a closed controller. Initial filter values outside the
    /// allow-list are reported to `sink` as validation errors.
    pub fn new(config: ResolvedPickerConfig, provider: Arc<dyn SchemaProvider>, sink: Arc<dyn EventSink>) -> Self {
        let mut filters = empty_filters(&config);
        let rejected = filters.preselect(&config.initial_filter);
        for value in rejected {
            let message = format!("Invalid initial filter \"{value}\". The value is not one of the allowed field types");
            warn!(%message, "rejected initial filter");
            sink.emit(PickerEvent::ValidationError(message));
        }

        Self {
            provider,
            sink,
            base_object: config.base_object.clone(),
            stack: NavigationStack::new(config.depth),
            filters,
            sort: config.initial_sort,
            search_term: String::new(),
            selected: None,
            state: PickerState::Closed { retained: None },
            generation: 0,
            config,
        }
    }

    /// Resolves a raw configuration, reporting each invalid value to `sink`.
    pub fn from_config(config: &PickerConfig, provider: Arc<dyn SchemaProvider>, sink: Arc<dyn EventSink>) -> Self {
        let (resolved, messages) = config.resolve();
        for message in messages {
            warn!(%message, "invalid picker configuration");
            sink.emit(PickerEvent::ValidationError(message));
        }
        Self::new(resolved, provider, sink)
    }

    pub fn config(&self) -> &ResolvedPickerConfig {
        &self.config
    }

    pub fn state(&self) -> &PickerState {
        &self.state
    }

    pub fn provider(&self) -> Arc<dyn SchemaProvider> {
        Arc::clone(&self.provider)
    }

    pub fn base_object(&self) -> &str {
        &self.base_object
    }

    /// Object whose fields are (or will be) listed.
    pub fn current_object(&self) -> &str {
        self.stack.current_object(&self.base_object)
    }

    pub fn navigation(&self) -> &NavigationStack {
        &self.stack
    }

    pub fn breadcrumbs(&self) -> Vec<Breadcrumb> {
        self.stack.breadcrumbs()
    }

    pub fn lookup_fields(&self) -> &[Field] {
        self.state.lists().map(|lists| lists.lookup_fields.as_slice()).unwrap_or(&[])
    }

    pub fn regular_fields(&self) -> &[Field] {
        self.state.lists().map(|lists| lists.regular_fields.as_slice()).unwrap_or(&[])
    }

    pub fn displayed_fields(&self) -> &[Field] {
        self.state.lists().map(|lists| lists.displayed_fields.as_slice()).unwrap_or(&[])
    }

    pub fn filter_options(&self) -> &[FilterOption] {
        self.filters.options()
    }

    pub fn sort(&self) -> Option<SortRule> {
        self.sort
    }

    pub fn sort_options(&self) -> &'static [SortOption] {
        &SORT_OPTIONS
    }

    /// Catalog id of the active sort option.
    pub fn sort_option_id(&self) -> String {
        match self.sort {
            Some(rule) => rule.id(),
            None => SORT_OPTIONS[0].id.to_string(),
        }
    }

    pub fn search_term(&self) -> &str {
        &self.search_term
    }

    pub fn selected_field(&self) -> Option<&SelectedField> {
        self.selected.as_ref()
    }

    pub fn selected_field_path(&self) -> Option<&str> {
        self.selected.as_ref().map(|selected| selected.relationship_path.as_str())
    }

    /// Label of `field` split around the search match.
    pub fn label_parts(&self, field: &Field) -> Vec<LabelPart> {
        label_parts(&field.label, &self.search_term)
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.state, PickerState::Loading { .. })
    }

    pub fn is_back_disabled(&self) -> bool {
        self.stack.is_empty()
    }

    pub fn is_select_disabled(&self) -> bool {
        self.selected.is_none()
    }

    pub fn is_lookup_selection_disabled(&self) -> bool {
        !self.lookup_selection_allowed()
    }

    pub fn is_maximum_depth(&self) -> bool {
        self.stack.is_at_max_depth()
    }

    pub fn is_user_filtering_disabled(&self) -> bool {
        self.filters.is_locked()
    }

    /// Shows the picker.
    ///
    /// With a selection or a pending initial path the retained lists are
    /// reused and no load starts. Otherwise the current object is loaded.
    pub fn open(&mut self) -> Option<LoadRequest> {
        let retained = match &mut self.state {
            PickerState::Closed { retained } => retained.take(),
            other => {
                debug!(state = other.name(), "open ignored; picker already open");
                return None;
            }
        };

        if self.selected.is_some() || self.config.initial_field_path.is_some() {
            debug!(reused_lists = retained.is_some(), "picker opened without reload");
            self.state = match retained {
                Some(lists) => PickerState::Ready(lists),
                None => PickerState::Idle,
            };
            return None;
        }
        Some(self.start_load())
    }

    /// Hides the picker. The selection and the last loaded lists are kept; any
    /// in-flight load is superseded.
    pub fn close(&mut self) {
        let retained = match std::mem::replace(&mut self.state, PickerState::Closed { retained: None }) {
            PickerState::Ready(lists) => Some(lists),
            PickerState::Closed { retained } => retained,
            _ => None,
        };
        self.generation += 1;
        self.state = PickerState::Closed { retained };
        debug!("picker closed");
    }

    /// Starts a load for `object_api_name`, which must be the current object.
    pub fn begin_load(&mut self, object_api_name: &str) -> Result<LoadRequest, PickerError> {
        self.ensure_open()?;
        if object_api_name != self.current_object() {
            return Err(PickerError::InconsistentNavigation {
                object_api_name: object_api_name.to_string(),
                expected: self.current_object().to_string(),
            });
        }
        Ok(self.start_load())
    }

    /// Reloads the current object, e.g. to retry after a failure.
    pub fn reload(&mut self) -> Result<LoadRequest, PickerError> {
        self.ensure_open()?;
        Ok(self.start_load())
    }

    /// Applies the provider's answer for `request`.
    pub fn complete_load(&mut self, request: &LoadRequest, result: Result<Vec<RawField>>) -> LoadOutcome {
        let is_pending = matches!(&self.state, PickerState::Loading { request: pending } if pending == request);
        if !is_pending || request.generation() != self.generation {
            debug!(
                generation = request.generation(),
                latest = self.generation,
                object_api_name = request.object_api_name(),
                "dropping stale field load"
            );
            return LoadOutcome::Stale;
        }

        let object_api_name = request.object_api_name();
        let raw_fields = match result {
            Ok(raw_fields) => raw_fields,
            Err(error) => {
                let cause = format!("{error:#}");
                self.state = PickerState::Error {
                    object_api_name: object_api_name.to_string(),
                    cause: cause.clone(),
                };
                self.sink.report_error(ErrorReport {
                    operation: LOAD_FIELDS_OPERATION,
                    object_api_name: object_api_name.to_string(),
                    cause,
                });
                return LoadOutcome::Failed;
            }
        };

        let fields = raw_fields
            .into_iter()
            .filter_map(|raw| match Field::from_raw(raw) {
                Ok(field) => Some(field),
                Err(error) => {
                    warn!(object_api_name, %error, "skipping malformed field");
                    None
                }
            })
            .collect();
        let mut lists = FieldLists::partition(object_api_name, fields);
        self.filters.refresh(&lists.regular_fields);
        lists.displayed_fields = apply_pipeline(&lists.regular_fields, &self.filters, &self.search_term, self.sort.as_ref());
        info!(
            object_api_name,
            lookup_count = lists.lookup_fields.len(),
            regular_count = lists.regular_fields.len(),
            "fields loaded"
        );
        self.state = PickerState::Ready(lists);
        LoadOutcome::Applied
    }

    /// Fetches `request` from the provider and applies the answer.
    pub async fn run_load(&mut self, request: LoadRequest) -> LoadOutcome {
        let result = self.provider.get_fields(request.object_api_name()).await;
        self.complete_load(&request, result)
    }

    /// Loads the fields of `object_api_name`, which must be the current object.
    pub async fn load_fields(&mut self, object_api_name: &str) -> Result<LoadOutcome, PickerError> {
        let request = self.begin_load(object_api_name)?;
        Ok(self.run_load(request).await)
    }

    /// Follows `field` to the object it references.
    pub fn go_deeper(&mut self, field: &Field) -> Result<LoadRequest, PickerError> {
        if self.stack.is_at_max_depth() {
            let max_depth = self.stack.max_depth();
            warn!(max_depth, field = %field.api_name, "go deeper rejected at maximum depth");
            return Err(NavigationError::DepthExceeded { max_depth }.into());
        }
        let Some(target) = field.lookup.as_ref() else {
            return Err(PickerError::not_lookup(&field.api_name));
        };
        self.ensure_ready()?;

        self.stack.push(LookupStackEntry::from(target))?;
        self.clear_selection();
        Ok(self.start_load())
    }

    /// Returns to the hop at `index` (`-1` for the base object).
    ///
    /// Returns `None` when `index` already points at the current object.
    pub fn navigate_back(&mut self, index: isize) -> Result<Option<LoadRequest>, PickerError> {
        self.ensure_open()?;
        if self.stack.truncate_at(index)? == TruncateOutcome::Unchanged {
            return Ok(None);
        }
        self.clear_selection();
        self.emit_navigation(index);
        Ok(Some(self.start_load()))
    }

    pub fn go_back(&mut self) -> Result<Option<LoadRequest>, PickerError> {
        self.navigate_back(self.stack.previous_index())
    }

    /// Replaces the whole history. `object_api_name` must be the last entry's
    /// object, or the base object for an empty stack.
    pub fn navigate_to(&mut self, object_api_name: &str, lookup_stack: Vec<LookupStackEntry>) -> Result<LoadRequest, PickerError> {
        self.ensure_open()?;
        let expected = lookup_stack
            .last()
            .map(|entry| entry.object_api_name.clone())
            .unwrap_or_else(|| self.base_object.clone());
        if expected != object_api_name {
            warn!(object_api_name, %expected, "navigation target does not match stack");
            return Err(PickerError::InconsistentNavigation {
                object_api_name: object_api_name.to_string(),
                expected,
            });
        }
        self.stack.replace(lookup_stack)?;
        self.clear_selection();
        self.emit_navigation(self.stack.current_depth() as isize - 1);
        Ok(self.start_load())
    }

    /// Selects a field of the current object and records its path.
    pub fn select_field(&mut self, field: &Field) -> Result<&SelectedField, PickerError> {
        self.ensure_ready()?;
        if field.is_lookup() && !self.lookup_selection_allowed() {
            warn!(field = %field.api_name, "lookup selection rejected");
            return Err(PickerError::LookupSelectionDisabled {
                api_name: field.api_name.clone(),
            });
        }

        let selected = SelectedField {
            field: field.clone(),
            relationship_path: self.stack.build_path(&field.api_name),
        };
        info!(path = %selected.relationship_path, "field selected");
        self.sink.emit(PickerEvent::SelectionChanged(Some(selected.clone())));
        Ok(&*self.selected.insert(selected))
    }

    /// Toggles a filter option. Returns whether it is now selected.
    pub fn toggle_filter(&mut self, value: &DisplayType) -> Result<bool, PickerError> {
        let selected = self.filters.toggle(value)?;
        self.refresh_displayed();
        self.sink.emit(PickerEvent::FilterChanged(self.filters.options().to_vec()));
        Ok(selected)
    }

    /// Deselects every filter option. Returns whether anything changed.
    pub fn clear_filters(&mut self) -> Result<bool, PickerError> {
        let changed = self.filters.clear()?;
        if changed {
            self.refresh_displayed();
            self.sink.emit(PickerEvent::FilterChanged(self.filters.options().to_vec()));
        }
        Ok(changed)
    }

    pub fn set_sort(&mut self, rule: Option<SortRule>) {
        if self.sort == rule {
            return;
        }
        self.sort = rule;
        self.refresh_displayed();
        self.sink.emit(PickerEvent::SortChanged(rule));
    }

    /// Applies the sort option with catalog id `id`.
    pub fn select_sort_option(&mut self, id: &str) -> Result<(), PickerError> {
        let option = find_sort_option(id).ok_or_else(|| PickerError::UnknownSortOption { id: id.to_string() })?;
        self.set_sort(option.value);
        Ok(())
    }

    pub fn set_search_term(&mut self, search_term: impl Into<String>) {
        let search_term = search_term.into();
        if self.search_term == search_term {
            return;
        }
        self.search_term = search_term;
        self.refresh_displayed();
    }

    /// Switches to another base object and starts over: history, lists,
    /// selection, filters, sort and search are reset.
    ///
    /// Blank names fall back to the default base object. Returns a load
    /// request when the picker is open.
    pub fn change_base_object(&mut self, base_object: Option<&str>) -> Option<LoadRequest> {
        let base_object = normalize_base_object_name(base_object);
        info!(from = %self.base_object, to = %base_object, "base object changed");
        self.base_object = base_object;
        self.stack.reset();
        self.clear_selection();
        self.search_term.clear();
        self.filters = empty_filters(&self.config);
        self.filters.preselect(&self.config.initial_filter);
        self.sort = self.config.initial_sort;
        self.generation += 1;

        if self.state.is_closed() {
            self.state = PickerState::Closed { retained: None };
            return None;
        }
        Some(self.start_load())
    }

    pub(crate) fn sink(&self) -> &Arc<dyn EventSink> {
        &self.sink
    }

    fn lookup_selection_allowed(&self) -> bool {
        let allowed = self.filters.allowed_types();
        allowed.is_empty() || allowed.contains(&DisplayType::Reference)
    }

    fn ensure_open(&self) -> Result<(), PickerError> {
        if self.state.is_closed() {
            return Err(PickerError::NotReady { state: self.state.name() });
        }
        Ok(())
    }

    fn ensure_ready(&self) -> Result<(), PickerError> {
        match self.state {
            PickerState::Ready(_) => Ok(()),
            _ => Err(PickerError::NotReady { state: self.state.name() }),
        }
    }

    fn start_load(&mut self) -> LoadRequest {
        self.generation += 1;
        if let PickerState::Loading { request } = &self.state {
            debug!(superseded = request.generation(), "superseding pending field load");
        }
        let request = LoadRequest::new(self.generation, self.current_object());
        debug!(
            object_api_name = request.object_api_name(),
            generation = request.generation(),
            "field load started"
        );
        self.state = PickerState::Loading { request: request.clone() };
        request
    }

    fn clear_selection(&mut self) {
        if self.selected.take().is_some() {
            self.sink.emit(PickerEvent::SelectionChanged(None));
        }
    }

    fn refresh_displayed(&mut self) {
        if let PickerState::Ready(lists) = &mut self.state {
            lists.displayed_fields = apply_pipeline(&lists.regular_fields, &self.filters, &self.search_term, self.sort.as_ref());
        }
    }

    fn emit_navigation(&self, index: isize) {
        let event = match self.config.navigation_events {
            NavigationEventShape::Index => NavigationEvent::Index { index },
            NavigationEventShape::Stack => NavigationEvent::Stack {
                object_api_name: self.current_object().to_string(),
                lookup_stack: self.stack.snapshot(),
            },
        };
        self.sink.emit(PickerEvent::Navigation(event));
    }
}

fn empty_filters(config: &ResolvedPickerConfig) -> FilterSet {
    FilterSet::new(config.allowed_field_types.clone(), config.filter_selection, config.disabled_filter_order)
        .with_locked(config.user_filtering_disabled)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::NullSchemaProvider;
    use anyhow::anyhow;
    use fieldpath_types::{SortBy, SortDirection};

    fn raw(api_name: &str, label: &str, r#type: &str) -> RawField {
        RawField {
            api_name: api_name.into(),
            label: label.into(),
            r#type: r#type.into(),
            reference_to: None,
            relationship_name: None,
        }
    }

    fn raw_lookup(api_name: &str, label: &str, reference_to: &str, relationship_name: &str) -> RawField {
        RawField {
            reference_to: Some(reference_to.into()),
            relationship_name: Some(relationship_name.into()),
            ..raw(api_name, label, "REFERENCE")
        }
    }

    fn account_fields() -> Vec<RawField> {
        vec![
            raw("Name", "Account Name", "STRING"),
            raw("AnnualRevenue", "Annual Revenue", "CURRENCY"),
            raw_lookup("OwnerId", "Owner ID", "User", "Owner"),
        ]
    }

    fn controller_with(config: ResolvedPickerConfig) -> (FieldSelectionController, Arc<RecordingEventSink>) {
        let sink = Arc::new(RecordingEventSink::new());
        let controller = FieldSelectionController::new(config, Arc::new(NullSchemaProvider), sink.clone());
        (controller, sink)
    }

    fn ready_controller(config: ResolvedPickerConfig) -> (FieldSelectionController, Arc<RecordingEventSink>) {
        let (mut controller, sink) = controller_with(config);
        let request = controller.open().expect("initial load");
        assert_eq!(controller.complete_load(&request, Ok(account_fields())), LoadOutcome::Applied);
        (controller, sink)
    }

    #[test]
    fn open_loads_base_object_and_partitions_fields() {
        let (controller, _) = ready_controller(ResolvedPickerConfig::default());
        assert_eq!(controller.state().name(), "ready");
        assert_eq!(controller.lookup_fields().len(), 1);
        assert_eq!(controller.regular_fields().len(), 2);
        assert_eq!(controller.displayed_fields().len(), 2);
        assert!(controller.is_back_disabled());
        assert!(controller.is_select_disabled());
    }

    #[test]
    fn only_the_newest_request_is_applied() {
        let (mut controller, _) = controller_with(ResolvedPickerConfig::default());
        let first = controller.open().expect("load");
        let second = controller.reload().expect("reload");

        assert_eq!(controller.complete_load(&first, Ok(account_fields())), LoadOutcome::Stale);
        assert!(controller.is_loading());
        assert_eq!(controller.complete_load(&second, Ok(account_fields())), LoadOutcome::Applied);
        assert_eq!(controller.complete_load(&second, Ok(Vec::new())), LoadOutcome::Stale);
        assert_eq!(controller.regular_fields().len(), 2);
    }

    #[test]
    fn close_supersedes_in_flight_load() {
        let (mut controller, _) = controller_with(ResolvedPickerConfig::default());
        let request = controller.open().expect("load");
        controller.close();
        assert_eq!(controller.complete_load(&request, Ok(account_fields())), LoadOutcome::Stale);
        assert!(controller.state().is_closed());
    }

    #[test]
    fn reopening_with_selection_reuses_lists() {
        let (mut controller, _) = ready_controller(ResolvedPickerConfig::default());
        let name = controller.regular_fields()[0].clone();
        controller.select_field(&name).expect("select");
        controller.close();

        assert!(controller.open().is_none());
        assert_eq!(controller.state().name(), "ready");
        assert_eq!(controller.selected_field_path(), Some("Name"));
    }

    #[test]
    fn load_failure_is_reported_and_keeps_selection() {
        let (mut controller, sink) = ready_controller(ResolvedPickerConfig::default());
        let name = controller.regular_fields()[0].clone();
        controller.select_field(&name).expect("select");

        let request = controller.reload().expect("reload");
        let outcome = controller.complete_load(&request, Err(anyhow!("session expired")));
        assert_eq!(outcome, LoadOutcome::Failed);
        assert!(matches!(controller.state(), PickerState::Error { cause, .. } if cause == "session expired"));
        assert_eq!(controller.selected_field_path(), Some("Name"));

        let errors = sink.errors();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].operation, "loadFields");
        assert_eq!(errors[0].object_api_name, "Account");
    }

    #[test]
    fn selection_requires_loaded_fields() {
        let (mut controller, _) = controller_with(ResolvedPickerConfig::default());
        controller.open();
        let field = Field::regular("Name", "Account Name", DisplayType::String);
        assert!(matches!(controller.select_field(&field), Err(PickerError::NotReady { state: "loading" })));
        assert!(controller.selected_field().is_none());
    }

    #[test]
    fn lookup_selection_follows_allow_list() {
        let config = ResolvedPickerConfig {
            allowed_field_types: vec![DisplayType::String],
            ..ResolvedPickerConfig::default()
        };
        let (mut controller, _) = ready_controller(config);
        assert!(controller.is_lookup_selection_disabled());
        let owner = controller.lookup_fields()[0].clone();
        assert!(matches!(
            controller.select_field(&owner),
            Err(PickerError::LookupSelectionDisabled { .. })
        ));

        let (mut controller, _) = ready_controller(ResolvedPickerConfig::default());
        let owner = controller.lookup_fields()[0].clone();
        let selected = controller.select_field(&owner).expect("lookup selectable");
        assert_eq!(selected.relationship_path, "OwnerId");
    }

    #[test]
    fn go_deeper_rejects_regular_fields() {
        let (mut controller, _) = ready_controller(ResolvedPickerConfig::default());
        let name = controller.regular_fields()[0].clone();
        assert!(matches!(controller.go_deeper(&name), Err(PickerError::NotLookup { .. })));
        assert!(controller.navigation().is_empty());
    }

    #[test]
    fn navigate_to_requires_consistent_target() {
        let (mut controller, _) = ready_controller(ResolvedPickerConfig::default());
        let result = controller.navigate_to("Contact", vec![LookupStackEntry::new("Owner", "User")]);
        assert!(matches!(result, Err(PickerError::InconsistentNavigation { .. })));
        assert!(controller.navigation().is_empty());
        assert_eq!(controller.state().name(), "ready");
    }

    #[test]
    fn index_shaped_navigation_events() {
        let config = ResolvedPickerConfig {
            navigation_events: NavigationEventShape::Index,
            ..ResolvedPickerConfig::default()
        };
        let (mut controller, sink) = ready_controller(config);
        let owner = controller.lookup_fields()[0].clone();
        let request = controller.go_deeper(&owner).expect("deeper");
        controller.complete_load(&request, Ok(vec![raw("Email", "Email", "EMAIL")]));
        sink.take_events();

        controller.navigate_back(-1).expect("back").expect("reload base");
        assert!(controller.navigation().is_empty());
        assert_eq!(
            sink.take_events(),
            vec![PickerEvent::Navigation(NavigationEvent::Index { index: -1 })]
        );
    }

    #[test]
    fn sort_and_search_reshape_displayed_fields() {
        let (mut controller, sink) = ready_controller(ResolvedPickerConfig::default());
        controller.set_sort(Some(SortRule::new(SortBy::Field, SortDirection::Asc)));
        let labels: Vec<_> = controller.displayed_fields().iter().map(|f| f.label.as_str()).collect();
        assert_eq!(labels, vec!["Account Name", "Annual Revenue"]);

        controller.select_sort_option("Field - DESC").expect("catalog id");
        assert_eq!(controller.sort_option_id(), "Field - DESC");
        assert!(matches!(
            controller.select_sort_option("Label - ASC"),
            Err(PickerError::UnknownSortOption { .. })
        ));

        controller.set_search_term("revenue");
        assert_eq!(controller.displayed_fields().len(), 1);
        let parts = controller.label_parts(&controller.displayed_fields()[0].clone());
        assert_eq!(parts[1].text, "Revenue");
        assert!(parts[1].highlighted);

        let sort_events = sink
            .take_events()
            .into_iter()
            .filter(|event| matches!(event, PickerEvent::SortChanged(_)))
            .count();
        assert_eq!(sort_events, 2);
    }

    #[test]
    fn locked_filters_keep_initial_selection() {
        let config = ResolvedPickerConfig {
            initial_filter: vec![DisplayType::Currency],
            user_filtering_disabled: true,
            ..ResolvedPickerConfig::default()
        };
        let (mut controller, _) = ready_controller(config);
        assert!(controller.is_user_filtering_disabled());
        assert_eq!(controller.displayed_fields().len(), 1);
        assert!(matches!(controller.toggle_filter(&DisplayType::String), Err(PickerError::Filter(_))));
        assert!(matches!(controller.clear_filters(), Err(PickerError::Filter(_))));
        assert_eq!(controller.displayed_fields()[0].api_name, "AnnualRevenue");
    }

    #[test]
    fn initial_filter_outside_allow_list_is_reported() {
        let config = ResolvedPickerConfig {
            allowed_field_types: vec![DisplayType::String],
            initial_filter: vec![DisplayType::Email],
            ..ResolvedPickerConfig::default()
        };
        let (_, sink) = controller_with(config);
        let messages = sink.validation_errors();
        assert_eq!(messages.len(), 1);
        assert!(messages[0].contains("EMAIL"));
    }

    #[test]
    fn base_object_change_resets_everything() {
        let (mut controller, sink) = ready_controller(ResolvedPickerConfig::default());
        let owner = controller.lookup_fields()[0].clone();
        controller.go_deeper(&owner).expect("deeper");
        controller.set_search_term("mail");
        sink.take_events();

        let request = controller.change_base_object(Some("  ")).expect("open picker reloads");
        assert_eq!(request.object_api_name(), "Account");
        assert!(controller.navigation().is_empty());
        assert_eq!(controller.search_term(), "");

        controller.close();
        assert!(controller.change_base_object(Some("Contact")).is_none());
        assert_eq!(controller.current_object(), "Contact");
    }
}
