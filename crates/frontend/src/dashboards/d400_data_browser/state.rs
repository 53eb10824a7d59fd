//! State of the data browser page
//!
//! Plain data with the table, filter and pager operations. The page keeps one
//! [`BrowserState`] in an `RwSignal` and fetches whenever
//! [`BrowserState::search_key`] changes.

use std::collections::{BTreeMap, HashSet};

use contracts::dashboards::d400_data_browser::{
    cell_text, ExportQuery, FilterSet, Row, SearchQuery, SearchResponse, DEFAULT_PAGE_SIZE,
};
use contracts::enums::dataset_id::DatasetId;
use leptos::prelude::*;
use serde_json::Value;

use super::columns::{ColumnDefaults, ColumnWidth, MIN_COLUMN_WIDTH};
use crate::shared::pager::{self, PageItem};

/// Column/value pair being typed into the filter bar
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterDraft {
    pub column: String,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BrowserState {
    pub dataset: DatasetId,
    /// Discovered columns in discovery order
    pub columns: Vec<String>,
    pub visible_columns: Vec<String>,
    pub column_widths: BTreeMap<String, ColumnWidth>,
    /// Set once discovery for the current dataset finished, even when it failed
    pub columns_loaded: bool,
    pub filters: FilterSet,
    pub limit: usize,
    pub offset: usize,
    pub results: Vec<Row>,
    /// Matching rows; `None` when the database did not count them
    pub total_results: Option<u64>,
    /// (row index, column) of cells changed locally since the last fetch
    pub edited: HashSet<(usize, String)>,
    /// Bumped by "Refresh" to re-issue an unchanged search
    pub reload: u64,
}

impl Default for BrowserState {
    fn default() -> Self {
        Self {
            dataset: DatasetId::default(),
            columns: Vec::new(),
            visible_columns: Vec::new(),
            column_widths: BTreeMap::new(),
            columns_loaded: false,
            filters: FilterSet::new(),
            limit: DEFAULT_PAGE_SIZE,
            offset: 0,
            results: Vec::new(),
            total_results: None,
            edited: HashSet::new(),
            reload: 0,
        }
    }
}

impl BrowserState {
    pub fn new(dataset: DatasetId) -> Self {
        Self {
            dataset,
            ..Default::default()
        }
    }

    // ---- dataset & columns ----

    /// Switches the dataset. Filters, offset and widths are cleared at once;
    /// columns are rediscovered afterwards.
    pub fn select_dataset(&mut self, dataset: DatasetId) {
        self.dataset = dataset;
        self.filters.clear();
        self.offset = 0;
        self.column_widths.clear();
        self.columns.clear();
        self.visible_columns.clear();
        self.columns_loaded = false;
        self.edited.clear();
    }

    /// Result of column discovery; an empty list when discovery failed
    pub fn apply_columns(&mut self, discovered: Vec<String>, defaults: &ColumnDefaults) {
        self.visible_columns = defaults.visible_for(self.dataset, &discovered);
        self.columns = discovered;
        self.columns_loaded = true;
    }

    pub fn is_visible(&self, column: &str) -> bool {
        self.visible_columns.iter().any(|c| c == column)
    }

    /// Appends a hidden column or removes a visible one. Unknown columns are ignored.
    pub fn toggle_column(&mut self, column: &str) {
        if !self.columns.iter().any(|c| c == column) {
            return;
        }
        match self.visible_columns.iter().position(|c| c == column) {
            Some(index) => {
                self.visible_columns.remove(index);
            }
            None => self.visible_columns.push(column.to_string()),
        }
    }

    /// Moves a visible column to `index` (clamped to the end)
    pub fn move_column(&mut self, column: &str, index: usize) {
        let Some(from) = self.visible_columns.iter().position(|c| c == column) else {
            return;
        };
        let moved = self.visible_columns.remove(from);
        let to = index.min(self.visible_columns.len());
        self.visible_columns.insert(to, moved);
    }

    /// Records a resize; widths of 100px and below are rejected
    pub fn set_column_width(&mut self, column: &str, px: u32) -> bool {
        if px <= MIN_COLUMN_WIDTH || !self.columns.iter().any(|c| c == column) {
            return false;
        }
        self.column_widths
            .insert(column.to_string(), ColumnWidth::Px(px));
        true
    }

    pub fn column_width(&self, column: &str) -> ColumnWidth {
        self.column_widths
            .get(column)
            .copied()
            .unwrap_or(ColumnWidth::Auto)
    }

    // ---- filters ----

    /// Adds or overwrites a constraint; ignored when column or value is empty
    pub fn add_filter(&mut self, column: &str, value: &str) -> bool {
        if column.is_empty() || value.is_empty() {
            return false;
        }
        self.filters.insert(column, value);
        self.offset = 0;
        true
    }

    /// [`Self::add_filter`] from the filter bar; clears the draft when applied
    pub fn submit_draft(&mut self, draft: &mut FilterDraft) -> bool {
        let added = self.add_filter(&draft.column, &draft.value);
        if added {
            *draft = FilterDraft::default();
        }
        added
    }

    pub fn remove_filter(&mut self, column: &str) {
        self.filters.remove(column);
        self.offset = 0;
    }

    // ---- pager ----

    pub fn current_page(&self) -> usize {
        pager::current_page(self.offset, self.limit)
    }

    pub fn total_pages(&self) -> usize {
        match self.total_results {
            Some(total) => pager::total_pages(total, self.limit),
            None => pager::open_ended_pages(self.current_page(), self.results.len(), self.limit),
        }
    }

    /// "1234 results", or "150+ results" while more pages may follow an uncounted page
    pub fn count_label(&self) -> String {
        match self.total_results {
            Some(total) => format!("{} results", total),
            None => {
                let seen = self.offset + self.results.len();
                if self.results.len() >= self.limit {
                    format!("{}+ results", seen)
                } else {
                    format!("{} results", seen)
                }
            }
        }
    }

    pub fn page_items(&self) -> Vec<PageItem> {
        pager::page_items(self.current_page(), self.total_pages())
    }

    pub fn set_limit(&mut self, limit: usize) {
        if limit == 0 {
            return;
        }
        self.limit = limit;
        self.offset = 0;
    }

    pub fn next_page(&mut self) {
        if self.current_page() < self.total_pages() {
            self.offset += self.limit;
        }
    }

    pub fn prev_page(&mut self) {
        if self.current_page() > 1 {
            self.offset = self.offset.saturating_sub(self.limit);
        }
    }

    pub fn go_to_page(&mut self, page: usize) {
        if page >= 1 && page <= self.total_pages() {
            self.offset = (page - 1) * self.limit;
        }
    }

    // ---- results & edits ----

    /// Applies a fetched page. Local edits are discarded.
    pub fn apply_results(&mut self, response: SearchResponse) {
        self.results = response.results;
        self.total_results = response.total_results;
        self.edited.clear();

        if self.column_widths.is_empty() && !self.results.is_empty() {
            for column in &self.visible_columns {
                self.column_widths
                    .insert(column.clone(), ColumnWidth::Auto);
            }
        }
    }

    /// Local-only cell edit; the value is trimmed. Returns whether the cell changed.
    pub fn handle_edit(&mut self, row: usize, column: &str, value: &str) -> bool {
        let value = value.trim();
        let Some(record) = self.results.get_mut(row) else {
            return false;
        };
        if cell_text(record, column) == value {
            return false;
        }
        record.insert(column.to_string(), Value::String(value.to_string()));
        self.edited.insert((row, column.to_string()));
        true
    }

    pub fn is_edited(&self, row: usize, column: &str) -> bool {
        self.edited.contains(&(row, column.to_string()))
    }

    // ---- requests ----

    /// Search to run, or `None` while columns are still being discovered
    pub fn search_key(&self) -> Option<(SearchQuery, u64)> {
        self.columns_loaded.then(|| {
            (
                SearchQuery::new(self.dataset, &self.filters, self.limit, self.offset),
                self.reload,
            )
        })
    }

    pub fn export_query(&self) -> ExportQuery {
        ExportQuery::new(self.dataset, &self.filters, &self.visible_columns)
    }
}

pub fn create_state(dataset: DatasetId) -> RwSignal<BrowserState> {
    RwSignal::new(BrowserState::new(dataset))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    fn loaded() -> BrowserState {
        let mut state = BrowserState::new(DatasetId::Usa);
        state.apply_columns(
            names(&["Full name", "Job title", "Emails", "Phone numbers", "City"]),
            &ColumnDefaults::builtin(),
        );
        state
    }

    fn rows(count: usize) -> Vec<Row> {
        (0..count)
            .map(|i| {
                serde_json::from_value(json!({ "Full name": format!("P{}", i), "City": "Oslo" }))
                    .unwrap()
            })
            .collect()
    }

    #[test]
    fn test_dataset_change_clears_filters_offset_and_widths_at_once() {
        let mut state = loaded();
        state.add_filter("City", "Oslo");
        state.total_results = Some(500);
        state.go_to_page(3);
        state.set_column_width("City", 180);

        state.select_dataset(DatasetId::Pdl);

        assert!(state.filters.is_empty());
        assert_eq!(state.offset, 0);
        assert!(state.column_widths.is_empty());
        assert!(!state.columns_loaded);
        assert!(state.search_key().is_none());
    }

    #[test]
    fn test_apply_columns_uses_defaults() {
        let state = loaded();
        assert_eq!(
            state.visible_columns,
            names(&["Full name", "Job title", "Emails", "Phone numbers"])
        );
        assert!(state.search_key().is_some());
    }

    #[test]
    fn test_toggle_twice_restores_order_without_duplicates() {
        let mut state = loaded();
        let before = state.visible_columns.clone();

        state.toggle_column("City");
        assert_eq!(state.visible_columns.last().map(String::as_str), Some("City"));
        state.toggle_column("City");
        assert_eq!(state.visible_columns, before);

        state.toggle_column("Job title");
        state.toggle_column("Job title");
        assert_eq!(
            state.visible_columns,
            names(&["Full name", "Emails", "Phone numbers", "Job title"])
        );
        assert_eq!(
            state.visible_columns.iter().filter(|c| *c == "Job title").count(),
            1
        );
    }

    #[test]
    fn test_toggle_unknown_column_is_ignored() {
        let mut state = loaded();
        let before = state.visible_columns.clone();
        state.toggle_column("Salary");
        assert_eq!(state.visible_columns, before);
    }

    #[test]
    fn test_move_column() {
        let mut state = loaded();
        state.move_column("Phone numbers", 0);
        assert_eq!(state.visible_columns[0], "Phone numbers");
        state.move_column("Phone numbers", 99);
        assert_eq!(state.visible_columns.last().unwrap(), "Phone numbers");
        state.move_column("City", 0);
        assert_eq!(state.visible_columns.len(), 4);
    }

    #[test]
    fn test_width_must_exceed_minimum() {
        let mut state = loaded();
        assert!(!state.set_column_width("City", 100));
        assert!(state.set_column_width("City", 101));
        assert_eq!(state.column_width("City"), ColumnWidth::Px(101));
        assert!(!state.set_column_width("Salary", 300));
        assert_eq!(state.column_width("Emails"), ColumnWidth::Auto);
    }

    #[test]
    fn test_add_then_remove_filter_restores_set() {
        let mut state = loaded();
        state.add_filter("Job title", "CTO");
        let before = state.filters.clone();
        state.total_results = Some(1000);
        state.go_to_page(4);

        assert!(state.add_filter("City", "Oslo"));
        assert_eq!(state.offset, 0);

        state.go_to_page(2);
        state.remove_filter("City");
        assert_eq!(state.offset, 0);
        assert_eq!(state.filters, before);
    }

    #[test]
    fn test_empty_filter_parts_are_ignored() {
        let mut state = loaded();
        state.total_results = Some(1000);
        state.go_to_page(3);

        assert!(!state.add_filter("", "x"));
        assert!(!state.add_filter("City", ""));
        assert!(state.filters.is_empty());
        assert_eq!(state.offset, 100);
    }

    #[test]
    fn test_readding_filter_overwrites_in_place() {
        let mut state = loaded();
        state.add_filter("City", "Oslo");
        state.add_filter("Job title", "CTO");
        state.add_filter("City", "Bergen");

        let entries: Vec<_> = state.filters.iter().collect();
        assert_eq!(entries, vec![("City", "Bergen"), ("Job title", "CTO")]);
    }

    #[test]
    fn test_submit_draft_clears_only_when_applied() {
        let mut state = loaded();
        let mut draft = FilterDraft {
            column: "City".into(),
            value: String::new(),
        };
        assert!(!state.submit_draft(&mut draft));
        assert_eq!(draft.column, "City");

        draft.value = "Oslo".into();
        assert!(state.submit_draft(&mut draft));
        assert_eq!(draft, FilterDraft::default());
    }

    #[test]
    fn test_pager_bounds() {
        let mut state = loaded();
        state.total_results = Some(120);

        state.prev_page();
        assert_eq!(state.offset, 0);

        state.next_page();
        state.next_page();
        assert_eq!(state.current_page(), 3);
        state.next_page();
        assert_eq!(state.current_page(), 3);

        state.go_to_page(0);
        state.go_to_page(4);
        assert_eq!(state.current_page(), 3);

        state.go_to_page(1);
        assert_eq!(state.offset, 0);
    }

    #[test]
    fn test_uncounted_full_page_allows_next() {
        let mut state = loaded();
        state.set_limit(25);
        state.apply_results(SearchResponse {
            results: rows(25),
            total_results: None,
        });
        assert_eq!(state.total_pages(), 2);
        assert_eq!(state.count_label(), "25+ results");

        state.next_page();
        assert_eq!(state.current_page(), 2);

        state.apply_results(SearchResponse {
            results: rows(7),
            total_results: None,
        });
        assert_eq!(state.total_pages(), 2);
        assert_eq!(state.count_label(), "32 results");
        state.next_page();
        assert_eq!(state.current_page(), 2);

        state.prev_page();
        assert_eq!(state.current_page(), 1);
    }

    #[test]
    fn test_counted_total_wins_over_page_fill() {
        let mut state = loaded();
        state.set_limit(25);
        state.apply_results(SearchResponse {
            results: rows(25),
            total_results: Some(25),
        });
        assert_eq!(state.total_pages(), 1);
        assert_eq!(state.count_label(), "25 results");
        state.next_page();
        assert_eq!(state.current_page(), 1);
    }

    #[test]
    fn test_limit_change_resets_offset() {
        let mut state = loaded();
        state.total_results = Some(1000);
        state.go_to_page(5);
        state.set_limit(200);
        assert_eq!(state.limit, 200);
        assert_eq!(state.offset, 0);

        state.set_limit(0);
        assert_eq!(state.limit, 200);
    }

    #[test]
    fn test_first_results_give_visible_columns_auto_width() {
        let mut state = loaded();
        state.apply_results(SearchResponse {
            results: Vec::new(),
            total_results: Some(0),
        });
        assert!(state.column_widths.is_empty());

        state.apply_results(SearchResponse {
            results: rows(2),
            total_results: Some(2),
        });
        assert_eq!(state.column_widths.len(), 4);
        assert!(state
            .column_widths
            .values()
            .all(|w| *w == ColumnWidth::Auto));
    }

    #[test]
    fn test_edit_is_local_and_dropped_by_next_fetch() {
        let mut state = loaded();
        state.apply_results(SearchResponse {
            results: rows(3),
            total_results: Some(3),
        });

        assert!(state.handle_edit(1, "City", "  Bergen "));
        assert_eq!(cell_text(&state.results[1], "City"), "Bergen");
        assert!(state.is_edited(1, "City"));
        assert!(!state.handle_edit(1, "City", "Bergen"));
        assert!(!state.handle_edit(9, "City", "x"));

        state.apply_results(SearchResponse {
            results: rows(3),
            total_results: Some(3),
        });
        assert!(!state.is_edited(1, "City"));
        assert_eq!(cell_text(&state.results[1], "City"), "Oslo");
    }

    #[test]
    fn test_requests_reflect_state() {
        let mut state = loaded();
        state.add_filter("City", "Oslo");
        state.set_limit(25);

        let (search, _) = state.search_key().unwrap();
        assert_eq!(search.table_name, "usa");
        assert_eq!(search.limit, 25);
        assert_eq!(search.filters.as_deref(), Some(r#"{"City":"Oslo"}"#));

        let export = state.export_query();
        assert_eq!(export.columns, state.visible_columns);
        assert_eq!(export.filters.get("City"), Some("Oslo"));
    }

    #[test]
    fn test_reload_changes_search_key() {
        let mut state = loaded();
        let before = state.search_key();
        state.reload += 1;
        assert_ne!(state.search_key(), before);
    }
}
