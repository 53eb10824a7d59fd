//! Wire types of the data browser dashboard (D400)
//!
//! The frontend builds these requests from its table/filter/pager state and the
//! backend forwards them to the hosted gateway RPCs.

mod filter_set;

pub use filter_set::FilterSet;

use crate::enums::dataset_id::DatasetId;
use serde::{Deserialize, Serialize};

pub const COLUMNS_PATH: &str = "/api/people/columns";
pub const SEARCH_PATH: &str = "/api/people/search";
pub const EXPORT_PATH: &str = "/api/people/export";

pub const DEFAULT_PAGE_SIZE: usize = 50;
pub const EXPORT_FILE_NAME: &str = "people_export.csv";

/// One record returned by the gateway, column name -> scalar value
pub type Row = serde_json::Map<String, serde_json::Value>;

/// Display text of a cell; missing and null values render empty
pub fn cell_text(row: &Row, column: &str) -> String {
    match row.get(column) {
        None | Some(serde_json::Value::Null) => String::new(),
        Some(serde_json::Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

fn default_table_name() -> String {
    DatasetId::default().code().to_string()
}

fn default_limit() -> usize {
    DEFAULT_PAGE_SIZE
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnsQuery {
    #[serde(default = "default_table_name")]
    pub table_name: String,
}

impl ColumnsQuery {
    pub fn new(dataset: DatasetId) -> Self {
        Self {
            table_name: dataset.code().to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnsResponse {
    pub columns: Vec<String>,
}

/// Query string of the search endpoint. `filters` travels as a JSON object string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchQuery {
    #[serde(default = "default_table_name")]
    pub table_name: String,
    #[serde(default = "default_limit")]
    pub limit: usize,
    #[serde(default)]
    pub offset: usize,
    #[serde(default)]
    pub filters: Option<String>,
}

impl SearchQuery {
    pub fn new(dataset: DatasetId, filters: &FilterSet, limit: usize, offset: usize) -> Self {
        Self {
            table_name: dataset.code().to_string(),
            limit,
            offset,
            filters: Some(filters.to_json()),
        }
    }

    /// Zero means "not given", like a missing parameter
    pub fn effective_limit(&self) -> usize {
        if self.limit == 0 {
            DEFAULT_PAGE_SIZE
        } else {
            self.limit
        }
    }

    pub fn filter_set(&self) -> Result<FilterSet, serde_json::Error> {
        match self.filters.as_deref() {
            None | Some("") => Ok(FilterSet::default()),
            Some(raw) => FilterSet::from_json(raw),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResponse {
    pub results: Vec<Row>,
    /// `None` when the database did not report a count
    #[serde(default)]
    pub total_results: Option<u64>,
}

/// Export request. Columns are sent as repeated `columns=` parameters.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ExportQuery {
    pub table_name: String,
    pub filters: FilterSet,
    pub columns: Vec<String>,
}

impl ExportQuery {
    pub fn new(dataset: DatasetId, filters: &FilterSet, columns: &[String]) -> Self {
        Self {
            table_name: dataset.code().to_string(),
            filters: filters.clone(),
            columns: columns.to_vec(),
        }
    }

    pub fn to_query_string(&self) -> String {
        let mut parts = vec![
            format!("table_name={}", urlencoding::encode(&self.table_name)),
            format!("filters={}", urlencoding::encode(&self.filters.to_json())),
        ];
        for column in &self.columns {
            parts.push(format!("columns={}", urlencoding::encode(column)));
        }
        parts.join("&")
    }

    /// Parses a raw `application/x-www-form-urlencoded` query string.
    /// Unknown parameters are ignored.
    pub fn from_query_str(query: &str) -> Result<Self, String> {
        let mut export = ExportQuery {
            table_name: default_table_name(),
            ..Default::default()
        };

        for (key, value) in form_urlencoded::parse(query.as_bytes()) {
            if value.is_empty() {
                continue;
            }
            match key.as_ref() {
                "table_name" => export.table_name = value.into_owned(),
                "filters" => {
                    export.filters = FilterSet::from_json(&value)
                        .map_err(|e| format!("Invalid filters: {}", e))?;
                }
                "columns" => export.columns.push(value.into_owned()),
                _ => {}
            }
        }

        Ok(export)
    }

    pub fn url(&self) -> String {
        format!("{}?{}", EXPORT_PATH, self.to_query_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn cell_text_renders_scalars() {
        let row: Row = serde_json::from_value(json!({
            "name": "Ada",
            "age": 36,
            "email": null
        }))
        .unwrap();

        assert_eq!(cell_text(&row, "name"), "Ada");
        assert_eq!(cell_text(&row, "age"), "36");
        assert_eq!(cell_text(&row, "email"), "");
        assert_eq!(cell_text(&row, "missing"), "");
    }

    #[test]
    fn search_query_defaults_match_missing_parameters() {
        let query: SearchQuery = serde_json::from_value(json!({})).unwrap();
        assert_eq!(query.table_name, "usa");
        assert_eq!(query.limit, 50);
        assert_eq!(query.offset, 0);
        assert!(query.filter_set().unwrap().is_empty());

        let zero = SearchQuery {
            limit: 0,
            ..query
        };
        assert_eq!(zero.effective_limit(), 50);
    }

    #[test]
    fn search_query_carries_filters_as_json() {
        let mut filters = FilterSet::default();
        filters.insert("Job title", "engineer");
        let query = SearchQuery::new(DatasetId::Usa, &filters, 25, 50);

        assert_eq!(query.filters.as_deref(), Some(r#"{"Job title":"engineer"}"#));
        assert_eq!(query.filter_set().unwrap(), filters);
    }

    #[test]
    fn export_query_uses_repeated_columns() {
        let mut filters = FilterSet::default();
        filters.insert("email", "@acme.com");
        let columns = vec!["Full name".to_string(), "Emails".to_string()];
        let export = ExportQuery::new(DatasetId::Usa, &filters, &columns);

        let qs = export.to_query_string();
        assert!(qs.starts_with("table_name=usa&filters="));
        assert!(qs.ends_with("&columns=Full%20name&columns=Emails"));

        let parsed = ExportQuery::from_query_str(&qs).unwrap();
        assert_eq!(parsed, export);
    }

    #[test]
    fn export_query_accepts_plus_as_space_and_defaults_table() {
        let parsed = ExportQuery::from_query_str("columns=Job+title&unknown=1").unwrap();
        assert_eq!(parsed.table_name, "usa");
        assert_eq!(parsed.columns, vec!["Job title".to_string()]);
        assert!(parsed.filters.is_empty());

        assert!(ExportQuery::from_query_str("filters=%5Bnot-an-object").is_err());
    }

    #[test]
    fn export_query_decodes_escaped_separators() {
        let parsed = ExportQuery::from_query_str(
            "table_name=pdl&filters=%7B%22name%22%3A%22a%26b%3Dc%22%7D&columns=R%26D&&columns=",
        )
        .unwrap();
        assert_eq!(parsed.table_name, "pdl");
        assert_eq!(parsed.filters.get("name"), Some("a&b=c"));
        assert_eq!(parsed.columns, vec!["R&D".to_string()]);
    }

    #[test]
    fn search_response_without_count_has_unknown_total() {
        let response: SearchResponse = serde_json::from_value(json!({ "results": [] })).unwrap();
        assert_eq!(response.total_results, None);
    }
}
