use contracts::dashboards::d400_data_browser::{
    ColumnsQuery, ColumnsResponse, ExportQuery, SearchQuery, SearchResponse, COLUMNS_PATH,
    EXPORT_FILE_NAME, SEARCH_PATH,
};
use contracts::enums::dataset_id::DatasetId;

use crate::shared::export::{download_bytes, CSV_MIME};
use crate::system::auth::api::{fetch_bytes_with_auth, fetch_with_auth};

fn with_query<Q: serde::Serialize>(path: &str, query: &Q) -> Result<String, String> {
    let qs = serde_qs::to_string(query).map_err(|e| format!("Failed to encode query: {}", e))?;
    Ok(format!("{}?{}", path, qs))
}

/// Column names of a dataset in discovery order
pub async fn fetch_columns(dataset: DatasetId) -> Result<Vec<String>, String> {
    let url = with_query(COLUMNS_PATH, &ColumnsQuery::new(dataset))?;
    let response: ColumnsResponse = fetch_with_auth(&url).await?;
    Ok(response.columns)
}

pub async fn fetch_search(query: &SearchQuery) -> Result<SearchResponse, String> {
    let url = with_query(SEARCH_PATH, query)?;
    fetch_with_auth(&url).await
}

/// Fetches the CSV with the stored session and hands it to the browser as a download
pub async fn download_export(export: &ExportQuery) -> Result<(), String> {
    let bytes = fetch_bytes_with_auth(&export.url()).await?;
    download_bytes(&bytes, EXPORT_FILE_NAME, CSV_MIME)
}
