use contracts::dashboards::d400_data_browser::{FilterSet, SearchQuery, SearchResponse};
use contracts::enums::dataset_id::DatasetId;

use crate::shared::error::DashboardError;
use crate::shared::gateway::{DataGateway, TableSearch};

/// Resolve a `table_name` parameter to a known dataset
pub fn parse_dataset(table_name: &str) -> Result<DatasetId, DashboardError> {
    DatasetId::from_code(table_name)
        .ok_or_else(|| DashboardError::Validation(format!("Unknown table: {}", table_name)))
}

pub fn parse_filters(query: &SearchQuery) -> Result<FilterSet, DashboardError> {
    query
        .filter_set()
        .map_err(|e| DashboardError::Validation(format!("Invalid filters: {}", e)))
}

/// Column names of a dataset in discovery order
pub async fn list_columns(
    gateway: &dyn DataGateway,
    table_name: &str,
) -> Result<Vec<String>, DashboardError> {
    let dataset = parse_dataset(table_name)?;
    gateway.table_columns(dataset).await.map_err(|e| {
        tracing::error!("Error fetching columns for {}: {}", dataset, e);
        DashboardError::Remote("Failed to fetch columns".to_string())
    })
}

/// One page of filtered rows plus the total match count when known
pub async fn search(
    gateway: &dyn DataGateway,
    query: &SearchQuery,
) -> Result<SearchResponse, DashboardError> {
    let search = TableSearch {
        table: parse_dataset(&query.table_name)?,
        filters: parse_filters(query)?,
        limit: query.effective_limit(),
        offset: query.offset,
    };

    tracing::debug!(
        "search {} limit={} offset={} filters={}",
        search.table,
        search.limit,
        search.offset,
        search.filters.len()
    );

    let page = gateway.search_table(&search).await.map_err(|e| {
        tracing::error!("Error fetching data for {}: {}", search.table, e);
        DashboardError::Remote("Failed to fetch data".to_string())
    })?;

    Ok(SearchResponse {
        results: page.rows,
        total_results: page.total,
    })
}
