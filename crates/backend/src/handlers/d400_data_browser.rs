use axum::extract::{Query, RawQuery, State};
use axum::http::header;
use axum::response::{IntoResponse, Response};
use axum::Json;
use contracts::dashboards::d400_data_browser::{
    ColumnsQuery, ColumnsResponse, ExportQuery, SearchQuery, SearchResponse, EXPORT_FILE_NAME,
};

use crate::dashboards::d400_data_browser::{csv_export, service};
use crate::shared::app_state::AppState;
use crate::shared::error::DashboardError;

/// GET /api/people/columns
pub async fn columns(
    State(state): State<AppState>,
    Query(query): Query<ColumnsQuery>,
) -> Result<Json<ColumnsResponse>, DashboardError> {
    let columns = service::list_columns(state.data.as_ref(), &query.table_name).await?;
    Ok(Json(ColumnsResponse { columns }))
}

/// GET /api/people/search
pub async fn search(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> Result<Json<SearchResponse>, DashboardError> {
    let response = service::search(state.data.as_ref(), &query).await?;
    Ok(Json(response))
}

/// GET /api/people/export, answers a CSV attachment
pub async fn export(
    State(state): State<AppState>,
    RawQuery(raw): RawQuery,
) -> Result<Response, DashboardError> {
    let export = ExportQuery::from_query_str(raw.as_deref().unwrap_or_default())
        .map_err(DashboardError::Validation)?;

    let body = csv_export::export_csv(state.data.as_ref(), &export, &state.config.export).await?;

    Ok((
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", EXPORT_FILE_NAME),
            ),
        ],
        body,
    )
        .into_response())
}
