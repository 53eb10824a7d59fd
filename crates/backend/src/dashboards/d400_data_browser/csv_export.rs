use contracts::dashboards::d400_data_browser::{cell_text, ExportQuery};

use super::service::parse_dataset;
use crate::shared::config::ExportConfig;
use crate::shared::error::DashboardError;
use crate::shared::gateway::{DataGateway, TableSearch};

/// Build a CSV document of every row matching the export filters.
///
/// Pages through the search RPC with `page_size` rows per call until a short
/// page, the reported total or `max_rows`. The header is the requested column list, or the keys of the
/// first row when no columns were requested.
pub async fn export_csv(
    gateway: &dyn DataGateway,
    export: &ExportQuery,
    settings: &ExportConfig,
) -> Result<Vec<u8>, DashboardError> {
    let dataset = parse_dataset(&export.table_name)?;
    let page_size = settings.page_size.max(1);

    let mut rows = Vec::new();
    let mut offset = 0;
    while rows.len() < settings.max_rows {
        let limit = page_size.min(settings.max_rows - rows.len());
        let search = TableSearch {
            table: dataset,
            filters: export.filters.clone(),
            limit,
            offset,
        };
        let page = gateway.search_table(&search).await.map_err(|e| {
            tracing::error!("Export of {} failed at offset {}: {}", dataset, offset, e);
            DashboardError::Remote("Failed to export data".to_string())
        })?;

        let fetched = page.rows.len();
        rows.extend(page.rows);
        offset += fetched;

        if fetched < limit || page.total.is_some_and(|total| offset as u64 >= total) {
            break;
        }
    }

    if rows.len() >= settings.max_rows {
        tracing::warn!("Export of {} truncated at {} rows", dataset, settings.max_rows);
    }

    let columns: Vec<String> = if export.columns.is_empty() {
        rows.first()
            .map(|row| row.keys().cloned().collect())
            .unwrap_or_default()
    } else {
        export.columns.clone()
    };

    let mut writer = csv::Writer::from_writer(Vec::new());
    let to_remote = |e: csv::Error| DashboardError::Remote(format!("CSV write failed: {}", e));
    if !columns.is_empty() {
        writer.write_record(&columns).map_err(to_remote)?;
    }
    for row in &rows {
        writer
            .write_record(columns.iter().map(|c| cell_text(row, c)))
            .map_err(to_remote)?;
    }

    tracing::info!("Exported {} rows of {}", rows.len(), dataset);

    writer
        .into_inner()
        .map_err(|e| DashboardError::Remote(format!("CSV flush failed: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::gateway::fake::FakeGateway;
    use contracts::dashboards::d400_data_browser::FilterSet;
    use serde_json::json;

    fn gateway(count: usize) -> FakeGateway {
        let rows = (0..count)
            .map(|i| {
                serde_json::from_value(json!({
                    "full_name": format!("Name {}", i),
                    "email": format!("n{}@example.com", i),
                    "job_title": if i == 0 { "CEO, founder" } else { "Staff" },
                }))
                .unwrap()
            })
            .collect();
        FakeGateway::with_rows(rows)
    }

    fn export(columns: &[&str]) -> ExportQuery {
        ExportQuery {
            table_name: "otc".into(),
            filters: FilterSet::default(),
            columns: columns.iter().map(|c| c.to_string()).collect(),
        }
    }

    #[tokio::test]
    async fn test_writes_requested_columns_in_order() {
        let gateway = gateway(2);
        let settings = ExportConfig {
            page_size: 10,
            max_rows: 100,
        };

        let bytes = export_csv(&gateway, &export(&["job_title", "full_name"]), &settings)
            .await
            .unwrap();
        let text = String::from_utf8(bytes).unwrap();

        assert_eq!(
            text,
            "job_title,full_name\n\"CEO, founder\",Name 0\nStaff,Name 1\n"
        );
    }

    #[tokio::test]
    async fn test_pages_until_exhausted() {
        let gateway = gateway(5);
        let settings = ExportConfig {
            page_size: 2,
            max_rows: 100,
        };

        let bytes = export_csv(&gateway, &export(&["email"]), &settings)
            .await
            .unwrap();
        let lines = String::from_utf8(bytes).unwrap().lines().count();

        assert_eq!(lines, 6);
        assert_eq!(
            gateway.recorded(),
            vec!["search:otc:2:0", "search:otc:2:2", "search:otc:2:4"]
        );
    }

    #[tokio::test]
    async fn test_pages_without_reported_total() {
        let mut gateway = gateway(5);
        gateway.hide_total = true;
        let settings = ExportConfig {
            page_size: 2,
            max_rows: 100,
        };

        let bytes = export_csv(&gateway, &export(&["email"]), &settings)
            .await
            .unwrap();
        let lines = String::from_utf8(bytes).unwrap().lines().count();

        assert_eq!(lines, 6);
        assert_eq!(
            gateway.recorded(),
            vec!["search:otc:2:0", "search:otc:2:2", "search:otc:2:4"]
        );
    }

    #[tokio::test]
    async fn test_exact_multiple_without_total_ends_on_empty_page() {
        let mut gateway = gateway(4);
        gateway.hide_total = true;
        let settings = ExportConfig {
            page_size: 2,
            max_rows: 100,
        };

        let bytes = export_csv(&gateway, &export(&["email"]), &settings)
            .await
            .unwrap();

        assert_eq!(String::from_utf8(bytes).unwrap().lines().count(), 5);
        assert_eq!(
            gateway.recorded(),
            vec!["search:otc:2:0", "search:otc:2:2", "search:otc:2:4"]
        );
    }

    #[tokio::test]
    async fn test_stops_at_max_rows() {
        let gateway = gateway(10);
        let settings = ExportConfig {
            page_size: 4,
            max_rows: 6,
        };

        let bytes = export_csv(&gateway, &export(&["email"]), &settings)
            .await
            .unwrap();
        let lines = String::from_utf8(bytes).unwrap().lines().count();

        assert_eq!(lines, 7);
        assert_eq!(gateway.recorded(), vec!["search:otc:4:0", "search:otc:2:4"]);
    }

    #[tokio::test]
    async fn test_header_from_first_row_when_no_columns() {
        let gateway = gateway(1);
        let bytes = export_csv(&gateway, &export(&[]), &ExportConfig::default())
            .await
            .unwrap();
        let text = String::from_utf8(bytes).unwrap();

        let mut header: Vec<&str> = text.lines().next().unwrap().split(',').collect();
        header.sort();
        assert_eq!(header, vec!["email", "full_name", "job_title"]);
    }
}
