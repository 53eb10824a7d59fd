//! Default visible columns and column widths

use contracts::enums::dataset_id::DatasetId;

/// Columns shown when a dataset has no default entry
const FALLBACK_COLUMN_COUNT: usize = 5;

/// Narrowest width a resize may set, exclusive
pub const MIN_COLUMN_WIDTH: u32 = 100;

/// Per-dataset default visible columns
#[derive(Debug, Clone, Default)]
pub struct ColumnDefaults {
    entries: Vec<(DatasetId, Vec<&'static str>)>,
}

impl ColumnDefaults {
    pub fn builtin() -> Self {
        Self {
            entries: vec![
                (
                    DatasetId::Apo,
                    vec!["person_name", "person_title", "person_email", "person_phone"],
                ),
                (
                    DatasetId::Pdl,
                    vec!["name", "phone_number", "email", "linkedin_url"],
                ),
                (
                    DatasetId::Usa,
                    vec!["Full name", "Job title", "Emails", "Phone numbers"],
                ),
                (
                    DatasetId::Otc,
                    vec!["full_name", "job_title", "email", "phone_number"],
                ),
            ],
        }
    }

    pub fn get(&self, dataset: DatasetId) -> Option<&[&'static str]> {
        self.entries
            .iter()
            .find(|(id, _)| *id == dataset)
            .map(|(_, columns)| columns.as_slice())
    }

    /// Defaults present in `discovered`, in default order. Without an entry
    /// for the dataset, the first five discovered columns.
    pub fn visible_for(&self, dataset: DatasetId, discovered: &[String]) -> Vec<String> {
        match self.get(dataset) {
            Some(defaults) => defaults
                .iter()
                .filter(|d| discovered.iter().any(|c| c == *d))
                .map(|d| d.to_string())
                .collect(),
            None => discovered
                .iter()
                .take(FALLBACK_COLUMN_COUNT)
                .cloned()
                .collect(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnWidth {
    Auto,
    Px(u32),
}

impl ColumnWidth {
    pub fn css(&self) -> String {
        match self {
            ColumnWidth::Auto => "auto".to_string(),
            ColumnWidth::Px(px) => format!("{}px", px),
        }
    }
}

/// Width shown while dragging a header handle; never narrower than a width
/// the drop would accept
pub fn drag_width(start_width: u32, start_x: i32, x: i32) -> u32 {
    let width = (start_width as i64 + x as i64 - start_x as i64).max(0) as u32;
    width.max(MIN_COLUMN_WIDTH + 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_intersection_keeps_default_order() {
        let discovered = names(&["Emails", "id", "Full name", "Company"]);
        assert_eq!(
            ColumnDefaults::builtin().visible_for(DatasetId::Usa, &discovered),
            names(&["Full name", "Emails"])
        );
    }

    #[test]
    fn test_known_dataset_may_end_up_empty() {
        let discovered = names(&["a", "b", "c"]);
        assert!(ColumnDefaults::builtin()
            .visible_for(DatasetId::Pdl, &discovered)
            .is_empty());
    }

    #[test]
    fn test_unmapped_dataset_takes_first_five() {
        let discovered = names(&["a", "b", "c", "d", "e", "f", "g"]);
        assert_eq!(
            ColumnDefaults::default().visible_for(DatasetId::Otc, &discovered),
            names(&["a", "b", "c", "d", "e"])
        );
        assert_eq!(
            ColumnDefaults::default().visible_for(DatasetId::Otc, &names(&["a", "b"])),
            names(&["a", "b"])
        );
    }

    #[test]
    fn test_width_css() {
        assert_eq!(ColumnWidth::Auto.css(), "auto");
        assert_eq!(ColumnWidth::Px(240).css(), "240px");
    }

    #[test]
    fn test_drag_width_stays_above_minimum() {
        assert_eq!(drag_width(180, 500, 540), 220);
        assert_eq!(drag_width(180, 500, 300), MIN_COLUMN_WIDTH + 1);
        assert_eq!(drag_width(150, 500, 450), MIN_COLUMN_WIDTH + 1);
        assert_eq!(drag_width(150, 500, 449), MIN_COLUMN_WIDTH + 1);
    }
}
