use serde::{Deserialize, Serialize};
use std::fmt;

/// Named datasets available in the data browser
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DatasetId {
    Apo,
    Pdl,
    #[default]
    Usa,
    Otc,
}

impl DatasetId {
    /// Table name understood by the gateway RPCs
    pub fn code(&self) -> &'static str {
        match self {
            DatasetId::Apo => "apo",
            DatasetId::Pdl => "pdl",
            DatasetId::Usa => "usa",
            DatasetId::Otc => "otc",
        }
    }

    /// Label shown in the sidebar and page header
    pub fn display_name(&self) -> &'static str {
        match self {
            DatasetId::Apo => "APO",
            DatasetId::Pdl => "PDL",
            DatasetId::Usa => "USA",
            DatasetId::Otc => "OTC",
        }
    }

    /// All datasets in sidebar order
    pub fn all() -> Vec<DatasetId> {
        vec![
            DatasetId::Apo,
            DatasetId::Pdl,
            DatasetId::Usa,
            DatasetId::Otc,
        ]
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "apo" => Some(DatasetId::Apo),
            "pdl" => Some(DatasetId::Pdl),
            "usa" => Some(DatasetId::Usa),
            "otc" => Some(DatasetId::Otc),
            _ => None,
        }
    }
}

impl fmt::Display for DatasetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_round_trip_for_every_dataset() {
        for dataset in DatasetId::all() {
            assert_eq!(DatasetId::from_code(dataset.code()), Some(dataset));
        }
        assert_eq!(DatasetId::from_code("USA"), None);
    }

    #[test]
    fn serializes_as_lowercase_code() {
        let json = serde_json::to_string(&DatasetId::Otc).unwrap();
        assert_eq!(json, "\"otc\"");
        assert_eq!(DatasetId::default(), DatasetId::Usa);
    }
}
