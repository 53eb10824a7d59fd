use contracts::enums::dataset_id::DatasetId;
use leptos::prelude::*;
use std::collections::HashMap;
use web_sys::window;

/// Query parameter mirroring the selected dataset
const DATASET_PARAM: &str = "table";

/// App-wide selection state, provided once at the root
#[derive(Clone, Copy)]
pub struct AppGlobalContext {
    pub selected_dataset: RwSignal<DatasetId>,
    pub left_open: RwSignal<bool>,
}

impl AppGlobalContext {
    pub fn new() -> Self {
        Self {
            selected_dataset: RwSignal::new(DatasetId::default()),
            left_open: RwSignal::new(true),
        }
    }

    pub fn select_dataset(&self, dataset: DatasetId) {
        if self.selected_dataset.get_untracked() != dataset {
            log::info!("Dataset selected: {}", dataset);
            self.selected_dataset.set(dataset);
        }
    }

    pub fn toggle_left(&self) {
        self.left_open.update(|val| *val = !*val);
    }

    /// Restores the dataset from `?table=` and keeps the URL in sync afterwards
    pub fn init_router_integration(&self) {
        let search = window()
            .and_then(|w| w.location().search().ok())
            .unwrap_or_default();
        if let Some(dataset) = dataset_from_search(&search) {
            self.selected_dataset.set(dataset);
        }

        let this = *self;
        Effect::new(move |_| {
            let new_url = format!("?{}", dataset_query(this.selected_dataset.get()));

            let Some(w) = window() else {
                return;
            };
            let current_search = w.location().search().unwrap_or_default();
            if current_search != new_url {
                if let Ok(history) = w.history() {
                    let _ = history.replace_state_with_url(
                        &wasm_bindgen::JsValue::NULL,
                        "",
                        Some(&new_url),
                    );
                }
            }
        });
    }
}

impl Default for AppGlobalContext {
    fn default() -> Self {
        Self::new()
    }
}

fn dataset_from_search(search: &str) -> Option<DatasetId> {
    let params: HashMap<String, String> =
        serde_qs::from_str(search.trim_start_matches('?')).unwrap_or_default();
    params
        .get(DATASET_PARAM)
        .and_then(|code| DatasetId::from_code(code))
}

fn dataset_query(dataset: DatasetId) -> String {
    serde_qs::to_string(&HashMap::from([(DATASET_PARAM, dataset.code())])).unwrap_or_default()
}
