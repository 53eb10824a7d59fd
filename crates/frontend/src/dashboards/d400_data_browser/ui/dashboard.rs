use contracts::dashboards::d400_data_browser::SearchResponse;
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

use super::column_picker::ColumnPicker;
use super::filter_bar::FilterBar;
use super::results_table::ResultsTable;
use crate::dashboards::d400_data_browser::api;
use crate::dashboards::d400_data_browser::columns::ColumnDefaults;
use crate::dashboards::d400_data_browser::export::start_export;
use crate::shared::pager::PAGE_SIZE_OPTIONS;
use crate::dashboards::d400_data_browser::sequencing::RequestSequencer;
use crate::dashboards::d400_data_browser::state::create_state;
use crate::layout::global_context::AppGlobalContext;
use crate::shared::components::pagination_controls::PaginationControls;
use crate::shared::icons::icon;
use crate::system::auth::api::SESSION_EXPIRED;
use crate::system::auth::context::{drop_session, use_auth};

/// Data browser: filter, page, edit and export the rows of the selected dataset
#[component]
pub fn DataBrowserDashboard() -> impl IntoView {
    let ctx = use_context::<AppGlobalContext>().expect("AppGlobalContext not provided");
    let (_, set_auth_state) = use_auth();

    let state = create_state(ctx.selected_dataset.get_untracked());
    let defaults = StoredValue::new(ColumnDefaults::builtin());
    let column_requests = RequestSequencer::new();
    let result_requests = RequestSequencer::new();
    let loading = RwSignal::new(false);
    let exporting = RwSignal::new(false);

    // An expired session sends the guard back to sign-in
    let on_failure = move |context: &str, error: String| {
        log::error!("{}: {}", context, error);
        if error == SESSION_EXPIRED {
            drop_session(set_auth_state);
        }
    };

    // Dataset change: reset at once, then rediscover columns
    Effect::new(move |_| {
        let dataset = ctx.selected_dataset.get();
        state.update(|s| s.select_dataset(dataset));

        let ticket = column_requests.issue();
        spawn_local(async move {
            let columns = match api::fetch_columns(dataset).await {
                Ok(columns) => columns,
                Err(e) => {
                    on_failure("Failed to fetch columns", e);
                    Vec::new()
                }
            };
            if ticket.is_current() {
                state.update(|s| defaults.with_value(|d| s.apply_columns(columns, d)));
            }
        });
    });

    let search_key = Memo::new(move |_| state.with(|s| s.search_key()));

    Effect::new(move |_| {
        // A new key makes any search still in flight stale
        let ticket = result_requests.issue();
        loading.set(true);
        let Some((query, _)) = search_key.get() else {
            return;
        };

        spawn_local(async move {
            let response = match api::fetch_search(&query).await {
                Ok(response) => response,
                Err(e) => {
                    on_failure("Failed to fetch results", e);
                    SearchResponse {
                        results: Vec::new(),
                        total_results: Some(0),
                    }
                }
            };
            if ticket.is_current() {
                state.update(|s| s.apply_results(response));
                loading.set(false);
            }
        });
    });

    let on_export = move |_: leptos::ev::MouseEvent| {
        if exporting.get_untracked() {
            return;
        }
        let export = state.with_untracked(|s| s.export_query());
        spawn_local(async move {
            if let Err(e) = start_export(exporting, api::download_export(&export)).await {
                if e == SESSION_EXPIRED {
                    drop_session(set_auth_state);
                }
            }
        });
    };

    let current_page = Signal::derive(move || state.with(|s| s.current_page()));
    let total_pages = Signal::derive(move || state.with(|s| s.total_pages()));
    let count_label = Signal::derive(move || state.with(|s| s.count_label()));
    let page_size = Signal::derive(move || state.with(|s| s.limit));
    let items = Signal::derive(move || state.with(|s| s.page_items()));

    view! {
        <div id="d400_data_browser--dashboard" class="data-browser">
            <div class="data-browser__header">
                <h2 class="data-browser__title">
                    {icon("database")}
                    {move || format!(" {}", ctx.selected_dataset.get().display_name())}
                </h2>
                <div class="data-browser__actions">
                    <ColumnPicker state=state />
                    <Button
                        size=ButtonSize::Small
                        appearance=ButtonAppearance::Secondary
                        on_click=move |_| state.update(|s| s.reload += 1)
                        disabled=Signal::derive(move || loading.get())
                    >
                        {icon("refresh")}
                        " Refresh"
                    </Button>
                    <Button
                        size=ButtonSize::Small
                        appearance=ButtonAppearance::Primary
                        on_click=on_export
                        disabled=Signal::derive(move || exporting.get())
                    >
                        {icon("download")}
                        {move || if exporting.get() { " Exporting..." } else { " Export CSV" }}
                    </Button>
                </div>
            </div>

            <FilterBar state=state />

            <ResultsTable state=state loading=loading />

            <PaginationControls
                current_page=current_page
                total_pages=total_pages
                count_label=count_label
                page_size=page_size
                items=items
                on_prev=Callback::new(move |_| state.update(|s| s.prev_page()))
                on_next=Callback::new(move |_| state.update(|s| s.next_page()))
                on_page_change=Callback::new(move |page| state.update(|s| s.go_to_page(page)))
                on_page_size_change=Callback::new(move |size| state.update(|s| s.set_limit(size)))
                page_size_options=PAGE_SIZE_OPTIONS.to_vec()
            />
        </div>
    }
}
