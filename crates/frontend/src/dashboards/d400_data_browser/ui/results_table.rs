use contracts::dashboards::d400_data_browser::cell_text;
use leptos::ev;
use leptos::prelude::*;
use thaw::*;
use wasm_bindgen::JsCast;
use web_sys::HtmlElement;

use crate::dashboards::d400_data_browser::columns::{drag_width, MIN_COLUMN_WIDTH};
use crate::dashboards::d400_data_browser::state::BrowserState;
use crate::shared::clipboard::copy_to_clipboard_with_callback;

const COPIED_NOTICE_MS: u32 = 1500;

/// Column resize in progress
#[derive(Debug, Clone)]
struct Drag {
    column: String,
    start_x: i32,
    start_width: u32,
}

fn header_width(ev: &ev::MouseEvent) -> u32 {
    event_target::<HtmlElement>(ev)
        .parent_element()
        .and_then(|th| th.dyn_into::<HtmlElement>().ok())
        .map(|th| th.offset_width().max(0) as u32)
        .unwrap_or(MIN_COLUMN_WIDTH)
}

/// Result grid. Cells are editable in place (kept locally and marked unsaved),
/// a double click copies the value, header handles resize the column.
#[component]
pub fn ResultsTable(state: RwSignal<BrowserState>, #[prop(into)] loading: Signal<bool>) -> impl IntoView {
    let drag = StoredValue::new(None::<Drag>);
    let preview = RwSignal::new(None::<(String, u32)>);
    let copied = RwSignal::new(false);

    let move_listener = window_event_listener(ev::mousemove, move |ev| {
        let Some(active) = drag.get_value() else {
            return;
        };
        let width = drag_width(active.start_width, active.start_x, ev.client_x());
        preview.set(Some((active.column, width)));
    });
    let up_listener = window_event_listener(ev::mouseup, move |_| {
        if drag.with_value(|d| d.is_none()) {
            return;
        }
        drag.set_value(None);
        if let Some((column, width)) = preview.get_untracked() {
            state.update(|s| {
                if !s.set_column_width(&column, width) {
                    log::debug!("Width {}px of '{}' rejected", width, column);
                }
            });
        }
        preview.set(None);
    });
    on_cleanup(move || {
        move_listener.remove();
        up_listener.remove();
    });

    let width_of = move |column: &str| {
        preview.with(|p| match p {
            Some((c, width)) if c == column => format!("{}px", width),
            _ => state.with(|s| s.column_width(column).css()),
        })
    };

    let visible = move || state.with(|s| s.visible_columns.clone());

    let header = move || {
        visible()
            .into_iter()
            .map(|column| {
                let sized = column.clone();
                let dragged = column.clone();
                view! {
                    <th class="results-table__th" style:width=move || width_of(&sized)>
                        <span class="results-table__title">{column}</span>
                        <span
                            class="resize-handle"
                            on:mousedown=move |ev| {
                                ev.prevent_default();
                                drag.set_value(Some(Drag {
                                    column: dragged.clone(),
                                    start_x: ev.client_x(),
                                    start_width: header_width(&ev),
                                }));
                            }
                        ></span>
                    </th>
                }
            })
            .collect_view()
    };

    let body = move || {
        let columns = visible();
        state.with(|s| {
            s.results
                .iter()
                .enumerate()
                .map(|(index, row)| {
                    let cells = columns
                        .iter()
                        .map(|column| {
                            let edited = column.clone();
                            let flagged = column.clone();
                            view! {
                                <td
                                    class="results-table__cell"
                                    class:results-table__cell--edited=move || {
                                        state.with(|s| s.is_edited(index, &flagged))
                                    }
                                    contenteditable="true"
                                    on:blur=move |ev| {
                                        let text = event_target::<HtmlElement>(&ev).inner_text();
                                        state.maybe_update(|s| s.handle_edit(index, &edited, &text));
                                    }
                                    on:dblclick=move |ev| {
                                        let text = event_target::<HtmlElement>(&ev).inner_text();
                                        copy_to_clipboard_with_callback(text.trim(), move || {
                                            copied.set(true);
                                            gloo_timers::callback::Timeout::new(COPIED_NOTICE_MS, move || {
                                                copied.set(false);
                                            })
                                            .forget();
                                        });
                                    }
                                >
                                    {cell_text(row, column)}
                                </td>
                            }
                        })
                        .collect_view();
                    view! { <tr>{cells}</tr> }
                })
                .collect_view()
        })
    };

    let is_empty = move || state.with(|s| s.results.is_empty());

    view! {
        <div class="results-table">
            <Show when=move || loading.get()>
                <div class="results-table__loading">
                    <Spinner />
                </div>
            </Show>
            <Show when=move || copied.get()>
                <div class="results-table__notice">"Copied to clipboard"</div>
            </Show>
            <div class="table-container">
                <table class="data-table">
                    <thead>
                        <tr>{header}</tr>
                    </thead>
                    <tbody>{body}</tbody>
                </table>
            </div>
            <Show when=move || !loading.get() && is_empty()>
                <p class="results-table__empty">"No results"</p>
            </Show>
        </div>
    }
}
