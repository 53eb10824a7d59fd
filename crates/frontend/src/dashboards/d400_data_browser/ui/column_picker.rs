use leptos::prelude::*;
use thaw::*;

use crate::dashboards::d400_data_browser::state::BrowserState;
use crate::shared::icons::icon;

/// Dropdown with a checkbox per discovered column and reorder buttons for visible ones
#[component]
pub fn ColumnPicker(state: RwSignal<BrowserState>) -> impl IntoView {
    let open = RwSignal::new(false);

    let rows = move || {
        state.with(|s| {
            s.columns
                .iter()
                .map(|c| {
                    let position = s.visible_columns.iter().position(|v| v == c);
                    (c.clone(), position)
                })
                .collect::<Vec<_>>()
        })
    };
    let visible_count = move || state.with(|s| s.visible_columns.len());

    view! {
        <div class="column-picker">
            <Button
                size=ButtonSize::Small
                appearance=ButtonAppearance::Secondary
                on_click=move |_| open.update(|o| *o = !*o)
            >
                {icon("columns")}
                {move || format!(" Columns ({})", visible_count())}
            </Button>
            <Show when=move || open.get()>
                <div class="column-picker__menu">
                    {move || {
                        let last = visible_count().saturating_sub(1);
                        rows()
                            .into_iter()
                            .map(|(column, position)| {
                                let toggle = column.clone();
                                let up = column.clone();
                                let down = column.clone();
                                view! {
                                    <div class="column-picker__row">
                                        <label>
                                            <input
                                                type="checkbox"
                                                prop:checked=position.is_some()
                                                on:change=move |_| state.update(|s| s.toggle_column(&toggle))
                                            />
                                            {column}
                                        </label>
                                        {position.map(|index| view! {
                                            <span class="column-picker__order">
                                                <button
                                                    disabled=index == 0
                                                    title="Move left"
                                                    on:click=move |_| {
                                                        state.update(|s| s.move_column(&up, index.saturating_sub(1)))
                                                    }
                                                >
                                                    "←"
                                                </button>
                                                <button
                                                    disabled=index >= last
                                                    title="Move right"
                                                    on:click=move |_| state.update(|s| s.move_column(&down, index + 1))
                                                >
                                                    "→"
                                                </button>
                                            </span>
                                        })}
                                    </div>
                                }
                            })
                            .collect_view()
                    }}
                </div>
            </Show>
        </div>
    }
}
