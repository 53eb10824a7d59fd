use leptos::prelude::*;
use thaw::*;

use crate::dashboards::d400_data_browser::filters::badge_class;
use crate::dashboards::d400_data_browser::state::{BrowserState, FilterDraft};
use crate::shared::icons::icon;

/// Column/value inputs plus one removable badge per active filter
#[component]
pub fn FilterBar(state: RwSignal<BrowserState>) -> impl IntoView {
    let draft_column = RwSignal::new(String::new());
    let draft_value = RwSignal::new(String::new());

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        let mut draft = FilterDraft {
            column: draft_column.get_untracked(),
            value: draft_value.get_untracked(),
        };
        let applied = state.try_update(|s| s.submit_draft(&mut draft)).unwrap_or(false);
        if applied {
            draft_column.set(draft.column);
            draft_value.set(draft.value);
        }
    };

    let columns = move || state.with(|s| s.columns.clone());
    let active = move || {
        state.with(|s| {
            s.filters
                .iter()
                .map(|(c, v)| (c.to_string(), v.to_string()))
                .collect::<Vec<_>>()
        })
    };

    view! {
        <div class="filter-bar">
            <form class="filter-bar__form" on:submit=on_submit>
                <span class="filter-bar__icon">{icon("filter")}</span>
                <Select value=draft_column size=SelectSize::Small>
                    <option value="">"Column..."</option>
                    <For
                        each=columns
                        key=|c| c.clone()
                        children=|column| view! { <option value=column.clone()>{column.clone()}</option> }
                    />
                </Select>
                <Input value=draft_value placeholder="contains..." attr:class="filter-bar__value" />
                <Button
                    size=ButtonSize::Small
                    appearance=ButtonAppearance::Primary
                    button_type=ButtonType::Submit
                    disabled=Signal::derive(move || {
                        draft_column.with(|c| c.is_empty()) || draft_value.with(|v| v.is_empty())
                    })
                >
                    "Add filter"
                </Button>
            </form>

            <div class="filter-bar__badges">
                <For
                    each=active
                    key=|(c, v)| format!("{}={}", c, v)
                    children=move |(column, value)| {
                        let remove = column.clone();
                        view! {
                            <span class=badge_class(&column)>
                                <span class="filter-badge__column">{column.clone()}</span>
                                ": "
                                <span class="filter-badge__value">{value}</span>
                                <button
                                    class="filter-badge__remove"
                                    title="Remove filter"
                                    on:click=move |_| state.update(|s| s.remove_filter(&remove))
                                >
                                    {icon("x")}
                                </button>
                            </span>
                        }
                    }
                />
            </div>
        </div>
    }
}
