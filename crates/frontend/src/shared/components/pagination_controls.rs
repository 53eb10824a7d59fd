use crate::shared::pager::PageItem;
use crate::shared::icons::icon;
use leptos::prelude::*;

/// Pager with numbered page buttons and a page size selector
///
/// Pages are 1-based; `items` is the compressed page list with gaps.
#[component]
pub fn PaginationControls(
    /// Current page (1-based)
    #[prop(into)]
    current_page: Signal<usize>,

    #[prop(into)]
    total_pages: Signal<usize>,

    /// e.g. "1234 results"
    #[prop(into)]
    count_label: Signal<String>,

    #[prop(into)]
    page_size: Signal<usize>,

    /// Page buttons to render
    #[prop(into)]
    items: Signal<Vec<PageItem>>,

    on_prev: Callback<()>,
    on_next: Callback<()>,
    on_page_change: Callback<usize>,
    on_page_size_change: Callback<usize>,

    page_size_options: Vec<usize>,
) -> impl IntoView {
    view! {
        <div class="pagination-controls">
            <button
                class="pagination-btn"
                on:click=move |_| on_prev.run(())
                disabled=move || current_page.get() <= 1
                title="Previous page"
            >
                {icon("chevron-left")}
            </button>
            {move || {
                items
                    .get()
                    .into_iter()
                    .map(|item| match item {
                        PageItem::Page(page) => view! {
                            <button
                                class="pagination-btn"
                                class:pagination-btn--active=move || current_page.get() == page
                                on:click=move |_| on_page_change.run(page)
                            >
                                {page.to_string()}
                            </button>
                        }
                        .into_any(),
                        PageItem::Gap => view! { <span class="pagination-gap">"…"</span> }.into_any(),
                    })
                    .collect_view()
            }}
            <button
                class="pagination-btn"
                on:click=move |_| on_next.run(())
                disabled=move || current_page.get() >= total_pages.get()
                title="Next page"
            >
                {icon("chevron-right")}
            </button>
            <span class="pagination-info">
                {move || count_label.get()}
            </span>
            <select
                class="page-size-select"
                on:change=move |ev| {
                    if let Ok(size) = event_target_value(&ev).parse() {
                        on_page_size_change.run(size);
                    }
                }
                prop:value=move || page_size.get().to_string()
            >
                {page_size_options
                    .into_iter()
                    .map(|size| {
                        view! {
                            <option value=size.to_string() selected=move || page_size.get() == size>
                                {format!("{} / page", size)}
                            </option>
                        }
                    })
                    .collect_view()}
            </select>
        </div>
    }
}
