pub mod global_context;
pub mod sidebar;

use global_context::AppGlobalContext;
use leptos::prelude::*;
use sidebar::Sidebar;

/// Protected area layout
///
/// ```text
/// +----------+-----------------------+
/// | Sidebar  |        Content        |
/// +----------+-----------------------+
/// ```
#[component]
pub fn Shell(children: Children) -> impl IntoView {
    let ctx = use_context::<AppGlobalContext>().expect("AppGlobalContext context not found");

    // Runs once when the shell is created
    ctx.init_router_integration();

    view! {
        <div class="app-layout">
            <div class="app-body">
                <div data-zone="left" class="left" class:hidden=move || !ctx.left_open.get()>
                    <Sidebar />
                </div>
                <div class="app-main">
                    <button class="app-main__toggle" title="Toggle sidebar" on:click=move |_| ctx.toggle_left()>
                        {crate::shared::icons::icon("columns")}
                    </button>
                    {children()}
                </div>
            </div>
        </div>
    }
}
