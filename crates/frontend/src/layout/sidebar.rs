//! Sidebar with the dataset selector and the signed-in user

use contracts::enums::dataset_id::DatasetId;
use contracts::system::auth::SIGN_IN_PAGE;
use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::hooks::use_navigate;

use crate::layout::global_context::AppGlobalContext;
use crate::shared::icons::icon;
use crate::system::auth::context::{do_sign_out, use_auth};

#[component]
pub fn Sidebar() -> impl IntoView {
    let ctx = use_context::<AppGlobalContext>().expect("AppGlobalContext not found");
    let (auth_state, set_auth_state) = use_auth();
    let navigate = use_navigate();

    let email = move || auth_state.with(|s| s.email());
    let avatar = move || {
        auth_state.with(|s| s.avatar_url()).map(|src| {
            view! { <img class="app-sidebar__avatar" src=src alt="" width="24" height="24" referrerpolicy="no-referrer" /> }
        })
    };

    let on_sign_out = move |_: leptos::ev::MouseEvent| {
        let navigate = navigate.clone();
        spawn_local(async move {
            do_sign_out(set_auth_state).await;
            navigate(SIGN_IN_PAGE, Default::default());
        });
    };

    view! {
        <div class="app-sidebar__content">
            <div class="app-sidebar__section">"Datasets"</div>
            {DatasetId::all()
                .into_iter()
                .map(|dataset| {
                    view! {
                        <div
                            class="app-sidebar__item"
                            class:app-sidebar__item--active=move || ctx.selected_dataset.get() == dataset
                            on:click=move |_| ctx.select_dataset(dataset)
                        >
                            <div class="app-sidebar__item-content">
                                {icon("database")}
                                <span>{dataset.display_name()}</span>
                            </div>
                        </div>
                    }
                })
                .collect_view()}

            <div class="app-sidebar__footer">
                {avatar}
                <span class="app-sidebar__user">{email}</span>
                <button class="app-sidebar__sign-out" title="Sign out" on:click=on_sign_out>
                    {icon("log-out")}
                </button>
            </div>
        </div>
    }
}
