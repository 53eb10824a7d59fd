use contracts::system::auth::SIGN_IN_PAGE;
use leptos::prelude::*;
use leptos_router::hooks::use_navigate;

use super::context::use_auth;

/// Component that requires a confirmed session
/// Navigates to the sign-in page when there is none
#[component]
pub fn RequireAuth(children: ChildrenFn) -> impl IntoView {
    let (auth_state, _) = use_auth();
    let navigate = use_navigate();

    Effect::new(move |_| {
        if auth_state.with(|s| s.access_token.is_none()) {
            navigate(SIGN_IN_PAGE, Default::default());
        }
    });

    view! {
        <Show
            when=move || auth_state.with(|s| s.is_confirmed())
            fallback=|| view! { <div class="page-loading">"Checking session..."</div> }
        >
            {children()}
        </Show>
    }
}
