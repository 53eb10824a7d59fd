use contracts::system::auth::{FlashKind, FlashMessage};
use leptos::prelude::*;
use leptos_router::hooks::use_query_map;

/// Message passed to a page as `?error=` or `?success=`
#[component]
pub fn FormMessage() -> impl IntoView {
    let query = use_query_map();
    let message = Memo::new(move |_| {
        query.with(|q| FlashMessage::from_query(q.get("error"), q.get("success")))
    });

    move || {
        message.get().map(|flash| {
            let class = match flash.kind {
                FlashKind::Success => "form-message form-message--success",
                FlashKind::Error => "form-message form-message--error",
            };
            view! { <div class=class>{flash.message}</div> }
        })
    }
}
