use crate::layout::global_context::AppGlobalContext;
use crate::routes::routes::AppRoutes;
use crate::system::auth::context::AuthProvider;
use leptos::prelude::*;
use thaw::ConfigProvider;

#[component]
pub fn App() -> impl IntoView {
    // Provide the AppGlobalContext store to the whole app via context.
    provide_context(AppGlobalContext::new());

    view! {
        <ConfigProvider>
            <AuthProvider>
                <AppRoutes />
            </AuthProvider>
        </ConfigProvider>
    }
}
