use leptos::prelude::*;
use leptos_router::components::{Outlet, ParentRoute, Redirect, Route, Router, Routes};
use leptos_router::path;

use crate::dashboards::DataBrowserDashboard;
use crate::layout::Shell;
use crate::system::auth::guard::RequireAuth;
use crate::system::pages::auth_callback::AuthCallbackPage;
use crate::system::pages::forgot_password::ForgotPasswordPage;
use crate::system::pages::reset_password::ResetPasswordPage;
use crate::system::pages::sign_in::SignInPage;
use crate::system::pages::sign_up::SignUpPage;

/// Everything under `/protected` needs a confirmed session
#[component]
fn ProtectedLayout() -> impl IntoView {
    view! {
        <RequireAuth>
            <Shell>
                <Outlet />
            </Shell>
        </RequireAuth>
    }
}

/// Return pages of the hosted checkout
#[component]
fn CheckoutResult(success: bool) -> impl IntoView {
    let (title, text) = if success {
        ("Payment complete", "Thank you! Your payment was received.")
    } else {
        ("Payment cancelled", "No payment was taken.")
    };
    view! {
        <div class="auth-page">
            <div class="auth-card">
                <h1 class="auth-card__title">{title}</h1>
                <p>{text}</p>
                <a href="/protected">"Back to the dashboard"</a>
            </div>
        </div>
    }
}

#[component]
pub fn AppRoutes() -> impl IntoView {
    view! {
        <Router>
            <Routes fallback=|| view! { <div class="page-not-found">"Page not found"</div> }>
                <Route path=path!("/") view=|| view! { <Redirect path="/protected" /> } />
                <Route path=path!("/sign-in") view=SignInPage />
                <Route path=path!("/sign-up") view=SignUpPage />
                <Route path=path!("/forgot-password") view=ForgotPasswordPage />
                <Route path=path!("/auth/callback") view=AuthCallbackPage />
                <Route path=path!("/success") view=|| view! { <CheckoutResult success=true /> } />
                <Route path=path!("/cancel") view=|| view! { <CheckoutResult success=false /> } />
                <ParentRoute path=path!("/protected") view=ProtectedLayout>
                    <Route path=path!("") view=DataBrowserDashboard />
                    <Route path=path!("reset-password") view=ResetPasswordPage />
                </ParentRoute>
            </Routes>
        </Router>
    }
}
