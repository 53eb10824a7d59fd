use contracts::system::auth::{ForgotPasswordRequest, SIGN_IN_PAGE};
use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::hooks::use_navigate;
use thaw::*;

use super::form_message::FormMessage;
use crate::system::auth::api;

#[component]
pub fn ForgotPasswordPage() -> impl IntoView {
    let email = RwSignal::new(String::new());
    let (error_message, set_error_message) = signal(Option::<String>::None);
    let (is_loading, set_is_loading) = signal(false);
    let navigate = use_navigate();

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();

        let request = ForgotPasswordRequest {
            email: email.get_untracked(),
            callback_url: None,
        };
        set_is_loading.set(true);
        set_error_message.set(None);

        let navigate = navigate.clone();
        spawn_local(async move {
            match api::forgot_password(&request).await {
                Ok(response) => navigate(&response.location(), Default::default()),
                Err(e) => set_error_message.set(Some(format!("Request failed: {}", e))),
            }
            set_is_loading.set(false);
        });
    };

    view! {
        <div class="auth-container">
            <form class="auth-box" on:submit=on_submit>
                <h1>"Reset Password"</h1>
                <p class="auth-hint">
                    "Already have an account? "
                    <a href=SIGN_IN_PAGE>"Sign in"</a>
                </p>

                <FormMessage />
                {move || error_message.get().map(|e| view! { <div class="form-message form-message--error">{e}</div> })}

                <div class="form-group">
                    <label for="email">"Email"</label>
                    <Input value=email placeholder="you@example.com" input_type=InputType::Email attr:id="email" />
                </div>

                <Button
                    appearance=ButtonAppearance::Primary
                    button_type=ButtonType::Submit
                    disabled=Signal::derive(move || is_loading.get())
                >
                    "Reset Password"
                </Button>
            </form>
        </div>
    }
}
