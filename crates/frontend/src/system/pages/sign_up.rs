use contracts::system::auth::{SignUpRequest, SIGN_IN_PAGE};
use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::hooks::use_navigate;
use thaw::*;

use super::form_message::FormMessage;
use crate::system::auth::api;

#[component]
pub fn SignUpPage() -> impl IntoView {
    let email = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let (error_message, set_error_message) = signal(Option::<String>::None);
    let (is_loading, set_is_loading) = signal(false);
    let navigate = use_navigate();

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();

        let request = SignUpRequest {
            email: email.get_untracked(),
            password: password.get_untracked(),
        };
        set_is_loading.set(true);
        set_error_message.set(None);

        let navigate = navigate.clone();
        spawn_local(async move {
            match api::sign_up(&request).await {
                Ok(response) => {
                    password.set(String::new());
                    navigate(&response.location(), Default::default());
                }
                Err(e) => set_error_message.set(Some(format!("Sign up failed: {}", e))),
            }
            set_is_loading.set(false);
        });
    };

    view! {
        <div class="auth-container">
            <form class="auth-box" on:submit=on_submit>
                <h1>"Sign up"</h1>
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
                <div class="form-group">
                    <label for="password">"Password"</label>
                    <Input value=password placeholder="Your password" input_type=InputType::Password attr:id="password" />
                </div>

                <Button
                    appearance=ButtonAppearance::Primary
                    button_type=ButtonType::Submit
                    disabled=Signal::derive(move || is_loading.get())
                >
                    {move || if is_loading.get() { "Signing up..." } else { "Sign up" }}
                </Button>
            </form>
        </div>
    }
}
