use contracts::system::auth::{SignInRequest, FORGOT_PASSWORD_PAGE, SIGN_UP_PAGE};
use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::hooks::use_navigate;
use thaw::*;

use super::form_message::FormMessage;
use crate::system::auth::{api, context::establish_session, context::use_auth};

#[component]
pub fn SignInPage() -> impl IntoView {
    let email = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let (error_message, set_error_message) = signal(Option::<String>::None);
    let (is_loading, set_is_loading) = signal(false);

    let (_, set_auth_state) = use_auth();
    let navigate = use_navigate();

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();

        let request = SignInRequest {
            email: email.get_untracked(),
            password: password.get_untracked(),
        };
        set_is_loading.set(true);
        set_error_message.set(None);

        let navigate = navigate.clone();
        spawn_local(async move {
            match api::sign_in(&request).await {
                Ok(response) => {
                    let location = response.location();
                    if let Some(tokens) = response.session {
                        if let Err(e) = establish_session(tokens, set_auth_state).await {
                            log::error!("Session not established: {}", e);
                            set_error_message.set(Some(e));
                            set_is_loading.set(false);
                            return;
                        }
                    }
                    set_is_loading.set(false);
                    navigate(&location, Default::default());
                }
                Err(e) => {
                    set_error_message.set(Some(format!("Sign in failed: {}", e)));
                    set_is_loading.set(false);
                }
            }
        });
    };

    view! {
        <div class="auth-container">
            <form class="auth-box" on:submit=on_submit>
                <h1>"Sign in"</h1>
                <p class="auth-hint">
                    "Don't have an account? "
                    <a href=SIGN_UP_PAGE>"Sign up"</a>
                </p>

                <FormMessage />
                {move || error_message.get().map(|e| view! { <div class="form-message form-message--error">{e}</div> })}

                <div class="form-group">
                    <label for="email">"Email"</label>
                    <Input value=email placeholder="you@example.com" input_type=InputType::Email attr:id="email" />
                </div>
                <div class="form-group">
                    <div class="form-group__label-row">
                        <label for="password">"Password"</label>
                        <a class="auth-link" href=FORGOT_PASSWORD_PAGE>"Forgot Password?"</a>
                    </div>
                    <Input value=password placeholder="Your password" input_type=InputType::Password attr:id="password" />
                </div>

                <Button
                    appearance=ButtonAppearance::Primary
                    button_type=ButtonType::Submit
                    disabled=Signal::derive(move || is_loading.get())
                >
                    {move || if is_loading.get() { "Signing In..." } else { "Sign in" }}
                </Button>
            </form>
        </div>
    }
}
