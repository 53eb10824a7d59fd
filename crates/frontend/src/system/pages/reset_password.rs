use contracts::system::auth::ResetPasswordRequest;
use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::hooks::use_navigate;
use thaw::*;

use super::form_message::FormMessage;
use crate::system::auth::api::{self, SESSION_EXPIRED};
use crate::system::auth::context::{drop_session, use_auth};

/// Sets a new password for the signed-in user (reached from the reset e-mail)
#[component]
pub fn ResetPasswordPage() -> impl IntoView {
    let password = RwSignal::new(String::new());
    let confirm_password = RwSignal::new(String::new());
    let (error_message, set_error_message) = signal(Option::<String>::None);
    let (is_loading, set_is_loading) = signal(false);
    let (_, set_auth_state) = use_auth();
    let navigate = use_navigate();

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();

        let request = ResetPasswordRequest {
            password: password.get_untracked(),
            confirm_password: confirm_password.get_untracked(),
        };
        set_is_loading.set(true);
        set_error_message.set(None);

        let navigate = navigate.clone();
        spawn_local(async move {
            match api::reset_password(&request).await {
                Ok(response) => {
                    password.set(String::new());
                    confirm_password.set(String::new());
                    navigate(&response.location(), Default::default());
                }
                Err(e) if e == SESSION_EXPIRED => drop_session(set_auth_state),
                Err(e) => set_error_message.set(Some(e)),
            }
            set_is_loading.set(false);
        });
    };

    view! {
        <div class="auth-container">
            <form class="auth-box" on:submit=on_submit>
                <h1>"Reset password"</h1>
                <p class="auth-hint">"Please enter your new password below."</p>

                <FormMessage />
                {move || error_message.get().map(|e| view! { <div class="form-message form-message--error">{e}</div> })}

                <div class="form-group">
                    <label for="password">"New password"</label>
                    <Input value=password placeholder="New password" input_type=InputType::Password attr:id="password" />
                </div>
                <div class="form-group">
                    <label for="confirm_password">"Confirm password"</label>
                    <Input value=confirm_password placeholder="Confirm password" input_type=InputType::Password attr:id="confirm_password" />
                </div>

                <Button
                    appearance=ButtonAppearance::Primary
                    button_type=ButtonType::Submit
                    disabled=Signal::derive(move || is_loading.get())
                >
                    "Reset password"
                </Button>
            </form>
        </div>
    }
}
