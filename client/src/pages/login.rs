//! Login page: username + password against the survey backend.
//!
//! `/login/:id` renders the same form with the department code shown under
//! the title; the code does not change how credentials are checked.

#[cfg(test)]
#[path = "login_test.rs"]
mod login_test;

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::{use_navigate, use_params_map};
use session::SessionError;
use session::routes::AppRoute;

use crate::state::auth::AuthState;
use crate::state::portal::Portal;

const MISSING_CREDENTIALS: &str = "Enter both username and password.";

/// Trim the form fields and require both.
fn validate_login_input(username: &str, password: &str) -> Result<(String, String), &'static str> {
    let username = username.trim();
    if username.is_empty() || password.is_empty() {
        return Err(MISSING_CREDENTIALS);
    }
    Ok((username.to_owned(), password.to_owned()))
}

/// Message shown under the form when a login attempt fails.
fn login_failure_message(err: &SessionError) -> String {
    match err {
        SessionError::AuthenticationFailure(message) => message.clone(),
        SessionError::LoginInProgress => "A sign-in attempt is already running.".to_owned(),
        SessionError::Transport(_) => "Unable to reach the server. Please try again.".to_owned(),
        SessionError::Storage(_) => "Signed in, but this browser refused to store the session.".to_owned(),
        other => format!("Login failed: {other}"),
    }
}

#[component]
pub fn LoginPage() -> impl IntoView {
    let portal = expect_context::<Portal>();
    let auth = expect_context::<RwSignal<AuthState>>();
    let navigate = use_navigate();
    let params = use_params_map();

    let username = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let info = RwSignal::new(String::new());
    let busy = RwSignal::new(false);

    let department = move || params.with(|p| p.get("id")).filter(|id| !id.is_empty());

    // Already signed in: skip the form.
    let navigate_home = navigate.clone();
    let guard = portal.guard.clone();
    Effect::new(move || {
        if guard.check().is_allowed() {
            navigate_home(&AppRoute::Dashboard.path(), NavigateOptions::default());
        }
    });

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get() {
            return;
        }
        let (username_value, password_value) = match validate_login_input(&username.get(), &password.get()) {
            Ok(values) => values,
            Err(message) => {
                info.set(message.to_owned());
                return;
            }
        };
        busy.set(true);
        info.set("Signing in...".to_owned());

        #[cfg(feature = "csr")]
        {
            let portal = portal.clone();
            let navigate = navigate.clone();
            leptos::task::spawn_local(async move {
                match portal.session.login(portal.client.as_ref(), &username_value, &password_value).await {
                    Ok(success) => {
                        log::info!("{}", success.message);
                        password.set(String::new());
                        auth.set(AuthState::signed_in(success.user));
                        navigate(&AppRoute::Dashboard.path(), NavigateOptions::default());
                    }
                    Err(e) => {
                        info.set(login_failure_message(&e));
                        busy.set(false);
                    }
                }
            });
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = (&portal, &navigate, auth, username_value, password_value);
        }
    };

    view! {
        <div class="login-page">
            <div class="login-card">
                <h1>"Rural Survey MIS"</h1>
                <p class="login-card__subtitle">
                    {move || department().map_or_else(|| "Sign in to continue".to_owned(), |id| format!("Department: {id}"))}
                </p>
                <form class="login-form" on:submit=on_submit>
                    <input
                        class="login-input"
                        type="text"
                        placeholder="Username"
                        autocomplete="username"
                        prop:value=move || username.get()
                        on:input=move |ev| username.set(event_target_value(&ev))
                    />
                    <input
                        class="login-input"
                        type="password"
                        placeholder="Password"
                        autocomplete="current-password"
                        prop:value=move || password.get()
                        on:input=move |ev| password.set(event_target_value(&ev))
                    />
                    <button class="login-button" type="submit" disabled=move || busy.get()>
                        {move || if busy.get() { "Signing in..." } else { "Sign In" }}
                    </button>
                </form>
                <Show when=move || !info.get().is_empty()>
                    <p class="login-message">{move || info.get()}</p>
                </Show>
            </div>
        </div>
    }
}
