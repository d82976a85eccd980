//! Shared auth UI helpers.
//!
//! SYSTEM CONTEXT
//! ==============
//! Route components should apply identical unauthenticated redirect behavior.
//! `RequireSession` is the route guard in component form: it re-reads the
//! stored session each time a protected route mounts.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::use_navigate;
use session::authorizer::LOGIN_ROUTE;

use crate::state::auth::AuthState;
use crate::state::portal::Portal;

/// Whether a settled auth state should send the user to the login page.
pub fn should_redirect_unauth(state: &AuthState) -> bool {
    !state.loading && !state.authenticated
}

/// Redirect to `/login` whenever auth has loaded and no session is present.
pub fn install_unauth_redirect<F>(auth: RwSignal<AuthState>, navigate: F)
where
    F: Fn(&str, NavigateOptions) + Clone + 'static,
{
    let navigate = navigate.clone();
    Effect::new(move || {
        let state = auth.get();
        if should_redirect_unauth(&state) {
            navigate(LOGIN_ROUTE, NavigateOptions::default());
        }
    });
}

/// Render `children` only while the session passes the route guard.
#[component]
pub fn RequireSession(children: ChildrenFn) -> impl IntoView {
    let portal = expect_context::<Portal>();
    let auth = expect_context::<RwSignal<AuthState>>();

    auth.set(AuthState::evaluate(&portal.guard, &portal.session));
    install_unauth_redirect(auth, use_navigate());

    view! {
        <Show when=move || auth.with(|state| !should_redirect_unauth(state))>
            {children()}
        </Show>
    }
}
