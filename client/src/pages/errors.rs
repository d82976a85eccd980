//! Not-found and server-error screens.

#[cfg(test)]
#[path = "errors_test.rs"]
mod errors_test;

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::use_navigate;
use session::authorizer::LOGIN_ROUTE;
use session::routes::AppRoute;

use crate::state::portal::Portal;

/// Where "Go back" leads from the error screen: the last route recorded
/// before a failed request, or the login page when there is none.
fn back_target(last_route: Option<String>) -> String {
    let error_route = AppRoute::ServerError.path();
    last_route
        .filter(|route| !route.is_empty() && *route != error_route)
        .unwrap_or_else(|| LOGIN_ROUTE.to_owned())
}

#[component]
pub fn NotFoundPage() -> impl IntoView {
    view! {
        <div class="error-page">
            <h1>"404"</h1>
            <p>"The page you are looking for does not exist."</p>
            <a class="btn" href="/dashboard">"Go to dashboard"</a>
        </div>
    }
}

#[component]
pub fn ServerErrorPage() -> impl IntoView {
    let portal = expect_context::<Portal>();
    let navigate = use_navigate();

    let on_back = move |_| {
        let target = back_target(portal.client.take_last_route());
        navigate(&target, NavigateOptions::default());
    };

    view! {
        <div class="error-page">
            <h1>"500"</h1>
            <p>"Something went wrong on the server."</p>
            <button class="btn" on:click=on_back>"Go back"</button>
        </div>
    }
}
