//! Root application component with routing and context providers.

use leptos::prelude::*;
use leptos_meta::{Title, provide_meta_context};
use leptos_router::{
    ParamSegment, StaticSegment,
    components::{Redirect, Route, Router, Routes},
    hooks::use_params_map,
};
use session::authorizer::LOGIN_ROUTE;
use session::routes::Section;

use crate::pages::dashboard::{DashboardPage, SectionPage};
use crate::pages::errors::{NotFoundPage, ServerErrorPage};
use crate::pages::login::LoginPage;
use crate::state::auth::AuthState;
use crate::state::portal::Portal;
use crate::util::auth::RequireSession;

/// `/:section`: a known section behind the guard, anything else is a 404.
#[component]
fn SectionRoute() -> impl IntoView {
    let params = use_params_map();
    let section = params.with_untracked(|p| p.get("section")).and_then(|slug| Section::from_slug(&slug));

    match section {
        Some(section) => view! {
            <RequireSession>
                <SectionPage section=section/>
            </RequireSession>
        }
        .into_any(),
        None => view! { <NotFoundPage/> }.into_any(),
    }
}

/// Root application component.
///
/// Builds the session objects once, provides them as context and sets up
/// client-side routing.
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    let portal = Portal::browser();
    let auth = RwSignal::new(AuthState::evaluate(&portal.guard, &portal.session));

    provide_context(portal);
    provide_context(auth);

    view! {
        <Title text="Rural Survey MIS"/>

        <Router>
            <Routes fallback=|| view! { <NotFoundPage/> }>
                <Route path=StaticSegment("") view=|| view! { <Redirect path=LOGIN_ROUTE/> }/>
                <Route path=StaticSegment("login") view=LoginPage/>
                <Route path=(StaticSegment("login"), ParamSegment("id")) view=LoginPage/>
                <Route
                    path=StaticSegment("dashboard")
                    view=|| view! { <RequireSession><DashboardPage/></RequireSession> }
                />
                <Route path=StaticSegment("500") view=ServerErrorPage/>
                <Route path=StaticSegment("404") view=NotFoundPage/>
                <Route path=ParamSegment("section") view=SectionRoute/>
            </Routes>
        </Router>
    }
}
