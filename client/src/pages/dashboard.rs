//! Dashboard page: signed-in identity, section links and logout.
//!
//! SYSTEM CONTEXT
//! ==============
//! This is the authenticated landing route. It renders from the reactive
//! `AuthState` and reads nothing from the network.

#[cfg(test)]
#[path = "dashboard_test.rs"]
mod dashboard_test;

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::use_navigate;
use session::authorizer::LOGIN_ROUTE;
use session::routes::Section;

use crate::state::auth::AuthState;
use crate::state::portal::Portal;

/// Languages offered by the header toggle, as (code, label).
const LANGUAGES: [(&str, &str); 2] = [("en", "English"), ("ta", "தமிழ்")];

/// Sections listed on the dashboard, in menu order.
fn section_links() -> Vec<(String, &'static str)> {
    Section::ALL.iter().map(|s| (format!("/{}", s.slug()), s.title())).collect()
}

/// The language the toggle switches to from `current`.
fn next_language(current: &str) -> &'static str {
    let index = LANGUAGES.iter().position(|(code, _)| *code == current).unwrap_or(0);
    LANGUAGES[(index + 1) % LANGUAGES.len()].0
}

fn language_label(code: &str) -> &'static str {
    LANGUAGES.iter().find(|(c, _)| *c == code).map_or(LANGUAGES[0].1, |&(_, label)| label)
}

#[component]
pub fn DashboardPage() -> impl IntoView {
    let portal = expect_context::<Portal>();
    let auth = expect_context::<RwSignal<AuthState>>();
    let navigate = use_navigate();
    let busy = RwSignal::new(false);
    let language = RwSignal::new(portal.preferences().language());

    let display_name = move || auth.with(AuthState::display_name);
    let role = move || auth.with(|s| s.user.as_ref().map(|u| u.role.clone()).unwrap_or_default());
    let department = move || auth.with(|s| s.user.as_ref().map(|u| u.department.clone()).unwrap_or_default());
    let permissions = move || auth.with(|s| s.user.as_ref().map(|u| u.permissions.clone()).unwrap_or_default());

    let prefs_portal = portal.clone();
    let on_language = move |_| {
        let next = next_language(&language.get());
        match prefs_portal.preferences().set_language(next) {
            Ok(()) => language.set(next.to_owned()),
            Err(e) => {
                #[cfg(feature = "csr")]
                log::warn!("language preference not saved: {e}");
                #[cfg(not(feature = "csr"))]
                let _ = e;
            }
        }
    };

    let on_logout = move |_| {
        if busy.get() {
            return;
        }
        busy.set(true);

        #[cfg(feature = "csr")]
        {
            let portal = portal.clone();
            let navigate = navigate.clone();
            leptos::task::spawn_local(async move {
                match portal.session.log_out().await {
                    Ok(ack) => log::info!("{}", ack.message),
                    Err(e) => log::warn!("logout did not clear storage: {e}"),
                }
                auth.set(AuthState::signed_out());
                busy.set(false);
                navigate(LOGIN_ROUTE, NavigateOptions::default());
            });
        }
        #[cfg(not(feature = "csr"))]
        {
            portal.session.clear_session();
            auth.set(AuthState::signed_out());
            busy.set(false);
            navigate(LOGIN_ROUTE, NavigateOptions::default());
        }
    };

    view! {
        <div class="dashboard-page">
            <header class="dashboard-header">
                <h1>"Survey Dashboard"</h1>
                <div class="dashboard-header__actions">
                    <button class="btn" on:click=on_language>
                        {move || language_label(&language.get())}
                    </button>
                    <button class="btn btn--primary" on:click=on_logout disabled=move || busy.get()>
                        "Logout"
                    </button>
                </div>
            </header>
            <section class="dashboard-identity">
                <h2>{display_name}</h2>
                <p>{role}" · "{department}</p>
                <ul class="dashboard-permissions">
                    {move || permissions().into_iter().map(|p| view! { <li>{p}</li> }).collect_view()}
                </ul>
            </section>
            <nav class="dashboard-sections">
                <ul>
                    {section_links()
                        .into_iter()
                        .map(|(href, title)| view! { <li><a href=href>{title}</a></li> })
                        .collect_view()}
                </ul>
            </nav>
        </div>
    }
}

/// Placeholder for a report screen; only the frame and its guard live here.
#[component]
pub fn SectionPage(section: Section) -> impl IntoView {
    view! {
        <div class="section-page">
            <header class="dashboard-header">
                <h1>{section.title()}</h1>
                <a class="btn" href="/dashboard">"Back to dashboard"</a>
            </header>
        </div>
    }
}
