use super::*;

#[test]
fn parse_fixed_routes() {
    assert_eq!(AppRoute::parse("/"), AppRoute::Root);
    assert_eq!(AppRoute::parse(""), AppRoute::Root);
    assert_eq!(AppRoute::parse("/login"), AppRoute::Login);
    assert_eq!(AppRoute::parse("/login/tactv"), AppRoute::LoginWith("tactv".to_owned()));
    assert_eq!(AppRoute::parse("/dashboard"), AppRoute::Dashboard);
    assert_eq!(AppRoute::parse("/500"), AppRoute::ServerError);
    assert_eq!(AppRoute::parse("/404"), AppRoute::NotFound);
}

#[test]
fn parse_sections() {
    for section in Section::ALL {
        let path = format!("/{}", section.slug());
        assert_eq!(AppRoute::parse(&path), AppRoute::Section(section));
    }
}

#[test]
fn parse_ignores_query_fragment_and_trailing_slash() {
    assert_eq!(AppRoute::parse("/dashboard/?tab=1"), AppRoute::Dashboard);
    assert_eq!(AppRoute::parse("/mis-report#top"), AppRoute::Section(Section::MisReport));
}

#[test]
fn unmatched_paths_are_not_found() {
    assert_eq!(AppRoute::parse("/unknown"), AppRoute::NotFound);
    assert_eq!(AppRoute::parse("/dashboard/extra"), AppRoute::NotFound);
    assert_eq!(AppRoute::parse("/login/a/b"), AppRoute::NotFound);
}

#[test]
fn only_dashboard_and_sections_need_a_session() {
    assert!(AppRoute::Dashboard.requires_session());
    assert!(AppRoute::Section(Section::HouseholdList).requires_session());
    assert!(!AppRoute::Login.requires_session());
    assert!(!AppRoute::LoginWith("x".to_owned()).requires_session());
    assert!(!AppRoute::Root.requires_session());
    assert!(!AppRoute::NotFound.requires_session());
    assert!(!AppRoute::ServerError.requires_session());
}

#[test]
fn path_round_trips_through_parse() {
    let routes = [
        AppRoute::Login,
        AppRoute::LoginWith("tactv".to_owned()),
        AppRoute::Dashboard,
        AppRoute::Section(Section::UserMaster),
        AppRoute::ServerError,
    ];
    for route in routes {
        assert_eq!(AppRoute::parse(&route.path()), route);
    }
}

#[test]
fn from_slug_rejects_unknown() {
    assert_eq!(Section::from_slug("reports"), Some(Section::Reports));
    assert_eq!(Section::from_slug("Reports"), None);
}
