//! Portal route table.
//!
//! DESIGN
//! ======
//! Route matching lives here rather than in the UI crate so the CLI and the
//! tests can answer "does this path need a session?" without a router.

#[cfg(test)]
#[path = "routes_test.rs"]
mod routes_test;

/// Feature sections loaded behind the route guard.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Section {
    SurveyDashboard,
    SurveyUsers,
    PatIndicator,
    UserMaster,
    SurveyResults,
    Reports,
    MisReport,
    PdsDetails,
    HouseholdList,
}

impl Section {
    pub const ALL: [Self; 9] = [
        Self::SurveyDashboard,
        Self::SurveyUsers,
        Self::PatIndicator,
        Self::UserMaster,
        Self::SurveyResults,
        Self::Reports,
        Self::MisReport,
        Self::PdsDetails,
        Self::HouseholdList,
    ];

    /// URL segment of the section.
    #[must_use]
    pub fn slug(self) -> &'static str {
        match self {
            Self::SurveyDashboard => "survey-dashboard",
            Self::SurveyUsers => "survey-users",
            Self::PatIndicator => "pat-indicator",
            Self::UserMaster => "user-master",
            Self::SurveyResults => "survey-results",
            Self::Reports => "reports",
            Self::MisReport => "mis-report",
            Self::PdsDetails => "pds-details",
            Self::HouseholdList => "household-list",
        }
    }

    #[must_use]
    pub fn title(self) -> &'static str {
        match self {
            Self::SurveyDashboard => "Survey Dashboard",
            Self::SurveyUsers => "Survey Users",
            Self::PatIndicator => "PAT Vulnerability Indicator",
            Self::UserMaster => "User Master",
            Self::SurveyResults => "Survey Results",
            Self::Reports => "Reports",
            Self::MisReport => "MIS Report",
            Self::PdsDetails => "PDS Details",
            Self::HouseholdList => "Household List",
        }
    }

    #[must_use]
    pub fn from_slug(slug: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.slug() == slug)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AppRoute {
    /// `/`; redirects to the login view.
    Root,
    Login,
    /// `/login/:id`
    LoginWith(String),
    Dashboard,
    Section(Section),
    ServerError,
    NotFound,
}

impl AppRoute {
    /// Match a path (query string and fragment ignored).
    #[must_use]
    pub fn parse(path: &str) -> Self {
        let path = path.split(|c: char| c == '?' || c == '#').next().unwrap_or_default();
        let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
        match segments.as_slice() {
            [] => Self::Root,
            ["login"] => Self::Login,
            ["login", id] => Self::LoginWith((*id).to_owned()),
            ["dashboard"] => Self::Dashboard,
            ["500"] => Self::ServerError,
            ["404"] => Self::NotFound,
            [slug] => Section::from_slug(slug).map_or(Self::NotFound, Self::Section),
            _ => Self::NotFound,
        }
    }

    /// Canonical path of the route.
    #[must_use]
    pub fn path(&self) -> String {
        match self {
            Self::Root => "/".to_owned(),
            Self::Login => "/login".to_owned(),
            Self::LoginWith(id) => format!("/login/{id}"),
            Self::Dashboard => "/dashboard".to_owned(),
            Self::Section(section) => format!("/{}", section.slug()),
            Self::ServerError => "/500".to_owned(),
            Self::NotFound => "/404".to_owned(),
        }
    }

    /// Whether the route guard runs before entering this route.
    #[must_use]
    pub fn requires_session(&self) -> bool {
        matches!(self, Self::Dashboard | Self::Section(_))
    }
}
