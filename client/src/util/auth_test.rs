use super::*;
use session::UserProfile;

fn user() -> UserProfile {
    UserProfile {
        id: 1,
        username: "admin".to_owned(),
        email: "admin@tnilp.com".to_owned(),
        full_name: "Rural Admin".to_owned(),
        role: "RuralAdmin".to_owned(),
        permissions: Vec::new(),
        department: "Survey Management".to_owned(),
        last_login: 0,
        is_active: true,
        district_id: None,
        ulb_id: None,
        panchayat_id: None,
    }
}

#[test]
fn should_redirect_unauth_when_not_loading_and_signed_out() {
    assert!(should_redirect_unauth(&AuthState::signed_out()));
}

#[test]
fn should_not_redirect_while_loading() {
    let state = AuthState { user: None, authenticated: false, loading: true };
    assert!(!should_redirect_unauth(&state));
}

#[test]
fn should_not_redirect_when_signed_in() {
    assert!(!should_redirect_unauth(&AuthState::signed_in(user())));
}

#[test]
fn authenticated_without_readable_profile_stays() {
    let state = AuthState { user: None, authenticated: true, loading: false };
    assert!(!should_redirect_unauth(&state));
}
