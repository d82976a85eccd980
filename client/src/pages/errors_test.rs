use super::*;

#[test]
fn back_target_prefers_recorded_route() {
    assert_eq!(back_target(Some("/mis-report".to_owned())), "/mis-report");
}

#[test]
fn back_target_falls_back_to_login() {
    assert_eq!(back_target(None), "/login");
    assert_eq!(back_target(Some(String::new())), "/login");
    assert_eq!(back_target(Some("/500".to_owned())), "/login");
}
