use super::*;

#[test]
fn login_url_joins_without_double_slash() {
    assert_eq!(login_url("https://portal.test/api/"), "https://portal.test/api/Adminrural/login");
    assert_eq!(login_url("https://portal.test/api"), "https://portal.test/api/Adminrural/login");
}

#[test]
fn login_request_serializes_credentials() {
    let body = serde_json::to_value(LoginRequest { username: "admin", password: "pw" }).unwrap();
    assert_eq!(body, serde_json::json!({ "username": "admin", "password": "pw" }));
}

#[test]
fn decode_accepted_login() {
    let body = r#"{
        "status": true,
        "statusCode": 200,
        "access_token": "tok-1",
        "message": "Welcome",
        "note": "",
        "data": {
            "userId": 7,
            "username": "admin",
            "firstName": "Asha",
            "lastName": "Devi",
            "roleId": 1,
            "roleTypeId": 2,
            "roleTypeName": "RuralAdmin",
            "districtId": 3,
            "ulbId": null,
            "panchayatId": 9
        }
    }"#;

    let LoginOutcome::Accepted { token, data, message } = LoginOutcome::decode(body).unwrap() else {
        panic!("expected accepted login");
    };
    assert_eq!(token, "tok-1");
    assert_eq!(message, "Welcome");
    assert_eq!(data.user_id, 7);
    assert_eq!(data.role_type_name, "RuralAdmin");
    assert_eq!(data.district_id, Some(3));
    assert_eq!(data.ulb_id, None);
    assert_eq!(data.panchayat_id, Some(9));
}

#[test]
fn decode_accepted_login_defaults_message() {
    let body = r#"{"status":true,"access_token":"t","data":{"userId":1,"roleTypeName":"Surveyor"}}"#;
    let LoginOutcome::Accepted { message, .. } = LoginOutcome::decode(body).unwrap() else {
        panic!("expected accepted login");
    };
    assert_eq!(message, DEFAULT_LOGIN_SUCCESS);
}

#[test]
fn decode_rejected_login_keeps_backend_message() {
    let body = r#"{"status":false,"message":"Invalid credentials"}"#;
    assert_eq!(
        LoginOutcome::decode(body).unwrap(),
        LoginOutcome::Rejected { message: "Invalid credentials".to_owned() }
    );
}

#[test]
fn decode_rejected_login_without_message_uses_default() {
    let body = r#"{"status":false,"message":"  "}"#;
    assert_eq!(
        LoginOutcome::decode(body).unwrap(),
        LoginOutcome::Rejected { message: DEFAULT_LOGIN_FAILURE.to_owned() }
    );
}

#[test]
fn decode_accepted_without_token_is_decode_error() {
    let body = r#"{"status":true,"access_token":"","data":{"userId":1}}"#;
    assert!(matches!(LoginOutcome::decode(body), Err(SessionError::Decode(_))));
}

#[test]
fn decode_accepted_without_data_is_decode_error() {
    let body = r#"{"status":true,"access_token":"tok"}"#;
    assert!(matches!(LoginOutcome::decode(body), Err(SessionError::Decode(_))));
}

#[test]
fn decode_non_json_is_decode_error() {
    assert!(matches!(LoginOutcome::decode("<html>"), Err(SessionError::Decode(_))));
}

#[test]
fn error_message_reads_message_field() {
    assert_eq!(error_message(r#"{"message":"Account locked"}"#).as_deref(), Some("Account locked"));
    assert_eq!(error_message(r#"{"error":"x"}"#), None);
    assert_eq!(error_message("Bad Gateway"), None);
}
