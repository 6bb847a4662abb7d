//! Tests for the identity service.

use std::sync::Arc;
use std::time::Duration;

use super::*;
use crate::domain::ports::{InMemoryUserRepository, RecordingNotificationGateway};
use crate::domain::ErrorCode;

fn register_request(username: &str) -> RegisterUserRequest {
    RegisterUserRequest {
        username: username.to_owned(),
        password: "correct horse battery".to_owned(),
        email: format!("{username}@example.com"),
        phone_number: "07700900000".to_owned(),
    }
}

fn service_with_recorder() -> (
    IdentityServiceImpl<InMemoryUserRepository>,
    RecordingNotificationGateway,
) {
    let recorder = RecordingNotificationGateway::new();
    let service = IdentityServiceImpl::new(
        Arc::new(InMemoryUserRepository::new()),
        Arc::new(recorder.clone()),
    );
    (service, recorder)
}

async fn wait_for_send(recorder: &RecordingNotificationGateway) -> Vec<(String, String)> {
    // The verification send runs on a detached task; poll briefly.
    for _ in 0..50 {
        let sent = recorder.sent();
        if !sent.is_empty() {
            return sent;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    recorder.sent()
}

#[tokio::test]
async fn register_then_authenticate_round_trips() {
    let (service, _) = service_with_recorder();
    let user_id = service
        .register(register_request("morag"))
        .await
        .expect("register");

    let authenticated = service
        .authenticate(&Credentials {
            username: "morag".to_owned(),
            password: "correct horse battery".to_owned(),
        })
        .await
        .expect("authenticate");
    assert_eq!(authenticated, user_id);
}

#[tokio::test]
async fn register_sends_a_six_digit_verification_code() {
    let (service, recorder) = service_with_recorder();
    service
        .register(register_request("morag"))
        .await
        .expect("register");

    let sent = wait_for_send(&recorder).await;
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].0, "07700900000");
    assert_eq!(sent[0].1.len(), 6);
    assert!(sent[0].1.chars().all(|c| c.is_ascii_digit()));
}

#[tokio::test]
async fn duplicate_username_is_a_conflict() {
    let (service, _) = service_with_recorder();
    service
        .register(register_request("morag"))
        .await
        .expect("first registration");

    let err = service
        .register(register_request("morag"))
        .await
        .expect_err("duplicate rejected");
    assert_eq!(err.code(), ErrorCode::Conflict);
}

#[tokio::test]
async fn short_passwords_are_rejected() {
    let (service, _) = service_with_recorder();
    let mut request = register_request("morag");
    request.password = "short".to_owned();

    let err = service.register(request).await.expect_err("weak password");
    assert_eq!(err.code(), ErrorCode::InvalidRequest);
    assert_eq!(err.details().expect("details")["field"], "password");
}

#[tokio::test]
async fn wrong_password_and_unknown_user_are_indistinguishable() {
    let (service, _) = service_with_recorder();
    service
        .register(register_request("morag"))
        .await
        .expect("register");

    let wrong_password = service
        .authenticate(&Credentials {
            username: "morag".to_owned(),
            password: "not the password".to_owned(),
        })
        .await
        .expect_err("wrong password");
    let unknown_user = service
        .authenticate(&Credentials {
            username: "nobody".to_owned(),
            password: "whatever password".to_owned(),
        })
        .await
        .expect_err("unknown user");

    assert_eq!(wrong_password, unknown_user);
    assert_eq!(wrong_password.code(), ErrorCode::Unauthorized);
}

#[tokio::test]
async fn change_password_requires_the_old_one() {
    let (service, _) = service_with_recorder();
    let user_id = service
        .register(register_request("morag"))
        .await
        .expect("register");

    let err = service
        .change_password(user_id, "wrong old password", "a brand new password")
        .await
        .expect_err("old password checked");
    assert_eq!(err.code(), ErrorCode::InvalidRequest);

    service
        .change_password(user_id, "correct horse battery", "a brand new password")
        .await
        .expect("change password");
    service
        .authenticate(&Credentials {
            username: "morag".to_owned(),
            password: "a brand new password".to_owned(),
        })
        .await
        .expect("new password works");
}

#[tokio::test]
async fn password_reset_is_success_shaped_for_any_email() {
    let (service, _) = service_with_recorder();
    service
        .register(register_request("morag"))
        .await
        .expect("register");

    service
        .request_password_reset("morag@example.com")
        .await
        .expect("known email");
    service
        .request_password_reset("stranger@example.com")
        .await
        .expect("unknown email");
}
