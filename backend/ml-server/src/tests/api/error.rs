use crate::ApiError;

use ml_core::CoreError;
use ml_db::DbError;
use ml_mailer::MailerError;

use std::panic::Location;

use axum::response::IntoResponse;
use error_location::ErrorLocation;
use http::StatusCode;
use http_body_util::BodyExt;

fn here() -> ErrorLocation {
    ErrorLocation::from(Location::caller())
}

async fn status_and_json(error: ApiError) -> (StatusCode, serde_json::Value) {
    let response = error.into_response();
    let status = response.status();
    let body = response.into_body().collect().await.unwrap().to_bytes();
    (status, serde_json::from_slice(&body).unwrap())
}

#[tokio::test]
async fn given_not_found_when_into_response_then_404_with_json_body() {
    let (status, json) = status_and_json(ApiError::NotFound {
        message: "List not found".into(),
        location: here(),
    })
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["error"]["code"], "NOT_FOUND");
    assert_eq!(json["error"]["message"], "List not found");
    assert!(json["error"].get("field").is_none());
}

#[tokio::test]
async fn given_validation_when_into_response_then_400_with_field() {
    let (status, json) = status_and_json(ApiError::validation("Name required", "name")).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"]["code"], "VALIDATION_ERROR");
    assert_eq!(json["error"]["field"], "name");
}

#[tokio::test]
async fn given_unauthorized_when_into_response_then_401_with_basic_challenge() {
    let response = ApiError::Unauthorized {
        message: "nope".into(),
        location: here(),
    }
    .into_response();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(
        response.headers()[http::header::WWW_AUTHENTICATE],
        r#"Basic realm="Restricted""#
    );
}

#[tokio::test]
async fn given_bad_token_db_error_when_converted_then_403() {
    let error: ApiError = DbError::BadUnsubscribeToken {
        email: "a@x.com".into(),
        location: here(),
    }
    .into();

    let (status, json) = status_and_json(error).await;

    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(json["error"]["code"], "FORBIDDEN");
}

#[tokio::test]
async fn given_already_subscribed_db_error_when_converted_then_409() {
    let error: ApiError = DbError::AlreadySubscribed {
        list_id: 1,
        email: "a@x.com".into(),
        location: here(),
    }
    .into();

    let (status, _) = status_and_json(error).await;

    assert_eq!(status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn given_subscriber_not_found_db_error_when_converted_then_404() {
    let error: ApiError = DbError::SubscriberNotFound {
        list_id: 1,
        email: "a@x.com".into(),
        location: here(),
    }
    .into();

    let (status, _) = status_and_json(error).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn given_sqlx_failure_when_converted_then_500_without_details() {
    let error: ApiError = DbError::Sqlx {
        source: sqlx::Error::PoolClosed,
        location: here(),
    }
    .into();

    let (status, json) = status_and_json(error).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["error"]["message"], "Database operation failed");
}

#[tokio::test]
async fn given_broadcast_in_progress_when_converted_then_409() {
    let error: ApiError = MailerError::BroadcastInProgress {
        list_name: "news".into(),
        location: here(),
    }
    .into();

    let (status, json) = status_and_json(error).await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert!(json["error"]["message"].as_str().unwrap().contains("news"));
}

#[tokio::test]
async fn given_missing_outbound_domain_when_converted_then_500() {
    let error: ApiError = MailerError::MissingOutboundDomain { location: here() }.into();

    let (status, json) = status_and_json(error).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["error"]["code"], "INTERNAL_ERROR");
}

#[tokio::test]
async fn given_invalid_email_core_error_when_converted_then_validation_on_email() {
    let error: ApiError = CoreError::InvalidEmail {
        value: "nope".into(),
        location: here(),
    }
    .into();

    let (status, json) = status_and_json(error).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"]["field"], "email");
}
