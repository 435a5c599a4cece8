//! Public subscribe / unsubscribe handlers

use crate::{ApiError, ApiResult, AppState, SubscribeRequest};

use ml_core::validate_email;
use ml_db::{MailingListRepository, SubscriptionRepository};

use axum::{
    Json,
    extract::{Path, State},
    http::{HeaderMap, StatusCode, header},
    response::{IntoResponse, Response},
};
use log::info;

/// POST /subscribe
///
/// Redirects back to the page the form was posted from.
pub async fn subscribe(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(request): Json<SubscribeRequest>,
) -> ApiResult<Response> {
    let email = request.email.trim();
    validate_email(email)?;

    let list_id = MailingListRepository::new(state.pool.clone())
        .find_id_by_name(&request.list)
        .await?
        .ok_or_else(|| {
            ApiError::bad_request(format!("Provided invalid mailing list: {}", request.list))
        })?;

    SubscriptionRepository::new(state.pool.clone())
        .subscribe(list_id, email)
        .await?;
    info!("{email} subscribed to '{}'", request.list);

    let back = headers
        .get(header::REFERER)
        .and_then(|v| v.to_str().ok())
        .filter(|v| !v.is_empty())
        .unwrap_or("/")
        .to_string();

    Ok((StatusCode::FOUND, [(header::LOCATION, back)]).into_response())
}

/// GET /unsubscribe/{list}/{email}/{token}
pub async fn unsubscribe(
    State(state): State<AppState>,
    Path((list_name, email, token)): Path<(String, String, String)>,
) -> ApiResult<&'static str> {
    let list_id = MailingListRepository::new(state.pool.clone())
        .find_id_by_name(&list_name)
        .await?
        .ok_or_else(|| {
            ApiError::bad_request(format!("Provided invalid mailing list: {list_name}"))
        })?;

    SubscriptionRepository::new(state.pool.clone())
        .unsubscribe(list_id, &email, &token)
        .await?;
    info!("{email} unsubscribed from '{list_name}'");

    Ok("You have been unsubscribed")
}
