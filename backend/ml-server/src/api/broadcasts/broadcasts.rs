//! Admin handler that starts a broadcast

use crate::{ApiError, ApiResult, AppState, EnqueueMailRequest, display_path, resolve_web_root};

use ml_core::BroadcastJob;
use ml_db::{MailingListRepository, SubscriptionRepository};

use axum::{
    Form,
    extract::State,
    http::HeaderMap,
    response::Redirect,
};
use log::info;

/// POST /admin/enqueue-mail
///
/// Snapshots the list's subscribers and hands the job to the dispatcher.
/// Returns as soon as the broadcast is accepted; sending happens after the
/// grace period on a background task.
pub async fn enqueue_mail(
    State(state): State<AppState>,
    headers: HeaderMap,
    Form(request): Form<EnqueueMailRequest>,
) -> ApiResult<Redirect> {
    let list_name = request.list_name.trim();
    let subject = request.subject.trim();
    let body = request.body.trim();

    for (value, field) in [(list_name, "list_name"), (subject, "subject"), (body, "body")] {
        if value.is_empty() {
            return Err(ApiError::validation(format!("{field} is required"), field));
        }
    }

    let list_id = MailingListRepository::new(state.pool.clone())
        .require_id_by_name(list_name)
        .await?;
    let subscribers = SubscriptionRepository::new(state.pool.clone())
        .list_subscribers(list_id)
        .await?;

    let web_root = resolve_web_root(state.public_url.as_deref(), &headers)?;
    let job = BroadcastJob::new(list_name, subject, body, subscribers, web_root);

    // The join handle is dropped; the task runs detached.
    let _ = state.dispatcher.dispatch(job)?;
    info!("Broadcast to '{list_name}' enqueued");

    Ok(Redirect::to(&display_path(list_name)))
}
