//! Admin handlers for mailing lists

use crate::{
    ApiError, ApiResult, AppState, CreateListRequest, ListDetailResponse, ListSummaryResponse,
    SubscriberDto, display_path,
};

use ml_db::{MailingListRepository, SubscriptionRepository};

use axum::{
    Form, Json,
    extract::{Path, State},
    response::Redirect,
};
use log::info;

/// GET /admin
///
/// All lists with their subscriber counts
pub async fn list_overview(State(state): State<AppState>) -> ApiResult<Json<ListSummaryResponse>> {
    let repo = MailingListRepository::new(state.pool.clone());
    let lists = repo.find_all_summaries().await?;

    Ok(Json(ListSummaryResponse { lists }))
}

/// GET /admin/list/display/{list}
pub async fn display_list(
    State(state): State<AppState>,
    Path(list_name): Path<String>,
) -> ApiResult<Json<ListDetailResponse>> {
    let list = MailingListRepository::new(state.pool.clone())
        .find_by_name(&list_name)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("Mailing list '{list_name}' not found")))?;

    let subscribers = SubscriptionRepository::new(state.pool.clone())
        .list_subscribers(list.id)
        .await?;

    let registry = state.dispatcher.registry();

    Ok(Json(ListDetailResponse {
        has_pending_broadcast: registry.has_pending(&list.name),
        is_sending: registry.is_sending(&list.name),
        name: list.name,
        description: list.description,
        created_at: list.created_at.timestamp(),
        subscribers: subscribers.into_iter().map(SubscriberDto::from).collect(),
    }))
}

/// POST /admin/create-list
///
/// Creating a list that already exists is a no-op.
pub async fn create_list(
    State(state): State<AppState>,
    Form(request): Form<CreateListRequest>,
) -> ApiResult<Redirect> {
    let name = request.name.trim();
    let description = request.description.trim();

    if name.is_empty() {
        return Err(ApiError::validation("List name is required", "name"));
    }
    if description.is_empty() {
        return Err(ApiError::validation(
            "List description is required",
            "description",
        ));
    }

    let id = MailingListRepository::new(state.pool.clone())
        .create(name, description)
        .await?;
    info!("Mailing list '{name}' ready ({id})");

    Ok(Redirect::to("/admin"))
}

/// GET /admin/list/cancel/{list}
pub async fn cancel_broadcast(
    State(state): State<AppState>,
    Path(list_name): Path<String>,
) -> Redirect {
    if state.dispatcher.registry().cancel(&list_name) {
        info!("Admin cancelled pending broadcast for '{list_name}'");
    } else {
        info!("Admin cancel for '{list_name}' found no pending broadcast");
    }

    Redirect::to(&display_path(&list_name))
}
