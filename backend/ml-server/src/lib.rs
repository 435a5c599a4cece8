pub mod api;
pub mod app_state;
pub mod auth;
pub mod error;
pub mod health;
pub mod logger;
pub mod routes;

#[cfg(test)]
mod tests;

pub use api::{
    broadcasts::{broadcasts::enqueue_mail, enqueue_mail_request::EnqueueMailRequest},
    error::ApiError,
    error::Result as ApiResult,
    lists::{
        create_list_request::CreateListRequest,
        list_detail_response::ListDetailResponse,
        list_summary_response::ListSummaryResponse,
        lists::{cancel_broadcast, create_list, display_list, list_overview},
        subscriber_dto::SubscriberDto,
    },
    subscriptions::{
        subscribe_request::SubscribeRequest,
        subscriptions::{subscribe, unsubscribe},
    },
    web_root::{display_path, resolve_web_root},
};
pub use app_state::AppState;
pub use error::{Result, ServerError};

pub use crate::routes::build_router;
