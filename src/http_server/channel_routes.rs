//! Channel HTTP Routes

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Json, Path, State,
    },
    http::{HeaderMap, StatusCode},
    routing::{delete, get, patch, post, put},
    Router,
};
use serde::Serialize;
use uuid::Uuid;

use super::errors::ApiResult;
use super::state::SharedState;
use super::MessageResponse;
use crate::catalog::{ChannelView, CreateChannelRequest, UpdateChannelRequest};

/// Channel routes
pub fn channel_routes() -> Router<SharedState> {
    Router::new()
        .route("/channel", post(create_handler))
        .route("/channel/:id", get(get_handler))
        .route("/userChannel/:user_id", get(by_owner_handler))
        .route("/updateChannel/:id", put(update_handler))
        .route("/deleteChannel/:id", delete(delete_handler))
        .route("/channel/:id/subscribe", patch(subscribe_handler))
        .route("/channel/:id/unsubscribe", patch(unsubscribe_handler))
}

#[derive(Debug, Serialize)]
pub struct SubscriptionResponse {
    pub message: &'static str,
    pub subscribers: u64,
}

async fn create_handler(
    State(state): State<SharedState>,
    headers: HeaderMap,
    payload: Result<Json<CreateChannelRequest>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<ChannelView>)> {
    let caller = state.caller(&headers)?;
    let Json(request) = payload?;

    let channel = state.catalog.channels.create(caller, request)?;
    Ok((
        StatusCode::CREATED,
        Json(ChannelView {
            channel_id: channel.id,
            channel,
            videos: Vec::new(),
        }),
    ))
}

async fn get_handler(
    State(state): State<SharedState>,
    path: Result<Path<Uuid>, PathRejection>,
) -> ApiResult<Json<ChannelView>> {
    let Path(id) = path?;
    Ok(Json(state.catalog.channels.get(id)?))
}

async fn by_owner_handler(
    State(state): State<SharedState>,
    path: Result<Path<Uuid>, PathRejection>,
) -> ApiResult<Json<ChannelView>> {
    let Path(user_id) = path?;
    Ok(Json(state.catalog.channels.get_by_owner(user_id)?))
}

async fn update_handler(
    State(state): State<SharedState>,
    headers: HeaderMap,
    path: Result<Path<Uuid>, PathRejection>,
    payload: Result<Json<UpdateChannelRequest>, JsonRejection>,
) -> ApiResult<Json<ChannelView>> {
    let caller = state.caller(&headers)?;
    let Path(id) = path?;
    let Json(request) = payload?;

    state.catalog.channels.update(caller, id, request)?;
    Ok(Json(state.catalog.channels.get(id)?))
}

async fn delete_handler(
    State(state): State<SharedState>,
    headers: HeaderMap,
    path: Result<Path<Uuid>, PathRejection>,
) -> ApiResult<Json<MessageResponse>> {
    let caller = state.caller(&headers)?;
    let Path(id) = path?;

    state.catalog.channels.delete(caller, id)?;
    Ok(Json(MessageResponse::new("Channel deleted")))
}

async fn subscribe_handler(
    State(state): State<SharedState>,
    headers: HeaderMap,
    path: Result<Path<Uuid>, PathRejection>,
) -> ApiResult<Json<SubscriptionResponse>> {
    let caller = state.caller(&headers)?;
    let Path(id) = path?;

    let subscribers = state.catalog.engagement.subscribe(caller, id)?;
    Ok(Json(SubscriptionResponse {
        message: "Subscribed",
        subscribers,
    }))
}

async fn unsubscribe_handler(
    State(state): State<SharedState>,
    headers: HeaderMap,
    path: Result<Path<Uuid>, PathRejection>,
) -> ApiResult<Json<SubscriptionResponse>> {
    let caller = state.caller(&headers)?;
    let Path(id) = path?;

    let subscribers = state.catalog.engagement.unsubscribe(caller, id)?;
    Ok(Json(SubscriptionResponse {
        message: "Unsubscribed",
        subscribers,
    }))
}
