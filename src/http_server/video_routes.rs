//! Video HTTP Routes
//!
//! Uploads, listings and reactions.

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection, QueryRejection},
        Json, Path, Query, State,
    },
    http::{HeaderMap, StatusCode},
    routing::{get, patch, post},
    Router,
};
use serde::Serialize;
use uuid::Uuid;

use super::errors::ApiResult;
use super::state::SharedState;
use super::MessageResponse;
use crate::catalog::{ReactionCounts, UpdateVideoRequest, UploadVideoRequest, Video, VideoQuery};

/// Video routes
pub fn video_routes() -> Router<SharedState> {
    Router::new()
        .route("/video", post(upload_handler))
        .route("/videos", get(list_handler))
        .route(
            "/video/:id",
            get(get_handler).put(update_handler).delete(delete_handler),
        )
        .route("/video/:id/like", patch(like_handler))
        .route("/video/:id/unlike", patch(unlike_handler))
        .route("/video/:id/dislike", patch(dislike_handler))
        .route("/video/:id/undislike", patch(undislike_handler))
        .route("/video/:id/view", patch(view_handler))
}

#[derive(Debug, Serialize)]
pub struct ViewsResponse {
    pub views: u64,
}

async fn upload_handler(
    State(state): State<SharedState>,
    headers: HeaderMap,
    payload: Result<Json<UploadVideoRequest>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<Video>)> {
    let caller = state.caller(&headers)?;
    let Json(request) = payload?;

    let video = state.catalog.videos.upload(caller, request)?;
    Ok((StatusCode::CREATED, Json(video)))
}

async fn list_handler(
    State(state): State<SharedState>,
    query: Result<Query<VideoQuery>, QueryRejection>,
) -> ApiResult<Json<Vec<Video>>> {
    let Query(query) = query?;
    Ok(Json(state.catalog.videos.list(&query)?))
}

async fn get_handler(
    State(state): State<SharedState>,
    path: Result<Path<Uuid>, PathRejection>,
) -> ApiResult<Json<Video>> {
    let Path(id) = path?;
    Ok(Json(state.catalog.videos.get(id)?))
}

async fn update_handler(
    State(state): State<SharedState>,
    headers: HeaderMap,
    path: Result<Path<Uuid>, PathRejection>,
    payload: Result<Json<UpdateVideoRequest>, JsonRejection>,
) -> ApiResult<Json<Video>> {
    let caller = state.caller(&headers)?;
    let Path(id) = path?;
    let Json(request) = payload?;

    Ok(Json(state.catalog.videos.update(caller, id, request)?))
}

async fn delete_handler(
    State(state): State<SharedState>,
    headers: HeaderMap,
    path: Result<Path<Uuid>, PathRejection>,
) -> ApiResult<Json<MessageResponse>> {
    let caller = state.caller(&headers)?;
    let Path(id) = path?;

    state.catalog.videos.delete(caller, id)?;
    Ok(Json(MessageResponse::new("Video deleted")))
}

async fn like_handler(
    State(state): State<SharedState>,
    headers: HeaderMap,
    path: Result<Path<Uuid>, PathRejection>,
) -> ApiResult<Json<ReactionCounts>> {
    let caller = state.caller(&headers)?;
    let Path(id) = path?;
    Ok(Json(state.catalog.engagement.like(caller, id)?))
}

async fn unlike_handler(
    State(state): State<SharedState>,
    headers: HeaderMap,
    path: Result<Path<Uuid>, PathRejection>,
) -> ApiResult<Json<ReactionCounts>> {
    let caller = state.caller(&headers)?;
    let Path(id) = path?;
    Ok(Json(state.catalog.engagement.unlike(caller, id)?))
}

async fn dislike_handler(
    State(state): State<SharedState>,
    headers: HeaderMap,
    path: Result<Path<Uuid>, PathRejection>,
) -> ApiResult<Json<ReactionCounts>> {
    let caller = state.caller(&headers)?;
    let Path(id) = path?;
    Ok(Json(state.catalog.engagement.dislike(caller, id)?))
}

async fn undislike_handler(
    State(state): State<SharedState>,
    headers: HeaderMap,
    path: Result<Path<Uuid>, PathRejection>,
) -> ApiResult<Json<ReactionCounts>> {
    let caller = state.caller(&headers)?;
    let Path(id) = path?;
    Ok(Json(state.catalog.engagement.undislike(caller, id)?))
}

/// Anonymous view counter
async fn view_handler(
    State(state): State<SharedState>,
    path: Result<Path<Uuid>, PathRejection>,
) -> ApiResult<Json<ViewsResponse>> {
    let Path(id) = path?;
    let views = state.catalog.engagement.record_view(id)?;
    Ok(Json(ViewsResponse { views }))
}
