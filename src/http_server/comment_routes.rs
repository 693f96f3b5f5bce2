//! Comment HTTP Routes

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Json, Path, State,
    },
    http::{HeaderMap, StatusCode},
    routing::{get, post},
    Router,
};
use uuid::Uuid;

use super::errors::ApiResult;
use super::state::SharedState;
use super::MessageResponse;
use crate::catalog::{Comment, CommentView, EditCommentRequest, PostCommentRequest};

/// Comment routes
///
/// `GET /comment/:id` takes a video id; `PATCH` and `DELETE` take a comment id.
pub fn comment_routes() -> Router<SharedState> {
    Router::new().route("/comment", post(post_handler)).route(
        "/comment/:id",
        get(list_handler).patch(edit_handler).delete(delete_handler),
    )
}

async fn post_handler(
    State(state): State<SharedState>,
    headers: HeaderMap,
    payload: Result<Json<PostCommentRequest>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<Comment>)> {
    let caller = state.caller(&headers)?;
    let Json(request) = payload?;

    let comment = state.catalog.comments.post(caller, request)?;
    Ok((StatusCode::CREATED, Json(comment)))
}

async fn list_handler(
    State(state): State<SharedState>,
    path: Result<Path<Uuid>, PathRejection>,
) -> ApiResult<Json<Vec<CommentView>>> {
    let Path(video_id) = path?;
    Ok(Json(state.catalog.comments.list_for_video(video_id)?))
}

async fn edit_handler(
    State(state): State<SharedState>,
    headers: HeaderMap,
    path: Result<Path<Uuid>, PathRejection>,
    payload: Result<Json<EditCommentRequest>, JsonRejection>,
) -> ApiResult<Json<Comment>> {
    let caller = state.caller(&headers)?;
    let Path(id) = path?;
    let Json(request) = payload?;

    Ok(Json(state.catalog.comments.edit(caller, id, request)?))
}

async fn delete_handler(
    State(state): State<SharedState>,
    headers: HeaderMap,
    path: Result<Path<Uuid>, PathRejection>,
) -> ApiResult<Json<MessageResponse>> {
    let caller = state.caller(&headers)?;
    let Path(id) = path?;

    state.catalog.comments.delete(caller, id)?;
    Ok(Json(MessageResponse::new("Comment deleted")))
}
