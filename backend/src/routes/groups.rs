//! Gym group API routes

use super::extract::{validated, AppJson, AppPath};
use crate::auth::AuthUser;
use crate::error::ApiResult;
use crate::state::AppState;
use axum::{extract::State, http::StatusCode, routing::get, Json, Router};
use gym_groups_shared::{
    GroupMembersResponse, GymPath, MemberPath, MessageResponse, MyGroupResponse, StatusResponse,
    UpdateStatusRequest,
};

/// Create group routes
pub fn group_routes() -> Router<AppState> {
    Router::new()
        .route("/my", get(get_my_group))
        .route(
            "/:gym_id/members",
            get(get_group_members).post(add_user_to_gym),
        )
        .route(
            "/:gym_id/members/:user_id/status",
            get(get_user_status).put(update_user_status),
        )
}

/// GET /groups/:gym_id/members - List members of a gym's group
async fn get_group_members(
    State(state): State<AppState>,
    AppPath(path): AppPath<GymPath>,
) -> ApiResult<Json<GroupMembersResponse>> {
    let path = validated(path)?;

    let members = state.groups().get_group_members(&path.gym_id).await?;

    Ok(Json(GroupMembersResponse { members }))
}

/// GET /groups/my - Caller's own group and its members
///
/// # Authentication
/// Requires valid Bearer token in Authorization header.
async fn get_my_group(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<MyGroupResponse>> {
    let (group, members) = state.groups().get_user_group(&auth.user_id).await?;

    Ok(Json(MyGroupResponse { group, members }))
}

/// GET /groups/:gym_id/members/:user_id/status - Membership status
async fn get_user_status(
    State(state): State<AppState>,
    AppPath(path): AppPath<MemberPath>,
) -> ApiResult<Json<StatusResponse>> {
    let path = validated(path)?;

    let status = state
        .groups()
        .get_status(&path.user_id, &path.gym_id)
        .await?;

    Ok(Json(StatusResponse { status }))
}

/// PUT /groups/:gym_id/members/:user_id/status - Update membership status
async fn update_user_status(
    State(state): State<AppState>,
    AppPath(path): AppPath<MemberPath>,
    AppJson(req): AppJson<UpdateStatusRequest>,
) -> ApiResult<Json<MessageResponse>> {
    let path = validated(path)?;

    state
        .groups()
        .update_status(&path.user_id, &path.gym_id, &req.status)
        .await?;

    Ok(Json(MessageResponse::new("Status updated successfully")))
}

/// POST /groups/:gym_id/members - Add the caller to a gym's group
///
/// # Authentication
/// Requires valid Bearer token in Authorization header.
async fn add_user_to_gym(
    State(state): State<AppState>,
    auth: AuthUser,
    AppPath(path): AppPath<GymPath>,
) -> ApiResult<(StatusCode, Json<MessageResponse>)> {
    let path = validated(path)?;

    state
        .groups()
        .add_user_to_gym(&auth.user_id, &path.gym_id)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(MessageResponse::new("User added to gym successfully")),
    ))
}
