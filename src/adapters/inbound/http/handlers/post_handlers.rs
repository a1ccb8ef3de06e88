use axum::{extract::State, http::StatusCode, Json};

use crate::{
    adapters::inbound::http::{
        dto::{ApiErrorDto, CreatePostDto, CreatePostResponseDto, PostListResponseDto},
        router::AppState,
    },
    domain::models::CreatePostRequest,
};

/// Handle gallery listing
pub async fn list_posts(
    State(app_state): State<AppState>,
) -> Result<Json<PostListResponseDto>, (StatusCode, Json<ApiErrorDto>)> {
    let posts = app_state.post_service.list_posts().await.map_err(|e| {
        let status_code = StatusCode::from(&e);
        (status_code, Json(ApiErrorDto::from_post_error(&e)))
    })?;

    Ok(Json(PostListResponseDto::new(posts)))
}

/// Handle post publication.
///
/// A clean publish returns 201; a publish that degraded to inline photo
/// storage returns 200 with the warning attached.
pub async fn create_post(
    State(app_state): State<AppState>,
    Json(request): Json<CreatePostDto>,
) -> Result<(StatusCode, Json<CreatePostResponseDto>), (StatusCode, Json<ApiErrorDto>)> {
    let receipt = app_state
        .post_service
        .create_post(CreatePostRequest {
            name: request.name,
            prompt: request.prompt,
            photo: request.photo,
        })
        .await
        .map_err(|e| {
            let status_code = StatusCode::from(&e);
            (status_code, Json(ApiErrorDto::from_post_error(&e)))
        })?;

    let status_code = if receipt.warning.is_some() {
        StatusCode::OK
    } else {
        StatusCode::CREATED
    };

    Ok((status_code, Json(receipt.into())))
}
