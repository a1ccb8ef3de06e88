use axum::{extract::State, http::StatusCode, Json};

use crate::adapters::inbound::http::{
    dto::{ApiErrorDto, GenerateImageDto, MessageDto, PhotoResponseDto},
    router::AppState,
};

/// Handle the generation API greeting
pub async fn generation_info() -> Json<MessageDto> {
    Json(MessageDto::new("Hello from the image generation API!"))
}

/// Handle an image generation request
pub async fn generate_image(
    State(app_state): State<AppState>,
    Json(request): Json<GenerateImageDto>,
) -> Result<Json<PhotoResponseDto>, (StatusCode, Json<ApiErrorDto>)> {
    let image = app_state
        .generation_service
        .generate_image(&request.prompt)
        .await
        .map_err(|e| {
            let status_code = StatusCode::from(&e);
            (status_code, Json(ApiErrorDto::from_generation_error(&e)))
        })?;

    Ok(Json(PhotoResponseDto {
        photo: image.base64,
    }))
}
