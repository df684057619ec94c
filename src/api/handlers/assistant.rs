use axum::{extract::State, Extension, Json};
use validator::Validate;

use crate::{
    api::{extract::ApiJson, middleware::auth::CurrentUser, state::AppState},
    domain::{ChatbotRequest, GenerateRequest, GeneratedContent, PrioritizeRequest, PriorityAssessment},
    error::Result,
    service::chatbot::ChatbotReply,
};

pub async fn chatbot(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
    ApiJson(request): ApiJson<ChatbotRequest>,
) -> Result<Json<ChatbotReply>> {
    request.validate()?;

    let department = request.department.unwrap_or(current.user.department);

    let reply = state
        .service_context
        .chatbot_service
        .reply(&current.viewer(), &request.message, request.language, department)
        .await?;

    Ok(Json(reply))
}

pub async fn generate(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<GenerateRequest>,
) -> Result<Json<GeneratedContent>> {
    request.validate()?;

    let generated = state.service_context.ai_service.generate(&request).await?;

    Ok(Json(generated))
}

pub async fn prioritize(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<PrioritizeRequest>,
) -> Result<Json<PriorityAssessment>> {
    let assessment = state.service_context.ai_service.prioritize(&request).await?;

    Ok(Json(assessment))
}
