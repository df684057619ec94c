use axum::{
    extract::State,
    http::StatusCode,
    Extension,
    Json,
};
use serde_json::{json, Value};
use uuid::Uuid;
use validator::Validate;

use crate::{
    api::{
        extract::{ApiJson, ApiPath, ApiQuery},
        middleware::auth::CurrentUser,
        state::AppState,
    },
    domain::{CreateDocumentRequest, DocumentQuery},
    error::Result,
};

pub async fn list(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
    ApiQuery(query): ApiQuery<DocumentQuery>,
) -> Result<Json<Value>> {
    let documents = state
        .service_context
        .document_service
        .list(&current.viewer(), &query)
        .await?;

    Ok(Json(json!({ "documents": documents })))
}

pub async fn get(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
    ApiPath(id): ApiPath<Uuid>,
) -> Result<Json<Value>> {
    let document = state
        .service_context
        .document_service
        .get(&current.viewer(), id)
        .await?;

    Ok(Json(json!({ "document": document })))
}

pub async fn create(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
    ApiJson(request): ApiJson<CreateDocumentRequest>,
) -> Result<(StatusCode, Json<Value>)> {
    request.validate()?;

    let document = state
        .service_context
        .document_service
        .create(&current.viewer(), request)
        .await?;

    Ok((StatusCode::CREATED, Json(json!({ "document": document }))))
}

pub async fn delete(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
    ApiPath(id): ApiPath<Uuid>,
) -> Result<Json<Value>> {
    state
        .service_context
        .document_service
        .delete(&current.viewer(), id)
        .await?;

    Ok(Json(json!({ "success": true })))
}
