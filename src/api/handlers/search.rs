use axum::{extract::State, Extension, Json};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::{
    api::{extract::ApiQuery, middleware::auth::CurrentUser, state::AppState},
    error::Result,
    service::insights_service::SearchResults,
};

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    pub q: String,
}

pub async fn search(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
    ApiQuery(query): ApiQuery<SearchQuery>,
) -> Result<Json<SearchResults>> {
    let results = state
        .service_context
        .insights_service
        .search(&current.viewer(), &query.q)
        .await?;

    Ok(Json(results))
}

pub async fn departments(State(state): State<AppState>) -> Result<Json<Value>> {
    let departments = state
        .service_context
        .insights_service
        .department_summaries()
        .await?;

    Ok(Json(json!({ "departments": departments })))
}
