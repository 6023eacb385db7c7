//! Recipe plan endpoints

use axum::{
  extract::{Query, State},
  http::StatusCode,
  response::{Html, Json},
};
use serde::Deserialize;
use std::sync::Arc;
use uuid::Uuid;

use crate::pipeline::Plan;
use crate::recipe::{RecipeUrl, URL_PROMPT};
use crate::server::handlers::{error_key, status_for};
use crate::server::page;
use crate::server::types::{ApiError, BaseResponse};
use crate::server::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct PlanQuery {
  #[serde(default)]
  pub url: Option<String>,
}

type ApiFailure = (StatusCode, Json<BaseResponse<()>>);

/// GET / - The planner page, with the plan for `?url=` when it is a recipe link
pub async fn index(State(state): State<Arc<AppState>>, Query(query): Query<PlanQuery>) -> (StatusCode, Html<String>) {
  let input = query.url.unwrap_or_default();
  let Some(url) = RecipeUrl::parse(&input) else {
    return (StatusCode::OK, Html(page::prompt(&input)));
  };

  match state.planner.plan(&url).await {
    Ok(plan) => (StatusCode::OK, Html(page::plan(&input, &plan))),
    Err(e) => {
      tracing::warn!(slug = url.slug(), error = %e, "plan failed");
      (status_for(&e), Html(page::failure(&input, &e.to_string())))
    }
  }
}

/// GET /api/plan - The cleaned timeline table as JSON
pub async fn api_plan(
  State(state): State<Arc<AppState>>,
  Query(query): Query<PlanQuery>,
) -> Result<Json<BaseResponse<Plan>>, ApiFailure> {
  let transaction_id = Uuid::new_v4();

  let Some(url) = query.url.as_deref().and_then(RecipeUrl::parse) else {
    let error = ApiError::new("invalid_recipe_url", URL_PROMPT);
    return Err((StatusCode::BAD_REQUEST, Json(BaseResponse::<()>::error(vec![error], transaction_id))));
  };

  match state.planner.plan(&url).await {
    Ok(plan) => {
      tracing::info!(%transaction_id, slug = url.slug(), segments = plan.segments.len(), "served plan");
      Ok(Json(BaseResponse::success(plan, transaction_id)))
    }
    Err(e) => {
      tracing::warn!(%transaction_id, slug = url.slug(), error = %e, "plan failed");
      let error = ApiError::new(error_key(&e), &e.to_string());
      Err((status_for(&e), Json(BaseResponse::<()>::error(vec![error], transaction_id))))
    }
  }
}
