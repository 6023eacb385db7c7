use async_trait::async_trait;
use axum::{
  body::{to_bytes, Body},
  http::{Request, StatusCode},
  Router,
};
use std::sync::Arc;
use tower::ServiceExt;

use souschef::cache::CachePolicy;
use souschef::nlp::{Doc, StaticAnalyzer};
use souschef::recipe::{Recipe, RecipeSource, URL_PROMPT};
use souschef::server::routing::create_router;
use souschef::server::AppState;
use souschef::{Planner, Result, SousChefError};

struct FixedSource;

#[async_trait]
impl RecipeSource for FixedSource {
  async fn fetch(&self, slug: &str) -> Result<Recipe> {
    match slug {
      "buttered-toast" => Ok(
        serde_json::from_value(serde_json::json!({
          "name": "Buttered Toast",
          "sections": [{"components": [{"raw_text": "1 tbsp butter", "ingredient": {"name": "Butter"}}]}],
          "instructions": [{"position": 1, "display_text": "Spread the butter."}]
        }))
        .unwrap(),
      ),
      "broken-oven" => Err(SousChefError::recipe_service(503, "upstream down")),
      _ => Err(SousChefError::recipe_not_found(slug)),
    }
  }
}

fn app() -> Router {
  let analyzer = StaticAnalyzer::new()
    .with("butter", Doc::from_rows(&[("butter", "butter", "NOUN", "NN", "ROOT", 0)]))
    .with(
      "Spread the butter.",
      Doc::from_rows(&[
        ("Spread", "spread", "VERB", "VB", "ROOT", 0),
        ("the", "the", "DET", "DT", "det", 2),
        ("butter", "butter", "NOUN", "NN", "dobj", 0),
        (".", ".", "PUNCT", ".", "punct", 0),
      ]),
    );
  let planner = Planner::new(Arc::new(FixedSource), Arc::new(analyzer), CachePolicy::default());
  create_router(Arc::new(AppState::new(planner)))
}

async fn get(uri: &str) -> (StatusCode, String) {
  let response = app().oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap()).await.unwrap();
  let status = response.status();
  let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
  (status, String::from_utf8(body.to_vec()).unwrap())
}

#[tokio::test]
async fn test_index_without_url_prompts() {
  let (status, body) = get("/").await;
  assert_eq!(status, StatusCode::OK);
  assert!(body.contains("SousChef.ai"));
  assert!(body.contains(URL_PROMPT));
}

#[tokio::test]
async fn test_index_with_other_site_prompts() {
  let (status, body) = get("/?url=https%3A%2F%2Fexample.com%2Frecipe%2Ftoast").await;
  assert_eq!(status, StatusCode::OK);
  assert!(body.contains(URL_PROMPT));
}

#[tokio::test]
async fn test_index_renders_plan() {
  let (status, body) = get("/?url=https%3A%2F%2Ftasty.co%2Frecipe%2Fbuttered-toast").await;
  assert_eq!(status, StatusCode::OK);
  assert!(body.contains("Check out the following plan for buttered toast:"));
  assert!(body.contains("<svg"));
  assert!(body.contains(">Spread butter</text>"));
}

#[tokio::test]
async fn test_upstream_failure_is_bad_gateway_page() {
  let (status, body) = get("/?url=https%3A%2F%2Ftasty.co%2Frecipe%2Fbroken-oven").await;
  assert_eq!(status, StatusCode::BAD_GATEWAY);
  assert!(body.contains("upstream down"));
}

#[tokio::test]
async fn test_api_plan_returns_table() {
  let (status, body) = get("/api/plan?url=https%3A%2F%2Ftasty.co%2Frecipe%2Fbuttered-toast").await;
  assert_eq!(status, StatusCode::OK);

  let json: serde_json::Value = serde_json::from_str(&body).unwrap();
  assert_eq!(json["title"], "buttered toast");
  assert_eq!(json["terms"][0], "butter");
  assert_eq!(json["segments"][0]["action"], "spread");
  assert_eq!(json["segments"][0]["ingredients"], "butter");
  assert_eq!(json["segments"][0]["interval"], 2);
  assert_eq!(json["segments"][0]["explicit"], false);
  assert!(json.get("svg").is_none());
  assert!(json["transaction_id"].is_string());
}

#[tokio::test]
async fn test_api_plan_rejects_bad_url() {
  let (status, body) = get("/api/plan?url=toast").await;
  assert_eq!(status, StatusCode::BAD_REQUEST);

  let json: serde_json::Value = serde_json::from_str(&body).unwrap();
  assert_eq!(json["errors"][0]["key"], "invalid_recipe_url");
  assert_eq!(json["errors"][0]["message"], URL_PROMPT);
}

#[tokio::test]
async fn test_api_plan_unknown_recipe_is_not_found() {
  let (status, body) = get("/api/plan?url=https%3A%2F%2Ftasty.co%2Frecipe%2Fnothing-here").await;
  assert_eq!(status, StatusCode::NOT_FOUND);
  assert!(body.contains("recipe_not_found"));
}

#[tokio::test]
async fn test_status_is_healthy() {
  let (status, body) = get("/status").await;
  assert_eq!(status, StatusCode::OK);

  let json: serde_json::Value = serde_json::from_str(&body).unwrap();
  assert_eq!(json["status"], "healthy");
  assert_eq!(json["version"], env!("CARGO_PKG_VERSION"));
}
