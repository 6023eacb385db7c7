//! End-to-end planning: recipe link in, cooking timeline out

use serde::Serialize;
use std::sync::Arc;

use crate::cache::{fingerprint, CachePolicy, Memo};
use crate::config::Config;
use crate::error::Result;
use crate::instructions::parse_instructions;
use crate::nlp::{Analyzer, EntityMatcher, HttpAnalyzer};
use crate::normalizer::normalize_ingredients;
use crate::recipe::{Recipe, RecipeSource, RecipeUrl, TastyClient};
use crate::render::render_svg;
use crate::timeline::{clean, Segment};

#[derive(Debug, Clone, Serialize)]
pub struct Plan {
  pub title: String,
  pub ingredients: Vec<String>,
  pub terms: Vec<String>,
  pub segments: Vec<Segment>,
  #[serde(skip)]
  pub svg: String,
}

pub struct Planner {
  source: Arc<dyn RecipeSource>,
  analyzer: Arc<dyn Analyzer>,
  recipes: Memo<Recipe>,
  terms: Memo<Vec<String>>,
  charts: Memo<String>,
}

impl Planner {
  pub fn new(source: Arc<dyn RecipeSource>, analyzer: Arc<dyn Analyzer>, policy: CachePolicy) -> Self {
    Self {
      source,
      analyzer,
      recipes: Memo::new("recipes", policy.clone()),
      terms: Memo::new("terms", policy.clone()),
      charts: Memo::new("charts", policy),
    }
  }

  /// Planner talking to the configured recipe and parser services
  pub fn from_config(config: &Config) -> Result<Self> {
    let source = TastyClient::from_env(config.tasty.clone())?;
    let analyzer = HttpAnalyzer::new(config.parser.url.clone(), config.parser.timeout_secs)?;
    Ok(Self::new(Arc::new(source), Arc::new(analyzer), config.cache.clone()))
  }

  pub async fn plan(&self, url: &RecipeUrl) -> Result<Plan> {
    tracing::info!(slug = url.slug(), "planning recipe");

    let recipe = self.recipe(url.slug()).await?;
    let ingredients = recipe.ingredient_names();
    let terms = self.normalized(&ingredients).await?;

    let matcher = EntityMatcher::from_terms(&terms);
    let units = parse_instructions(&recipe.steps(), self.analyzer.as_ref(), &matcher).await?;
    tracing::info!(steps = recipe.instructions.len(), units = units.len(), "parsed instructions");

    let segments = clean(&units);
    let svg = self.chart(&segments)?;

    Ok(Plan { title: url.title(), ingredients, terms, segments, svg })
  }

  async fn recipe(&self, slug: &str) -> Result<Recipe> {
    if let Some(recipe) = self.recipes.get(slug) {
      return Ok(recipe);
    }

    let recipe = self.source.fetch(slug).await?;
    tracing::info!(slug, sections = recipe.sections.len(), "fetched recipe");
    self.recipes.insert(slug, recipe.clone());
    Ok(recipe)
  }

  async fn normalized(&self, ingredients: &[String]) -> Result<Vec<String>> {
    let key = fingerprint(ingredients);
    if let Some(terms) = self.terms.get(&key) {
      return Ok(terms);
    }

    let terms = normalize_ingredients(self.analyzer.as_ref(), ingredients).await?;
    tracing::info!(ingredients = ingredients.len(), "normalized ingredients");
    self.terms.insert(key, terms.clone());
    Ok(terms)
  }

  fn chart(&self, segments: &[Segment]) -> Result<String> {
    let key = fingerprint(&[serde_json::to_string(segments)?]);
    if let Some(svg) = self.charts.get(&key) {
      return Ok(svg);
    }

    let svg = render_svg(segments);
    self.charts.insert(key, svg.clone());
    Ok(svg)
  }
}
