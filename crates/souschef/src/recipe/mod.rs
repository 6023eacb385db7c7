//! Recipe documents as returned by the Tasty recipe service

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use url::Url;

pub mod fetcher;

pub use fetcher::{RecipeSource, TastyClient};

/// Only links under this prefix are accepted from the user
pub const RECIPE_URL_PREFIX: &str = "https://tasty.co/recipe/";

/// Shown whenever the input is not a recipe link
pub const URL_PROMPT: &str = "Please copy and paste your recipe URL from Tasty.co!";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Recipe {
  #[serde(default)]
  pub name: Option<String>,
  #[serde(default)]
  pub sections: Vec<Section>,
  #[serde(default)]
  pub instructions: Vec<Instruction>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Section {
  #[serde(default)]
  pub name: Option<String>,
  #[serde(default)]
  pub components: Vec<Component>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Component {
  #[serde(default)]
  pub raw_text: Option<String>,
  #[serde(default)]
  pub ingredient: Option<IngredientRef>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IngredientRef {
  #[serde(default)]
  pub name: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Instruction {
  pub position: u32,
  pub display_text: String,
}

impl Recipe {
  /// Lowercased ingredient names, skipping entries without a usable name
  pub fn ingredient_names(&self) -> Vec<String> {
    self
      .sections
      .iter()
      .flat_map(|section| section.components.iter())
      .filter_map(|component| component.ingredient.as_ref()?.name.as_deref())
      .filter(|name| !name.trim().is_empty())
      .map(|name| name.to_lowercase())
      .collect()
  }

  /// Instruction text keyed by step position
  pub fn steps(&self) -> BTreeMap<u32, String> {
    self.instructions.iter().map(|i| (i.position, i.display_text.clone())).collect()
  }
}

/// A validated link to a Tasty recipe page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecipeUrl {
  slug: String,
}

impl RecipeUrl {
  /// Accept only `https://tasty.co/recipe/<slug>` links with a non-empty slug
  pub fn parse(input: &str) -> Option<Self> {
    let input = input.trim();
    if !input.starts_with(RECIPE_URL_PREFIX) {
      return None;
    }

    let url = Url::parse(input).ok()?;
    let slug = url.path_segments()?.filter(|s| !s.is_empty()).next_back()?.to_string();
    if slug == "recipe" {
      return None;
    }

    Some(Self { slug })
  }

  /// Dashed identifier sent to the recipe service
  pub fn slug(&self) -> &str {
    &self.slug
  }

  /// Human readable recipe name
  pub fn title(&self) -> String {
    self.slug.replace('-', " ")
  }
}
