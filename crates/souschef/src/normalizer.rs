//! Reduces raw ingredient lines to their essential food term
//!
//! `"2 fresh lime juice"`-style lines are analyzed and trimmed down to the
//! head noun phrase, lemmatized, so the instruction parser can recognize the
//! ingredient wherever the recipe mentions it.

use regex::Regex;
use std::ops::Range;
use std::sync::LazyLock;

use crate::error::Result;
use crate::nlp::{Analyzer, Dep, Doc, Pos};

static BRAND_PREFIX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^.*[®™]+\s").unwrap());
static MARKS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[®™]").unwrap());
static ASIDE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s*\([^)]*\)").unwrap());

/// Strip brand prefixes, trademark marks, parenthetical asides and a leading "medium "
pub fn clean_ingredient(raw: &str) -> String {
  let text = BRAND_PREFIX.replace(raw, "");
  let text = MARKS.replace_all(&text, "");
  let text = ASIDE.replace_all(&text, "");
  let text = text.trim();
  text.strip_prefix("medium ").unwrap_or(text).trim().to_string()
}

/// The lemmatized food term of one analyzed ingredient line
pub fn food_term(doc: &Doc) -> String {
  match doc.len() {
    0 => String::new(),
    1 => doc.token(0).lemma.clone(),
    _ => {
      let span = working_span(doc);
      let mut indices = food_indices(doc, span);
      if indices.is_empty() {
        indices = doc.sentence_roots();
      }

      let kept = rightmost_run(&indices);
      match (kept.iter().min(), kept.iter().max()) {
        (Some(&lo), Some(&hi)) => doc.lemma_text(lo..hi + 1),
        _ => String::new(),
      }
    }
  }
}

/// Tokens after the last punctuation break, minus a leading adjective before a noun compound
fn working_span(doc: &Doc) -> Range<usize> {
  let start = doc
    .tokens()
    .iter()
    .rposition(|t| t.pos == Pos::Punct)
    .map(|p| (p + 2).min(doc.len()))
    .unwrap_or(0);
  let span = start..doc.len();

  if span.len() >= 3
    && doc.token(start).pos == Pos::Adj
    && doc.token(start + 1).pos == Pos::Noun
    && doc.token(start + 2).pos == Pos::Noun
  {
    return start + 1..doc.len();
  }

  span
}

/// Nouns in the span plus the verbs that a parser sometimes hangs them off
fn food_indices(doc: &Doc, span: Range<usize>) -> Vec<usize> {
  let two_tokens = span.len() == 2;
  let mut indices = Vec::new();

  for i in span {
    let token = doc.token(i);
    if !token.pos.is_nominal() {
      continue;
    }
    indices.push(i);

    let head = doc.head(i);
    if head.pos != Pos::Verb {
      continue;
    }
    // "teriyaki sauce", "taco seasoning", "curry powder"
    if token.dep == Dep::Nsubj || (two_tokens && matches!(token.dep, Dep::Compound | Dep::Dobj)) {
      indices.push(head.i);
    }
  }

  indices
}

/// Indices after the last gap in insertion order
fn rightmost_run(indices: &[usize]) -> &[usize] {
  let last_gap = indices.windows(2).rposition(|w| w[1] as isize - w[0] as isize > 1);
  match last_gap {
    Some(i) => &indices[i + 1..],
    None => indices,
  }
}

/// Normalize every ingredient, preserving input order
pub async fn normalize_ingredients(analyzer: &dyn Analyzer, ingredients: &[String]) -> Result<Vec<String>> {
  let mut terms = Vec::with_capacity(ingredients.len());

  for raw in ingredients {
    let cleaned = clean_ingredient(raw);
    if cleaned.is_empty() {
      terms.push(String::new());
      continue;
    }

    let doc = analyzer.analyze(&cleaned).await?;
    let term = food_term(&doc);
    tracing::debug!(ingredient = %raw, term = %term, "normalized");
    terms.push(term);
  }

  Ok(terms)
}
