//! Instruction parsing into idea units
//!
//! Every step is analyzed, its ingredient mentions are tagged, and each
//! sentence yields one idea unit per cooking action: the verb, the
//! ingredients it acts on, an optional "until ..." completion cue and an
//! optional cooking time in minutes.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::LazyLock;

use crate::error::Result;
use crate::nlp::{Analyzer, Doc, EntityMatcher};

pub mod rules;

const FINAL_STEP: &str = "Enjoy!";

static ASIDE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s\([^)]*\)").unwrap());

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdeaUnit {
  pub step: u32,
  pub action: String,
  pub ingredients: String,
  pub until: Option<String>,
  pub num_time: Option<String>,
}

/// What to do with one raw instruction step
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepText {
  Parse(String),
  Skip,
  Stop,
}

/// Classify a raw step and prepare its text for analysis
pub fn prepare_step(raw: &str) -> StepText {
  if raw.trim() == FINAL_STEP {
    return StepText::Stop;
  }

  let mut lead = raw.chars().take(2);
  if let (Some(a), Some(b)) = (lead.next(), lead.next()) {
    if a.is_uppercase() && b.is_uppercase() {
      return StepText::Skip;
    }
  }

  StepText::Parse(ASIDE.replace_all(&capitalize(raw), "").into_owned())
}

/// First character upper case, the rest lower case
pub fn capitalize(text: &str) -> String {
  let mut chars = text.chars();
  match chars.next() {
    Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
    None => String::new(),
  }
}

/// Idea units of an analyzed step whose ingredient entities are already tagged
pub fn sentence_units(step: u32, doc: &Doc) -> Vec<IdeaUnit> {
  let mut units = Vec::new();

  for sent in doc.sents() {
    let actions = rules::find_actions(doc, sent);

    for action in actions {
      let window = rules::scan_window(doc, sent, action);

      units.push(IdeaUnit {
        step,
        action: doc.token(action).lemma.to_lowercase(),
        ingredients: rules::ingredient_descriptors(doc, action).join(", "),
        until: rules::until_clause(doc, window.clone()),
        num_time: rules::duration(doc, window),
      });
    }
  }

  units
}

/// Parse every step in ascending order into idea units
pub async fn parse_instructions(
  steps: &BTreeMap<u32, String>,
  analyzer: &dyn Analyzer,
  matcher: &EntityMatcher,
) -> Result<Vec<IdeaUnit>> {
  let mut units = Vec::new();

  for (&step, raw) in steps {
    let text = match prepare_step(raw) {
      StepText::Parse(text) => text,
      StepText::Skip => {
        tracing::debug!(step, "skipping heading step");
        continue;
      }
      StepText::Stop => break,
    };

    let mut doc = analyzer.analyze(&text).await?;
    matcher.tag(&mut doc);

    let found = sentence_units(step, &doc);
    tracing::debug!(step, units = found.len(), entities = doc.ents().len(), "parsed step");
    units.extend(found);
  }

  Ok(units)
}
