//! Timeline layout derived from parsed idea units

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::instructions::{capitalize, IdeaUnit};

/// Minutes assumed for an action whose instructions give no time
pub const DEFAULT_INTERVAL: u32 = 2;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Segment {
  pub step: u32,
  /// Step groups renumbered 1..N in order of first appearance
  pub updated_step: u32,
  pub action: String,
  pub ingredients: String,
  pub until: Option<String>,
  pub num_time: Option<String>,
  pub interval: u32,
  /// Whether `interval` came from the instructions rather than the default
  pub explicit: bool,
  pub start: u32,
  pub end: u32,
  pub mid: f64,
  pub text: String,
}

/// Impute missing times and lay the units end to end
pub fn clean(units: &[IdeaUnit]) -> Vec<Segment> {
  let mut groups: HashMap<u32, u32> = HashMap::new();
  let mut end: u32 = 0;

  units
    .iter()
    .map(|unit| {
      let next_group = groups.len() as u32 + 1;
      let updated_step = *groups.entry(unit.step).or_insert(next_group);

      let parsed = unit.num_time.as_deref().and_then(|t| t.parse::<u32>().ok());
      let interval = parsed.unwrap_or(DEFAULT_INTERVAL);
      let start = end;
      end = start.saturating_add(interval);

      let text = if unit.ingredients.is_empty() {
        capitalize(&unit.action)
      } else {
        capitalize(&format!("{} {}", unit.action, unit.ingredients))
      };

      Segment {
        step: unit.step,
        updated_step,
        action: unit.action.clone(),
        ingredients: unit.ingredients.clone(),
        until: unit.until.clone(),
        num_time: unit.num_time.clone(),
        interval,
        explicit: parsed.is_some(),
        start,
        end,
        mid: (f64::from(start) + f64::from(end)) / 2.0,
        text,
      }
    })
    .collect()
}

/// Total minutes covered by the timeline
pub fn total_minutes(segments: &[Segment]) -> u32 {
  segments.last().map(|s| s.end).unwrap_or(0)
}
