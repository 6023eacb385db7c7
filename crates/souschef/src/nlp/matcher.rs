//! Lemma-sequence matcher that tags ingredient mentions as entities

use std::collections::BTreeSet;

use crate::nlp::{Doc, Span, INGREDIENT_LABEL};

#[derive(Debug, Clone, PartialEq, Eq)]
struct Pattern {
  term: String,
  lemmas: Vec<String>,
}

/// Matches normalized ingredient terms against document lemmas.
///
/// A single-lemma term matches that exact lemma. A multi-lemma term matches
/// a run of consecutive tokens that follows the term's lemmas in order,
/// where the first lemma is required and every later lemma may be skipped.
#[derive(Debug, Clone, Default)]
pub struct EntityMatcher {
  patterns: Vec<Pattern>,
}

impl EntityMatcher {
  pub fn from_terms<S: AsRef<str>>(terms: &[S]) -> Self {
    let mut patterns: Vec<Pattern> = Vec::new();
    for term in terms {
      let lemmas: Vec<String> = term.as_ref().split_whitespace().map(str::to_string).collect();
      if lemmas.is_empty() {
        continue;
      }
      let pattern = Pattern { term: term.as_ref().to_string(), lemmas };
      if !patterns.contains(&pattern) {
        patterns.push(pattern);
      }
    }
    Self { patterns }
  }

  pub fn len(&self) -> usize {
    self.patterns.len()
  }

  pub fn is_empty(&self) -> bool {
    self.patterns.is_empty()
  }

  pub fn terms(&self) -> impl Iterator<Item = &str> {
    self.patterns.iter().map(|p| p.term.as_str())
  }

  /// Every match of every pattern, overlaps included
  pub fn find_all(&self, doc: &Doc) -> Vec<Span> {
    let lemmas: Vec<&str> = doc.tokens().iter().map(|t| t.lemma.as_str()).collect();
    let mut spans = Vec::new();

    for pattern in &self.patterns {
      for start in 0..lemmas.len() {
        if lemmas[start] != pattern.lemmas[0] {
          continue;
        }
        for end in match_ends(&pattern.lemmas, &lemmas, start) {
          spans.push(Span { start, end, label: INGREDIENT_LABEL.to_string() });
        }
      }
    }

    spans
  }

  /// Replace the document's entities with the non-overlapping ingredient matches
  pub fn tag(&self, doc: &mut Doc) {
    let spans = filter_spans(self.find_all(doc));
    doc.set_ents(spans);
  }
}

/// End positions reachable from `start` after the required first lemma
fn match_ends(pattern: &[String], lemmas: &[&str], start: usize) -> BTreeSet<usize> {
  let mut ends = BTreeSet::new();
  let mut stack = vec![(1usize, start + 1)];

  while let Some((p, d)) = stack.pop() {
    if p == pattern.len() {
      ends.insert(d);
      continue;
    }
    stack.push((p + 1, d));
    if d < lemmas.len() && lemmas[d] == pattern[p] {
      stack.push((p + 1, d + 1));
    }
  }

  ends
}

/// Keep the longest spans first, earlier ones on ties, dropping overlaps
pub fn filter_spans(mut spans: Vec<Span>) -> Vec<Span> {
  spans.sort_by(|a, b| b.len().cmp(&a.len()).then(a.start.cmp(&b.start)));

  let mut kept: Vec<Span> = Vec::new();
  for span in spans {
    if !kept.iter().any(|k| k.overlaps(&span)) {
      kept.push(span);
    }
  }

  kept.sort_by_key(|s| s.start);
  kept
}
