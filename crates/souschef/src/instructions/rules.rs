//! Grammar rules that pull an idea unit out of one analyzed sentence
//!
//! Each rule reads the dependency tree through [`Doc`] and can be exercised
//! on its own. [`super::sentence_units`] strings them together.

use std::ops::Range;

use crate::nlp::{Dep, Doc, Pos};

const TIME_LEMMA: &str = "minute";
const UNTIL: &str = "until";
const UNTIL_SKIPPED_LEMMAS: [&str; 5] = ["a", "an", "the", "be", "have"];

/// Sentence root plus every verb an ingredient entity hangs off, ascending and unique
pub fn find_actions(doc: &Doc, sent: &Range<usize>) -> Vec<usize> {
  let mut actions = vec![doc.sent_root(sent)];

  for ent in doc.ents_in(sent) {
    let head = doc.head(doc.span_root(ent));
    if head.tag == "VB" {
      actions.push(head.i);
    } else if head.tag == "IN" && doc.head(head.i).tag == "VB" {
      actions.push(head.head);
    }
  }

  actions.sort_unstable();
  actions.dedup();
  actions
}

/// The object of the first `prep` to the right of `i`, if that preposition has one
pub fn nested_object(doc: &Doc, i: usize) -> Option<usize> {
  let prep = doc.rights(i).find(|t| t.dep == Dep::Prep)?;
  doc.rights(prep.i).find(|t| t.dep == Dep::Pobj).map(|t| t.i)
}

fn is_time(doc: &Doc, i: usize) -> bool {
  doc.token(i).lemma == TIME_LEMMA
}

/// Anchor of a direct object: its nested prepositional object, else the object itself
pub fn direct_object_anchor(doc: &Doc, dobj: usize) -> Option<usize> {
  let token = doc.token(dobj);
  if token.dep != Dep::Dobj || is_time(doc, dobj) {
    return None;
  }
  Some(nested_object(doc, dobj).unwrap_or(dobj))
}

/// Anchors under a preposition attached to the action, excluding time expressions
pub fn prepositional_anchors(doc: &Doc, prep: usize) -> Vec<usize> {
  if doc.token(prep).dep != Dep::Prep {
    return Vec::new();
  }

  doc
    .rights(prep)
    .filter(|t| t.dep == Dep::Pobj && !is_time(doc, t.i))
    .map(|t| nested_object(doc, t.i).unwrap_or(t.i))
    .collect()
}

/// Anchor text, with a modifying noun or adjective directly to its left
pub fn describe(doc: &Doc, anchor: usize, prefix: &str) -> String {
  let token = doc.token(anchor);
  let modifier = anchor
    .checked_sub(1)
    .map(|left| doc.token(left))
    .filter(|left| left.head == anchor && matches!(left.pos, Pos::Noun | Pos::Propn | Pos::Adj));

  match modifier {
    Some(left) => format!("{prefix}{} {}", left.text, token.text),
    None => format!("{prefix}{}", token.text),
  }
}

/// Append nouns chained to the right of `anchor`, depth first
pub fn chain(doc: &Doc, anchor: usize, out: &mut Vec<String>) {
  for next in doc.rights(anchor) {
    if next.pos.is_nominal() {
      out.push(describe(doc, next.i, ""));
      chain(doc, next.i, out);
    }
  }
}

/// Ingredient descriptor phrases governed by `action`
pub fn ingredient_descriptors(doc: &Doc, action: usize) -> Vec<String> {
  let mut out = Vec::new();

  for child in doc.rights(action) {
    if !out.is_empty() {
      break;
    }

    match child.dep {
      Dep::Dobj => {
        if let Some(anchor) = direct_object_anchor(doc, child.i) {
          out.push(describe(doc, anchor, ""));
          chain(doc, anchor, &mut out);
        }
      }
      Dep::Prep => {
        let prefix = format!("{} ", child.text);
        for anchor in prepositional_anchors(doc, child.i) {
          out.push(describe(doc, anchor, &prefix));
          chain(doc, anchor, &mut out);
        }
      }
      _ => {}
    }
  }

  out
}

/// Tokens scanned for the until clause and duration of `action`.
///
/// The window runs from just after the action to the end of the sentence,
/// leaving out a closing punctuation token.
pub fn scan_window(doc: &Doc, sent: &Range<usize>, action: usize) -> Range<usize> {
  let mut end = sent.end;
  if end > sent.start && doc.token(end - 1).pos == Pos::Punct {
    end -= 1;
  }
  let start = (action + 1).min(end);
  start..end
}

/// `"until ..."` up to the next punctuation, without articles and auxiliaries
pub fn until_clause(doc: &Doc, window: Range<usize>) -> Option<String> {
  let start = window.clone().find(|&i| doc.token(i).text == UNTIL)?;

  let mut clause = UNTIL.to_string();
  for i in start + 1..window.end {
    let token = doc.token(i);
    if token.pos == Pos::Punct {
      break;
    }
    if UNTIL_SKIPPED_LEMMAS.contains(&token.lemma.as_str()) {
      continue;
    }
    clause.push(' ');
    clause.push_str(&token.text);
  }

  Some(clause)
}

/// Minutes from the first `<number> minute(s)` in the window
pub fn duration(doc: &Doc, window: Range<usize>) -> Option<String> {
  let minute = window.into_iter().find(|&i| i > 0 && is_time(doc, i) && doc.token(i - 1).pos == Pos::Num)?;
  let digits = trailing_digits(&doc.token(minute - 1).text);
  (!digits.is_empty()).then(|| digits.to_string())
}

/// Digits after the last non-digit character: `"10-15"` gives `"15"`
fn trailing_digits(text: &str) -> &str {
  &text[text.trim_end_matches(|c: char| c.is_ascii_digit()).len()..]
}
