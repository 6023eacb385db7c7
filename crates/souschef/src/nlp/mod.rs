//! Token and dependency-edge model for analyzed text
//!
//! A [`Doc`] is the output of the external parser: tokens carrying a lemma,
//! a coarse part of speech, a fine tag and a dependency edge to their head,
//! grouped into sentences. Every heuristic in the crate reads documents only
//! through this interface.

use serde::{Deserialize, Serialize};
use std::ops::Range;

pub mod client;
pub mod matcher;

pub use client::{Analyzer, HttpAnalyzer, StaticAnalyzer};
pub use matcher::EntityMatcher;

/// Label attached to entity spans produced by the ingredient matcher
pub const INGREDIENT_LABEL: &str = "INGREDIENT";

/// Coarse (universal) part of speech
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Pos {
  Noun,
  Propn,
  Adj,
  Verb,
  Num,
  Punct,
  Adp,
  Other,
}

impl Pos {
  pub fn from_label(label: &str) -> Self {
    match label.to_ascii_uppercase().as_str() {
      "NOUN" => Pos::Noun,
      "PROPN" => Pos::Propn,
      "ADJ" => Pos::Adj,
      "VERB" => Pos::Verb,
      "NUM" => Pos::Num,
      "PUNCT" => Pos::Punct,
      "ADP" => Pos::Adp,
      _ => Pos::Other,
    }
  }

  pub fn is_nominal(self) -> bool {
    matches!(self, Pos::Noun | Pos::Propn)
  }
}

/// Dependency relation to the head token (ClearNLP label set)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Dep {
  Root,
  Dobj,
  Prep,
  Pobj,
  Nsubj,
  Compound,
  Other,
}

impl Dep {
  pub fn from_label(label: &str) -> Self {
    match label.to_ascii_lowercase().as_str() {
      "root" => Dep::Root,
      "dobj" => Dep::Dobj,
      "prep" => Dep::Prep,
      "pobj" => Dep::Pobj,
      "nsubj" => Dep::Nsubj,
      "compound" => Dep::Compound,
      _ => Dep::Other,
    }
  }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Token {
  pub i: usize,
  pub text: String,
  pub lemma: String,
  pub pos: Pos,
  /// Fine-grained Penn Treebank tag, e.g. `VB` or `IN`
  pub tag: String,
  pub dep: Dep,
  pub head: usize,
  /// Whether the token is followed by whitespace in the source text
  pub whitespace: bool,
}

/// Labeled token range `[start, end)`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Span {
  pub start: usize,
  pub end: usize,
  pub label: String,
}

impl Span {
  pub fn len(&self) -> usize {
    self.end - self.start
  }

  pub fn is_empty(&self) -> bool {
    self.start >= self.end
  }

  pub fn overlaps(&self, other: &Span) -> bool {
    self.start < other.end && other.start < self.end
  }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Doc {
  tokens: Vec<Token>,
  sents: Vec<Range<usize>>,
  ents: Vec<Span>,
}

impl Doc {
  /// Build a document from parsed tokens and sentence token ranges.
  ///
  /// An empty sentence list is treated as one sentence covering every token.
  pub fn new(tokens: Vec<Token>, sents: Vec<Range<usize>>) -> Self {
    let sents = if sents.is_empty() && !tokens.is_empty() { vec![0..tokens.len()] } else { sents };
    Self { tokens, sents, ents: Vec::new() }
  }

  /// Build a single-sentence document from `(text, lemma, pos, tag, dep, head)` rows.
  pub fn from_rows(rows: &[(&str, &str, &str, &str, &str, usize)]) -> Self {
    let last = rows.len().saturating_sub(1);
    let tokens = rows
      .iter()
      .enumerate()
      .map(|(i, (text, lemma, pos, tag, dep, head))| Token {
        i,
        text: text.to_string(),
        lemma: lemma.to_string(),
        pos: Pos::from_label(pos),
        tag: tag.to_string(),
        dep: Dep::from_label(dep),
        head: *head,
        whitespace: i < last && !is_attached_punct(rows.get(i + 1).map(|r| r.2)),
      })
      .collect();
    Self::new(tokens, Vec::new())
  }

  /// Replace sentence boundaries
  pub fn with_sents(mut self, sents: Vec<Range<usize>>) -> Self {
    self.sents = sents;
    self
  }

  pub fn len(&self) -> usize {
    self.tokens.len()
  }

  pub fn is_empty(&self) -> bool {
    self.tokens.is_empty()
  }

  pub fn tokens(&self) -> &[Token] {
    &self.tokens
  }

  pub fn token(&self, i: usize) -> &Token {
    &self.tokens[i]
  }

  pub fn head(&self, i: usize) -> &Token {
    &self.tokens[self.tokens[i].head]
  }

  pub fn sents(&self) -> &[Range<usize>] {
    &self.sents
  }

  pub fn ents(&self) -> &[Span] {
    &self.ents
  }

  pub fn set_ents(&mut self, ents: Vec<Span>) {
    self.ents = ents;
  }

  /// Entities that lie entirely inside `sent`
  pub fn ents_in<'a>(&'a self, sent: &'a Range<usize>) -> impl Iterator<Item = &'a Span> + 'a {
    self.ents.iter().filter(move |e| e.start >= sent.start && e.end <= sent.end)
  }

  /// Dependents to the right of token `i`, nearest first
  pub fn rights(&self, i: usize) -> impl Iterator<Item = &Token> + '_ {
    self.tokens.iter().skip(i + 1).filter(move |t| t.head == i)
  }

  /// Grammatical root of a sentence
  pub fn sent_root(&self, sent: &Range<usize>) -> usize {
    sent
      .clone()
      .find(|&i| self.tokens[i].dep == Dep::Root || self.tokens[i].head == i)
      .unwrap_or(sent.start)
  }

  pub fn sentence_roots(&self) -> Vec<usize> {
    self.sents.iter().map(|s| self.sent_root(s)).collect()
  }

  /// The token of a span whose head lies outside the span
  pub fn span_root(&self, span: &Span) -> usize {
    (span.start..span.end)
      .find(|&i| {
        let head = self.tokens[i].head;
        head == i || head < span.start || head >= span.end
      })
      .unwrap_or(span.start)
  }

  /// Lemmas of `range`, separated the way the source tokens were
  pub fn lemma_text(&self, range: Range<usize>) -> String {
    let mut out = String::new();
    let last = range.end.saturating_sub(1);
    for i in range {
      let token = &self.tokens[i];
      out.push_str(&token.lemma);
      if token.whitespace && i < last {
        out.push(' ');
      }
    }
    out
  }
}

fn is_attached_punct(pos: Option<&str>) -> bool {
  pos.map(|p| Pos::from_label(p) == Pos::Punct).unwrap_or(false)
}

#[cfg(test)]
mod tests {
  use super::*;

  fn mix_doc() -> Doc {
    Doc::from_rows(&[
      ("Mix", "mix", "VERB", "VB", "ROOT", 0),
      ("the", "the", "DET", "DT", "det", 2),
      ("flour", "flour", "NOUN", "NN", "dobj", 0),
      ("with", "with", "ADP", "IN", "prep", 0),
      ("sugar", "sugar", "NOUN", "NN", "pobj", 3),
      (".", ".", "PUNCT", ".", "punct", 0),
    ])
  }

  #[test]
  fn test_rights_are_ordered_and_direct() {
    let doc = mix_doc();
    let rights: Vec<usize> = doc.rights(0).map(|t| t.i).collect();
    assert_eq!(rights, vec![2, 3, 5]);
    assert_eq!(doc.rights(3).map(|t| t.i).collect::<Vec<_>>(), vec![4]);
    assert_eq!(doc.rights(4).count(), 0);
  }

  #[test]
  fn test_sentence_root_and_span_root() {
    let doc = mix_doc();
    assert_eq!(doc.sentence_roots(), vec![0]);

    let span = Span { start: 1, end: 3, label: INGREDIENT_LABEL.to_string() };
    assert_eq!(doc.span_root(&span), 2);
  }

  #[test]
  fn test_lemma_text_respects_whitespace() {
    let doc = Doc::from_rows(&[
      ("lime", "lime", "NOUN", "NN", "compound", 1),
      ("juices", "juice", "NOUN", "NNS", "ROOT", 1),
      (",", ",", "PUNCT", ",", "punct", 1),
    ]);
    assert_eq!(doc.lemma_text(0..2), "lime juice");
    assert!(!doc.token(1).whitespace);
  }

  #[test]
  fn test_labels_fall_back_to_other() {
    assert_eq!(Pos::from_label("noun"), Pos::Noun);
    assert_eq!(Pos::from_label("SCONJ"), Pos::Other);
    assert_eq!(Dep::from_label("ROOT"), Dep::Root);
    assert_eq!(Dep::from_label("advcl"), Dep::Other);
  }

  #[test]
  fn test_ents_in_sentence() {
    let mut doc = mix_doc().with_sents(vec![0..3, 3..6]);
    doc.set_ents(vec![
      Span { start: 2, end: 3, label: INGREDIENT_LABEL.to_string() },
      Span { start: 4, end: 5, label: INGREDIENT_LABEL.to_string() },
    ]);
    let second = doc.sents()[1].clone();
    let ents: Vec<usize> = doc.ents_in(&second).map(|e| e.start).collect();
    assert_eq!(ents, vec![4]);
  }
}
