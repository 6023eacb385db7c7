//! HTTP client for the external dependency parser
//!
//! The parser service accepts `{"text": ...}` and answers with spaCy's
//! `Doc.to_json()` layout. Sentence boundaries arrive as character offsets
//! and are mapped onto token ranges here.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::ops::Range;
use std::time::Duration;

use crate::error::{Result, SousChefError};
use crate::nlp::{Dep, Doc, Pos, Token};

/// Anything that can turn raw text into an analyzed [`Doc`]
#[async_trait]
pub trait Analyzer: Send + Sync {
  async fn analyze(&self, text: &str) -> Result<Doc>;
}

#[derive(Serialize)]
struct AnalyzeRequest<'a> {
  text: &'a str,
}

#[derive(Debug, Deserialize)]
struct WireDoc {
  #[serde(default)]
  tokens: Vec<WireToken>,
  #[serde(default)]
  sents: Vec<WireSent>,
  #[serde(default)]
  text: String,
}

#[derive(Debug, Deserialize)]
struct WireToken {
  id: usize,
  start: usize,
  end: usize,
  #[serde(default)]
  tag: String,
  #[serde(default)]
  pos: String,
  #[serde(default)]
  lemma: String,
  #[serde(default)]
  dep: String,
  head: usize,
}

#[derive(Debug, Deserialize)]
struct WireSent {
  start: usize,
  end: usize,
}

/// Analyzer backed by a parser service reachable over HTTP
pub struct HttpAnalyzer {
  client: Client,
  endpoint: String,
}

impl HttpAnalyzer {
  pub fn new(endpoint: impl Into<String>, timeout_secs: u64) -> Result<Self> {
    let client = Client::builder().timeout(Duration::from_secs(timeout_secs)).build()?;
    Ok(Self { client, endpoint: endpoint.into() })
  }

  pub fn endpoint(&self) -> &str {
    &self.endpoint
  }
}

#[async_trait]
impl Analyzer for HttpAnalyzer {
  async fn analyze(&self, text: &str) -> Result<Doc> {
    let response = self.client.post(&self.endpoint).json(&AnalyzeRequest { text }).send().await?;

    let status = response.status();
    if !status.is_success() {
      let body = response.text().await.unwrap_or_default();
      return Err(SousChefError::parser_service(status.as_u16(), body));
    }

    let wire: WireDoc = response.json().await?;
    tracing::debug!(tokens = wire.tokens.len(), "parsed {:?}", text);
    decode(wire)
  }
}

/// Analyzer that serves pre-parsed documents, keyed by their exact text
#[derive(Debug, Clone, Default)]
pub struct StaticAnalyzer {
  docs: HashMap<String, Doc>,
}

impl StaticAnalyzer {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn with(mut self, text: impl Into<String>, doc: Doc) -> Self {
    self.docs.insert(text.into(), doc);
    self
  }
}

#[async_trait]
impl Analyzer for StaticAnalyzer {
  async fn analyze(&self, text: &str) -> Result<Doc> {
    self
      .docs
      .get(text)
      .cloned()
      .ok_or_else(|| SousChefError::parser_service(404, format!("no parse for {text:?}")))
  }
}

/// Decode a spaCy JSON document body
pub fn decode_doc(body: &str) -> Result<Doc> {
  let wire: WireDoc = serde_json::from_str(body)?;
  decode(wire)
}

fn decode(wire: WireDoc) -> Result<Doc> {
  let count = wire.tokens.len();
  let offsets = byte_offsets(&wire.text);
  let mut tokens = Vec::with_capacity(count);

  for (position, t) in wire.tokens.iter().enumerate() {
    if t.id != position {
      return Err(SousChefError::malformed_doc(format!(
        "token id {} found at position {}",
        t.id, position
      )));
    }
    if t.head >= count {
      return Err(SousChefError::malformed_doc(format!(
        "token {} points at head {} outside {} tokens",
        t.id, t.head, count
      )));
    }

    let whitespace = match wire.tokens.get(position + 1) {
      Some(next) => next.start > t.end,
      None => offsets
        .get(t.end)
        .and_then(|&b| wire.text.get(b..))
        .is_some_and(|rest| rest.starts_with(char::is_whitespace)),
    };

    tokens.push(Token {
      i: position,
      text: token_text(&wire.text, &offsets, t),
      lemma: t.lemma.clone(),
      pos: Pos::from_label(&t.pos),
      tag: t.tag.clone(),
      dep: Dep::from_label(&t.dep),
      head: t.head,
      whitespace,
    });
  }

  let sents = wire.sents.iter().filter_map(|s| sentence_range(&wire.tokens, s)).collect();
  Ok(Doc::new(tokens, sents))
}

/// Byte position of every character offset, plus one for the end of text
fn byte_offsets(text: &str) -> Vec<usize> {
  text.char_indices().map(|(b, _)| b).chain(std::iter::once(text.len())).collect()
}

/// Token offsets count characters, not bytes
fn token_text(text: &str, offsets: &[usize], token: &WireToken) -> String {
  match (offsets.get(token.start), offsets.get(token.end)) {
    (Some(&start), Some(&end)) => text.get(start..end).unwrap_or_default().to_string(),
    _ => String::new(),
  }
}

fn sentence_range(tokens: &[WireToken], sent: &WireSent) -> Option<Range<usize>> {
  let start = tokens.iter().position(|t| t.start >= sent.start)?;
  let end = tokens.iter().rposition(|t| t.end <= sent.end)? + 1;
  (start < end).then_some(start..end)
}

#[cfg(test)]
mod tests {
  use super::*;
  use mockito::Server;

  const BAKE_JSON: &str = r#"{
    "text": "Bake for 20 minutes. Serve.",
    "ents": [],
    "sents": [{"start": 0, "end": 20}, {"start": 21, "end": 27}],
    "tokens": [
      {"id": 0, "start": 0, "end": 4, "tag": "VB", "pos": "VERB", "morph": "", "lemma": "bake", "dep": "ROOT", "head": 0},
      {"id": 1, "start": 5, "end": 8, "tag": "IN", "pos": "ADP", "morph": "", "lemma": "for", "dep": "prep", "head": 0},
      {"id": 2, "start": 9, "end": 11, "tag": "CD", "pos": "NUM", "morph": "", "lemma": "20", "dep": "nummod", "head": 3},
      {"id": 3, "start": 12, "end": 19, "tag": "NNS", "pos": "NOUN", "morph": "", "lemma": "minute", "dep": "pobj", "head": 1},
      {"id": 4, "start": 19, "end": 20, "tag": ".", "pos": "PUNCT", "morph": "", "lemma": ".", "dep": "punct", "head": 0},
      {"id": 5, "start": 21, "end": 26, "tag": "VB", "pos": "VERB", "morph": "", "lemma": "serve", "dep": "ROOT", "head": 5},
      {"id": 6, "start": 26, "end": 27, "tag": ".", "pos": "PUNCT", "morph": "", "lemma": ".", "dep": "punct", "head": 5}
    ]
  }"#;

  #[test]
  fn test_decode_maps_sentences_and_whitespace() {
    let doc = decode_doc(BAKE_JSON).unwrap();

    assert_eq!(doc.len(), 7);
    assert_eq!(doc.sents(), &[0..5, 5..7]);
    assert_eq!(doc.token(3).text, "minutes");
    assert_eq!(doc.token(3).lemma, "minute");
    assert_eq!(doc.token(1).dep, Dep::Prep);
    assert_eq!(doc.token(2).pos, Pos::Num);
    assert!(doc.token(0).whitespace);
    assert!(!doc.token(3).whitespace);
    assert_eq!(doc.sentence_roots(), vec![0, 5]);
  }

  #[test]
  fn test_decode_counts_offsets_in_characters() {
    let body = r#"{
      "text": "Heat to 350°f until hot.",
      "sents": [{"start": 0, "end": 24}],
      "tokens": [
        {"id": 0, "start": 0, "end": 4, "tag": "VB", "pos": "VERB", "lemma": "heat", "dep": "ROOT", "head": 0},
        {"id": 1, "start": 5, "end": 7, "tag": "IN", "pos": "ADP", "lemma": "to", "dep": "prep", "head": 0},
        {"id": 2, "start": 8, "end": 11, "tag": "CD", "pos": "NUM", "lemma": "350", "dep": "nummod", "head": 3},
        {"id": 3, "start": 11, "end": 13, "tag": "NN", "pos": "NOUN", "lemma": "°f", "dep": "pobj", "head": 1},
        {"id": 4, "start": 14, "end": 19, "tag": "IN", "pos": "SCONJ", "lemma": "until", "dep": "mark", "head": 5},
        {"id": 5, "start": 20, "end": 23, "tag": "JJ", "pos": "ADJ", "lemma": "hot", "dep": "advcl", "head": 0},
        {"id": 6, "start": 23, "end": 24, "tag": ".", "pos": "PUNCT", "lemma": ".", "dep": "punct", "head": 0}
      ]
    }"#;

    let doc = decode_doc(body).unwrap();

    let texts: Vec<&str> = (0..doc.len()).map(|i| doc.token(i).text.as_str()).collect();
    assert_eq!(texts, vec!["Heat", "to", "350", "°f", "until", "hot", "."]);
    assert!(!doc.token(2).whitespace);
    assert!(doc.token(3).whitespace);
    assert!(!doc.token(6).whitespace);
    assert_eq!(doc.sents(), &[0..7]);

    let units = crate::instructions::sentence_units(1, &doc);
    assert_eq!(units[0].action, "heat");
    assert_eq!(units[0].until.as_deref(), Some("until hot"));
  }

  #[test]
  fn test_decode_trailing_space_after_multibyte_text() {
    let body = r#"{"text": "Add ½ ", "sents": [], "tokens": [
      {"id": 0, "start": 0, "end": 3, "tag": "VB", "pos": "VERB", "lemma": "add", "dep": "ROOT", "head": 0},
      {"id": 1, "start": 4, "end": 5, "tag": "CD", "pos": "NUM", "lemma": "½", "dep": "dobj", "head": 0}
    ]}"#;

    let doc = decode_doc(body).unwrap();
    assert_eq!(doc.token(1).text, "½");
    assert!(doc.token(1).whitespace);
  }

  #[test]
  fn test_decode_rejects_dangling_head() {
    let body = r#"{"text": "Stir", "sents": [], "tokens": [
      {"id": 0, "start": 0, "end": 4, "tag": "VB", "pos": "VERB", "lemma": "stir", "dep": "ROOT", "head": 3}
    ]}"#;

    let err = decode_doc(body).unwrap_err();
    assert!(matches!(err, SousChefError::MalformedDoc { .. }));
  }

  #[tokio::test]
  async fn test_http_analyzer_posts_text() {
    let mut server = Server::new_async().await;
    let mock = server
      .mock("POST", "/parse")
      .match_body(mockito::Matcher::Json(serde_json::json!({"text": "Bake for 20 minutes. Serve."})))
      .with_status(200)
      .with_header("content-type", "application/json")
      .with_body(BAKE_JSON)
      .create_async()
      .await;

    let analyzer = HttpAnalyzer::new(format!("{}/parse", server.url()), 5).unwrap();
    let doc = analyzer.analyze("Bake for 20 minutes. Serve.").await.unwrap();

    mock.assert_async().await;
    assert_eq!(doc.sents().len(), 2);
  }

  #[tokio::test]
  async fn test_http_analyzer_surfaces_status() {
    let mut server = Server::new_async().await;
    let _mock = server.mock("POST", "/parse").with_status(503).with_body("model loading").create_async().await;

    let analyzer = HttpAnalyzer::new(format!("{}/parse", server.url()), 5).unwrap();
    let err = analyzer.analyze("Stir.").await.unwrap_err();

    match err {
      SousChefError::ParserService { status, message } => {
        assert_eq!(status, 503);
        assert_eq!(message, "model loading");
      }
      other => panic!("Expected ParserService error, got: {other:?}"),
    }
  }
}
