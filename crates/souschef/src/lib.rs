//! SousChef turns a Tasty recipe into an annotated cooking timeline.
//!
//! The recipe is fetched, its ingredients are reduced to food terms, the
//! instructions are parsed into idea units (action, ingredients, until
//! clause, minutes) and the result is laid out and drawn as an SVG chart.

pub mod cache;
pub mod cli;
pub mod config;
pub mod error;
pub mod instructions;
pub mod nlp;
pub mod normalizer;
pub mod pipeline;
pub mod recipe;
pub mod render;
pub mod server;
pub mod timeline;

pub use error::{Result, SousChefError};
pub use pipeline::{Plan, Planner};
