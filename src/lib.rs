//! cvrank - score and rank entity-extraction results from uploaded CVs.
//!
//! The library turns the `(label, text)` spans produced by an external NER
//! model, together with the normalized document text, into an explainable
//! score. Scored records are kept in a durable CSV-backed store that supports
//! search, filter and sort views.

pub mod app;
pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod ranking;
pub mod scoring;
pub mod search;
pub mod storage;
pub mod test_utils;
pub mod utils;

pub use error::{CvError, Result};
