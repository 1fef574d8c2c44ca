//! # Veritas
//!
//! A news-veracity classification toolkit for Rust.
//!
//! ## Features
//!
//! - Heterogeneous CSV source merging into a canonical dataset
//! - Canonical text normalization shared by training and inference
//! - TF-IDF vectorization and a linear margin classifier
//! - Paired model/vectorizer artifacts with atomic load semantics
//! - Knowledge-base overrides for known cases
//! - Web form and console front ends over the same inference engine

pub mod cli;
pub mod dataset;
pub mod error;
pub mod infer;
pub mod label;
pub mod ml;
pub mod normalize;
pub mod report;
pub mod server;
pub mod train;

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
