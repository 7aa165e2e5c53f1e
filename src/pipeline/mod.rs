//! Fax routing pipeline.
//!
//! Every email record in the input directory flows through:
//! 1. `FaxRules`: sender marker + attachment reference (no LLM)
//! 2. `FaxClassifier`: LLM call mapped onto the fixed category set
//! 3. `FaxRouter`: timestamped copy into the category folder
//!
//! `FaxProcessor` drives the gates one record at a time.

pub mod classifier;
pub mod notify;
pub mod processor;
pub mod router;
pub mod rules;
pub mod types;

pub use processor::FaxProcessor;
pub use types::{BatchSummary, Category, Classification, RecordOutcome};
