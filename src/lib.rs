//! Fax router: classifies fax notification attachments and files them by category.

pub mod config;
pub mod error;
pub mod llm;
pub mod pipeline;
