//! # sales-query
//!
//! Deterministic answers to natural-language questions about sales records.
//!
//! A semantic parser (an LLM) turns the user's question into a
//! [`QueryIntent`]. Everything after that is plain computation: the time
//! filter is resolved to an inclusive calendar range, matching records are
//! fetched from a [`RecordSource`], aggregated, and rendered as one sentence.
//!
//! ## Modules
//!
//! - [`temporal`] — time expression → inclusive [`DateRange`]
//! - [`aggregate`] — sums, averages, per-store totals, best/worst store
//! - [`dispatch`] — intent → filter → records → response sentence
//! - [`source`] — record filter and the [`RecordSource`] boundary
//! - [`semantic`] — parser request payload and intent extraction
//! - [`model`] — records, intents, and date ranges
//! - [`error`] — Error types

pub mod aggregate;
pub mod dispatch;
pub mod error;
pub mod model;
pub mod semantic;
pub mod source;
pub mod temporal;

pub use aggregate::{
    aggregate_flat, group_by_store, pick_extremal_store, AggregationResult, Direction,
    StoreTotal, StoreTotals,
};
pub use dispatch::{answer, dispatch, range_phrase, Answer, CURRENCY};
pub use error::{QueryError, SourceError};
pub use model::{DateRange, QueryIntent, QueryType, SaleRecord};
pub use semantic::{build_parse_request, build_prompt, extract_intent, parse_intent};
pub use source::{InMemorySource, RecordFilter, RecordSource};
pub use temporal::resolve_date_range;
