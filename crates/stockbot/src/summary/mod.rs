//! Quote summaries
//!
//! [`SummaryBuilder`] is the entry point: it resolves the query, fetches
//! history and a snapshot, reconciles missing fields
//! ([`ReconciledQuote`]), derives change figures ([`DerivedMetrics`]) and
//! renders the fixed-order [`Summary`] text.

pub mod builder;
pub mod format;
pub mod metrics;

pub use builder::{DEFAULT_HISTORY_DAYS, SummaryBuilder};
pub use format::{LABELS, Summary, format_money};
pub use metrics::{DerivedMetrics, FLAT_THRESHOLD_PCT, ReconciledQuote, Trend};
