//! Aggregation layer for payment summaries.

mod summary;

#[allow(unused_imports)]
pub use summary::{member_summary, summarize, MemberSummary, YearSummary};
