//! Rule functions.
//!
//! Every function takes the shared [`RuleContext`](crate::context::RuleContext)
//! and returns the findings of exactly one rule. Rules never fail: malformed
//! records become findings or skipped comparisons.

pub mod exchanges;
pub mod indicators;
pub mod org_unit;
pub mod periods;
pub mod reference;
pub mod requests;
pub mod versions;
