//! Vehicle classification and delay extraction.
//!
//! Filters the whole-network vehicle list down to rail vehicles believed to
//! run on the target line and turns the delayed ones into display records.

mod extract;
mod rules;

pub use extract::{Candidate, Classified, DelayedTrain, NOT_AVAILABLE, UNKNOWN, clean_html, process};
pub use rules::{EXCLUSIVE_STATIONS, MembershipRule, ROUTE_KEYWORDS, ZONAL_ROUTES, line_membership};
