//! Visitor counter. One row per visit; the count is the number of data rows.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;

pub const VISITOR_SHEET: &str = "Visitors";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct VisitorCount { pub count: usize }

pub fn visit_row(now: DateTime<Utc>) -> Vec<String> { vec![now.to_rfc3339_opts(SecondsFormat::Millis, true)] }
