//! Enquiry leads, stored in the `Users` sheet

use chrono::{DateTime, SecondsFormat, Utc};
use serde::Deserialize;

use crate::domain::value_objects::lenient_text;

pub const LEAD_SHEET: &str = "Users";
pub const LEAD_HEADER: [&str; 3] = ["timestamp", "name", "contact"];

#[derive(Debug, Default, Deserialize)]
pub struct LeadInput {
    #[serde(default, deserialize_with = "lenient_text")]
    pub name: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub phone: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub email: String,
}

impl LeadInput {
    /// Phone when given, otherwise email.
    pub fn contact(&self) -> &str {
        [&self.phone, &self.email].into_iter().map(|s| s.trim()).find(|s| !s.is_empty()).unwrap_or_default()
    }

    pub fn to_row(&self, now: DateTime<Utc>) -> Vec<String> {
        vec![now.to_rfc3339_opts(SecondsFormat::Millis, true), self.name.trim().to_string(), self.contact().to_string()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_phone_preferred_over_email() {
        let lead = LeadInput { name: "Ravi".into(), phone: "12345".into(), email: "r@x.in".into() };
        assert_eq!(lead.contact(), "12345");
        let lead = LeadInput { name: "Ravi".into(), phone: " ".into(), email: "r@x.in".into() };
        assert_eq!(lead.contact(), "r@x.in");
        assert_eq!(LeadInput::default().contact(), "");
    }

    #[test]
    fn test_lead_row() {
        let now = Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap();
        let lead = LeadInput { name: "Ravi".into(), email: "r@x.in".into(), ..Default::default() };
        assert_eq!(lead.to_row(now), vec!["2024-01-02T03:04:05.000Z", "Ravi", "r@x.in"]);
        assert_eq!(lead.to_row(now).len(), LEAD_HEADER.len());
    }
}
