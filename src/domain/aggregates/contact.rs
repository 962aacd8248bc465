//! Contact requests left from the storefront contact page

use chrono::{DateTime, SecondsFormat, Utc};
use serde::Deserialize;
use validator::Validate;

use crate::domain::value_objects::lenient_text;

pub const CONTACT_SHEET: &str = "Contacts";
pub const CONTACT_HEADER: [&str; 4] = ["id", "name", "contact", "timestamp"];

#[derive(Debug, Default, Deserialize, Validate)]
pub struct ContactInput {
    #[serde(default, deserialize_with = "lenient_text")]
    #[validate(length(min = 1, message = "name is required"))]
    pub name: String,
    #[serde(default, deserialize_with = "lenient_text")]
    #[validate(length(min = 1, message = "contact is required"))]
    pub contact: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Contact {
    pub id: String,
    pub name: String,
    pub contact: String,
    pub timestamp: DateTime<Utc>,
}

impl Contact {
    pub fn record(input: ContactInput, now: DateTime<Utc>) -> Self {
        Self {
            id: now.timestamp_millis().to_string(),
            name: input.name.trim().to_string(),
            contact: input.contact.trim().to_string(),
            timestamp: now,
        }
    }

    pub fn to_row(&self) -> Vec<String> {
        vec![
            self.id.clone(),
            self.name.clone(),
            self.contact.clone(),
            self.timestamp.to_rfc3339_opts(SecondsFormat::Millis, true),
        ]
    }
}
