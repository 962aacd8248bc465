//! Aggregates module
pub mod admin;
pub mod contact;
pub mod lead;
pub mod product;
pub mod visitor;

pub use admin::{AdminCredential, ADMIN_SHEET};
pub use contact::{Contact, ContactInput, CONTACT_SHEET};
pub use lead::{LeadInput, LEAD_SHEET};
pub use product::{Product, ProductInput, ProductPatch, PRODUCT_HEADER, PRODUCT_SHEET};
pub use visitor::{visit_row, VisitorCount, VISITOR_SHEET};
