//! Domain model: sheet layouts and the row/object mapping for each entity
pub mod aggregates;
pub mod value_objects;
