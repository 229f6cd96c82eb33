//! Integrations of the value model with external crates

pub mod serde;
