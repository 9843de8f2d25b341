//! Screen view-models.

pub mod mvi;
pub mod profile;
