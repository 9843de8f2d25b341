//! Base trait for intents.

/// Marker trait for intent objects.
///
/// Intents carry either a user action (segment tap, search edit) or the
/// outcome of an async fetch back into the reducer.
pub trait Intent: Send + 'static {}
