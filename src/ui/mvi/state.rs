//! Base trait for screen state.

/// Marker trait for screen state objects.
///
/// Published values are derived from the state, so it must be cheap to
/// snapshot (`Clone`) and start from a well-defined empty value (`Default`).
pub trait UiState: Clone + PartialEq + Default + Send + 'static {}
