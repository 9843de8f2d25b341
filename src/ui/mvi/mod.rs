//! Model-View-Intent (MVI) primitives for screen view-models.
//!
//! ```text
//! Intent ──→ Reducer ──→ State ──→ projection ──→ published channels
//!    ↑                                                │
//!    └──────────── user actions / fetch results ──────┘
//! ```
//!
//! - **State**: everything a screen knows, cloned on change
//! - **Intent**: a user action or an async result
//! - **Reducer**: pure `(State, Intent) -> State`

mod intent;
mod reducer;
mod state;

pub use intent::Intent;
pub use reducer::Reducer;
pub use state::UiState;
