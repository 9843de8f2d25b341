//! Reactive view-model for a marketplace profile screen.
//!
//! [`ProfileStateProjector`] turns async profile and listing fetches, a
//! snapshot cache and user input (segment taps, search text) into observable
//! display state.
//!
//! ```text
//! fetch_data / fetch_products / did_select_segment / search_text
//!        │
//!        ▼
//! data sources ──→ ProfileIntent ──→ ProfileReducer ──→ ProfileState
//!                                                        │
//!                       Relay / Signal outputs ◀── ProfileView
//! ```

pub mod cache;
pub mod config;
pub mod logging;
pub mod model;
pub mod observable;
pub mod source;
pub mod ui;

pub use ui::profile::{ProfileDependencies, ProfileStateProjector, ProjectorError};
