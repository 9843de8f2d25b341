//! External collaborators of the profile screen.
//!
//! The screen only sees these traits; network clients, persistence and
//! navigation live behind them.

mod error;
mod fixture;
mod traits;

pub use error::SourceError;
pub use fixture::{Fixture, FixtureError, FixtureOperation, FixtureSource};
pub use traits::{Navigator, ProductDataSource, ProfileCache, ProfileDataSource};
