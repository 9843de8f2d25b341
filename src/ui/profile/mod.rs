//! Profile screen: header fields, segmented listings, search filter.

mod intent;
mod projector;
mod reducer;
mod state;
mod view;

pub use intent::{ChannelGroup, ProfileIntent};
pub use projector::{ProfileDependencies, ProfileStateProjector, ProjectorError};
pub use reducer::ProfileReducer;
pub use state::{ProfileOrigin, ProfileState};
pub use view::ProfileView;
