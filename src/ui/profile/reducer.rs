use crate::ui::mvi::Reducer;
use crate::ui::profile::intent::ProfileIntent;
use crate::ui::profile::state::{ProfileOrigin, ProfileState};

pub struct ProfileReducer;

impl Reducer for ProfileReducer {
    type State = ProfileState;
    type Intent = ProfileIntent;

    fn reduce(state: Self::State, intent: Self::Intent) -> Self::State {
        match intent {
            ProfileIntent::UserLoaded(user) => ProfileState {
                user: Some(user),
                origin: ProfileOrigin::Fetched,
                ..state
            },
            ProfileIntent::UserRestored(user) => ProfileState {
                user: Some(user),
                origin: ProfileOrigin::Cached,
                ..state
            },
            // Sections of the previous segment stay until the new fetch lands.
            ProfileIntent::SegmentSelected(segment) => ProfileState { segment, ..state },
            ProfileIntent::ListingsLoaded { segment, sections } => {
                if segment != state.segment {
                    return state;
                }
                ProfileState { sections, ..state }
            }
            ProfileIntent::SearchChanged(search_text) => ProfileState {
                search_text,
                ..state
            },
        }
    }
}
