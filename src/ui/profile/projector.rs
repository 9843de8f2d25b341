//! View-model of the profile screen.
//!
//! Commands come from the UI thread; fetches run as Tokio tasks and feed
//! their results back through [`ProfileReducer`]. After every transition the
//! affected output channels are republished from a fresh [`ProfileView`].

use std::collections::VecDeque;
use std::future::Future;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Weak};

use parking_lot::Mutex;
use thiserror::Error;
use tokio::sync::Notify;

use crate::model::{
    Advertisement, ListingItem, ListingSection, ProfileTabSegment, SectionKind, Tag, UserId,
};
use crate::observable::{Events, Property, Relay, Signal, SubscriptionBag};
use crate::source::{Navigator, ProductDataSource, ProfileCache, ProfileDataSource, SourceError};
use crate::ui::mvi::Reducer;
use crate::ui::profile::intent::{ChannelGroup, ProfileIntent};
use crate::ui::profile::reducer::ProfileReducer;
use crate::ui::profile::state::ProfileState;
use crate::ui::profile::view::ProfileView;

/// Errors returned synchronously by projector commands.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProjectorError {
    #[error("Unknown segment index {index}")]
    UnknownSegment { index: usize },
}

/// Collaborators injected into the projector.
#[derive(Clone)]
pub struct ProfileDependencies {
    pub profiles: Arc<dyn ProfileDataSource>,
    pub products: Arc<dyn ProductDataSource>,
    pub cache: Arc<dyn ProfileCache>,
    pub navigator: Arc<dyn Navigator>,
}

impl std::fmt::Debug for ProfileDependencies {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProfileDependencies").finish_non_exhaustive()
    }
}

/// Output channels, written only by [`Shared::apply`].
struct Outputs {
    username: Relay<String>,
    display_name: Relay<String>,
    follower_count: Relay<String>,
    following_count: Relay<String>,
    location: Relay<String>,
    combined_sections: Relay<Vec<ListingSection>>,
    selected_segment: Relay<ProfileTabSegment>,
    /// Input: the UI writes the search field here.
    search_text: Relay<String>,
    /// Raw data-source errors, one per failed fetch.
    errors: Signal<SourceError>,
}

impl Outputs {
    fn new(view: &ProfileView) -> Self {
        Self {
            username: Relay::new(view.username.clone()),
            display_name: Relay::new(view.display_name.clone()),
            follower_count: Relay::new(view.follower_count.clone()),
            following_count: Relay::new(view.following_count.clone()),
            location: Relay::new(view.location.clone()),
            combined_sections: Relay::new(view.sections.clone()),
            selected_segment: Relay::new(view.selected_segment),
            search_text: Relay::new(String::new()),
            errors: Signal::new(),
        }
    }

    fn publish(&self, view: &ProfileView, group: ChannelGroup) {
        match group {
            ChannelGroup::Profile => {
                self.username.accept(view.username.clone());
                self.display_name.accept(view.display_name.clone());
                self.follower_count.accept(view.follower_count.clone());
                self.following_count.accept(view.following_count.clone());
                self.location.accept(view.location.clone());
            }
            ChannelGroup::Sections => self.combined_sections.accept(view.sections.clone()),
            ChannelGroup::Segment => self.selected_segment.accept(view.selected_segment),
        }
    }
}

/// Work waiting to be applied, in arrival order.
enum Delivery {
    Intent(ProfileIntent),
    Error(SourceError),
}

#[derive(Default)]
struct Mailbox {
    pending: VecDeque<Delivery>,
    /// Set while some thread is applying deliveries.
    draining: bool,
}

/// State and outputs shared with in-flight fetch tasks.
struct Shared {
    mailbox: Mutex<Mailbox>,
    state: Mutex<ProfileState>,
    outputs: Outputs,
}

impl Shared {
    fn dispatch(&self, intent: ProfileIntent) {
        self.deliver(Delivery::Intent(intent));
    }

    fn report(&self, error: SourceError) {
        self.deliver(Delivery::Error(error));
    }

    /// Queues `delivery` and, unless another thread is already draining,
    /// applies the queue on this thread until it is empty.
    ///
    /// No lock is held while observers run, and a caller never waits for
    /// another thread's observers. Deliveries are applied one at a time in
    /// arrival order, so channels never go back to an older state.
    fn deliver(&self, delivery: Delivery) {
        {
            let mut mailbox = self.mailbox.lock();
            mailbox.pending.push_back(delivery);
            if mailbox.draining {
                return;
            }
            mailbox.draining = true;
        }

        let _reset = DrainGuard(&self.mailbox);
        loop {
            let next = {
                let mut mailbox = self.mailbox.lock();
                match mailbox.pending.pop_front() {
                    Some(next) => next,
                    None => {
                        mailbox.draining = false;
                        return;
                    }
                }
            };
            self.apply(next);
        }
    }

    fn apply(&self, delivery: Delivery) {
        let intent = match delivery {
            Delivery::Intent(intent) => intent,
            Delivery::Error(error) => {
                self.outputs.errors.emit(error);
                return;
            }
        };
        let group = intent.channels();

        let view = {
            let mut state = self.state.lock();
            if let ProfileIntent::ListingsLoaded { segment, .. } = &intent {
                if *segment != state.segment {
                    tracing::debug!(%segment, "Discarding listings for deselected segment");
                    return;
                }
            }
            tracing::debug!(intent = intent.label(), "Applying profile intent");
            let next = ProfileReducer::reduce(std::mem::take(&mut *state), intent);
            *state = next;
            ProfileView::project(&state)
        };

        self.outputs.publish(&view, group);
    }

    fn selected_segment(&self) -> ProfileTabSegment {
        self.state.lock().segment
    }
}

/// Hands draining over if an observer panics mid-delivery.
struct DrainGuard<'a>(&'a Mutex<Mailbox>);

impl Drop for DrainGuard<'_> {
    fn drop(&mut self) {
        if std::thread::panicking() {
            self.0.lock().draining = false;
        }
    }
}

/// Count of running fetch tasks, with a wake-up when it reaches zero.
#[derive(Default)]
struct InFlight {
    count: AtomicUsize,
    idle: Notify,
}

impl InFlight {
    async fn wait_idle(&self) {
        loop {
            // Register interest before checking the count so a task that
            // finishes in between still wakes us.
            let notified = self.idle.notified();
            tokio::pin!(notified);
            notified.as_mut().enable();
            if self.count.load(Ordering::SeqCst) == 0 {
                return;
            }
            notified.await;
        }
    }
}

/// Decrements the in-flight count when the task ends, including on panic.
struct InFlightGuard(Arc<InFlight>);

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        if self.0.count.fetch_sub(1, Ordering::SeqCst) == 1 {
            self.0.idle.notify_waiters();
        }
    }
}

/// Reactive view-model for the profile screen.
///
/// Must be driven from within a Tokio runtime: fetch commands spawn tasks
/// and return immediately. Results are published on the output channels
/// strictly after the command that requested them. Every output except
/// [`search_text`](Self::search_text) is handed out read-only.
///
/// Dropping the projector releases its internal subscriptions. Fetches that
/// are still running complete, but their results are discarded.
pub struct ProfileStateProjector {
    user_id: UserId,
    deps: ProfileDependencies,
    shared: Arc<Shared>,
    in_flight: Arc<InFlight>,
    bag: SubscriptionBag,
}

impl ProfileStateProjector {
    pub fn new(
        user_id: UserId,
        initial_segment: ProfileTabSegment,
        deps: ProfileDependencies,
    ) -> Self {
        let state = ProfileState::new(initial_segment);
        let outputs = Outputs::new(&ProfileView::project(&state));
        let shared = Arc::new(Shared {
            mailbox: Mutex::new(Mailbox::default()),
            state: Mutex::new(state),
            outputs,
        });

        let mut bag = SubscriptionBag::new();
        let weak: Weak<Shared> = Arc::downgrade(&shared);
        shared
            .outputs
            .search_text
            .subscribe_changes(move |text: &String| {
                if let Some(shared) = weak.upgrade() {
                    shared.dispatch(ProfileIntent::SearchChanged(text.clone()));
                }
            })
            .disposed_by(&mut bag);

        Self {
            user_id,
            deps,
            shared,
            in_flight: Arc::new(InFlight::default()),
            bag,
        }
    }

    pub fn user_id(&self) -> UserId {
        self.user_id
    }

    /// Requests the user profile.
    ///
    /// On success the profile channels are republished and the snapshot is
    /// stored in the cache. On failure the cached snapshot (if any) is
    /// published instead, and the error is emitted on `errors` either way.
    /// Cache access runs on the blocking pool.
    pub fn fetch_data(&self) {
        let profiles = Arc::clone(&self.deps.profiles);
        let cache = Arc::clone(&self.deps.cache);
        let weak = Arc::downgrade(&self.shared);
        let user_id = self.user_id;

        self.spawn(async move {
            let result = profiles.fetch_user(user_id).await;
            if weak.strong_count() == 0 {
                tracing::debug!(%user_id, "Profile screen gone, dropping profile result");
                return;
            }

            match result {
                Ok(profile) => {
                    let snapshot = profile.clone();
                    let stored = tokio::task::spawn_blocking(move || cache.store(&snapshot)).await;
                    if let Err(e) = stored {
                        tracing::warn!(%user_id, error = %e, "Profile cache store failed");
                    }
                    if let Some(shared) = weak.upgrade() {
                        shared.dispatch(ProfileIntent::UserLoaded(profile));
                    }
                }
                Err(error) => {
                    tracing::warn!(%user_id, error = %error, "Profile fetch failed");
                    let cached = match tokio::task::spawn_blocking(move || cache.get()).await {
                        Ok(cached) => cached,
                        Err(e) => {
                            tracing::warn!(%user_id, error = %e, "Profile cache read failed");
                            None
                        }
                    };
                    let Some(shared) = weak.upgrade() else {
                        return;
                    };
                    if let Some(cached) = cached {
                        tracing::info!(%user_id, "Showing cached profile");
                        shared.dispatch(ProfileIntent::UserRestored(cached));
                    }
                    shared.report(error);
                }
            }
        });
    }

    /// Requests the listings of the currently selected segment.
    ///
    /// All calls of the cycle must succeed for the sections to change; the
    /// first failure is emitted on `errors` and the previous sections stay.
    pub fn fetch_products(&self) {
        self.load_listings(self.shared.selected_segment());
    }

    /// Selects the segment at `index` and fetches its listings.
    pub fn did_select_segment(&self, index: usize) -> Result<ProfileTabSegment, ProjectorError> {
        let segment =
            ProfileTabSegment::from_index(index).ok_or(ProjectorError::UnknownSegment { index })?;
        self.shared.dispatch(ProfileIntent::SegmentSelected(segment));
        self.load_listings(segment);
        Ok(segment)
    }

    /// Same as writing to the `search_text` relay.
    pub fn set_search_text(&self, text: impl Into<String>) {
        self.shared.outputs.search_text.accept(text.into());
    }

    pub fn get_language_tapped(&self) {
        tracing::info!("Opening language selector");
        self.deps.navigator.open_language_selector();
    }

    /// Resolves once no fetch started by this projector is still running.
    pub async fn settled(&self) {
        self.in_flight.wait_idle().await;
    }

    pub fn username(&self) -> Property<String> {
        self.shared.outputs.username.property()
    }

    pub fn display_name(&self) -> Property<String> {
        self.shared.outputs.display_name.property()
    }

    pub fn follower_count(&self) -> Property<String> {
        self.shared.outputs.follower_count.property()
    }

    pub fn following_count(&self) -> Property<String> {
        self.shared.outputs.following_count.property()
    }

    pub fn location(&self) -> Property<String> {
        self.shared.outputs.location.property()
    }

    /// Sections of the selected segment after the search filter.
    pub fn combined_sections(&self) -> Property<Vec<ListingSection>> {
        self.shared.outputs.combined_sections.property()
    }

    pub fn selected_segment(&self) -> Property<ProfileTabSegment> {
        self.shared.outputs.selected_segment.property()
    }

    /// The search field. The only channel callers may write.
    pub fn search_text(&self) -> &Relay<String> {
        &self.shared.outputs.search_text
    }

    pub fn errors(&self) -> Events<SourceError> {
        self.shared.outputs.errors.events()
    }

    /// Snapshot of the current state.
    pub fn state(&self) -> ProfileState {
        self.shared.state.lock().clone()
    }

    /// Projection of the current state.
    pub fn view(&self) -> ProfileView {
        ProfileView::project(&self.shared.state.lock())
    }

    fn load_listings(&self, segment: ProfileTabSegment) {
        let products = Arc::clone(&self.deps.products);
        let weak = Arc::downgrade(&self.shared);

        self.spawn(async move {
            let result = load_sections(products.as_ref(), segment).await;
            let Some(shared) = weak.upgrade() else {
                tracing::debug!(%segment, "Profile screen gone, dropping listings");
                return;
            };

            match result {
                Ok(sections) => shared.dispatch(ProfileIntent::ListingsLoaded { segment, sections }),
                Err(error) => {
                    tracing::warn!(%segment, error = %error, "Listing fetch failed");
                    shared.report(error);
                }
            }
        });
    }

    fn spawn<F>(&self, task: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        self.in_flight.count.fetch_add(1, Ordering::SeqCst);
        let guard = InFlightGuard(Arc::clone(&self.in_flight));
        tokio::spawn(async move {
            let _guard = guard;
            task.await;
        });
    }
}

impl std::fmt::Debug for ProfileStateProjector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProfileStateProjector")
            .field("user_id", &self.user_id)
            .field("state", &*self.shared.state.lock())
            .field("subscriptions", &self.bag.len())
            .finish()
    }
}

/// Issues the data-source calls for one listing cycle.
async fn load_sections(
    source: &dyn ProductDataSource,
    segment: ProfileTabSegment,
) -> Result<Vec<ListingSection>, SourceError> {
    let sections = match segment {
        ProfileTabSegment::Products => {
            let (items, ads, tags) = tokio::try_join!(
                source.fetch_products(segment),
                source.fetch_ads(),
                source.fetch_tags()
            )?;
            let mut sections = vec![ListingSection::new(SectionKind::Products, items)];
            sections.extend(
                [ads_section(ads.advertisements), tags_section(tags.tags)]
                    .into_iter()
                    .filter(|section| !section.is_empty()),
            );
            sections
        }
        ProfileTabSegment::AdsAndTags => {
            let (ads, tags) = tokio::try_join!(source.fetch_ads(), source.fetch_tags())?;
            vec![ads_section(ads.advertisements), tags_section(tags.tags)]
        }
        ProfileTabSegment::Followers => {
            let items = source.fetch_products(segment).await?;
            vec![ListingSection::new(SectionKind::Followers, items)]
        }
        ProfileTabSegment::Following => {
            let items = source.fetch_products(segment).await?;
            vec![ListingSection::new(SectionKind::Following, items)]
        }
    };
    Ok(sections)
}

fn ads_section(ads: Vec<Advertisement>) -> ListingSection {
    ListingSection::new(
        SectionKind::Advertisements,
        ads.into_iter().map(ListingItem::Advertisement).collect(),
    )
}

fn tags_section(tags: Vec<Tag>) -> ListingSection {
    ListingSection::new(
        SectionKind::Tags,
        tags.into_iter().map(ListingItem::Tag).collect(),
    )
}
