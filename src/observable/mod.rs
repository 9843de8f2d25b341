//! Minimal observable primitives for view-model outputs.
//!
//! ```text
//! accept(v) ──→ Relay { latest } ──→ observer 1, observer 2, ...
//!                                   (registration order, synchronous)
//! ```
//!
//! - [`Relay`]: holds a value, replays it to new subscribers
//! - [`Signal`]: fire-and-forget events, no replay
//! - [`Property`] / [`Events`]: read-only handles given to consumers
//! - [`Subscription`] / [`SubscriptionBag`]: dropping releases observers
//! - [`Updates`]: async receiver over a subscription

mod relay;
mod subscription;

pub use relay::{Events, Property, Relay, Signal, Updates};
pub use subscription::{Subscription, SubscriptionBag};
