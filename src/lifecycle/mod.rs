//! # Visualization Lifecycle
//!
//! Guarded setup and teardown of the visualization against a [`RenderHost`].
//!
//! - [`LifecycleGuard`] - at most one live instance, rollback on failed setup
//! - [`Visualization`] - the `init` / `frame` / `on_resize` / `cleanup` hooks
//! - [`EventRegistry`] - explicit subscriptions to host events
//! - [`AnimationLoop`] - cancellation token checked before every frame

pub mod animation;
pub mod guard;
pub mod host;
pub mod state;
pub mod subscription;
pub mod visualization;

#[cfg(test)]
pub(crate) mod test_host;

pub use animation::AnimationLoop;
pub use guard::{Handle, LifecycleGuard};
pub use host::{RenderHost, StatusSink};
pub use state::LifecycleState;
pub use subscription::{EventRegistry, HostEvent, Subscription};
pub use visualization::Visualization;
