//! Host lifecycle hooks.
//!
//! The host delivers lifecycle events (session created, idle, errored, ...)
//! to every hook that subscribed to their type.

pub mod events;
pub mod notifier;

pub use events::{HookEvent, SessionProperties};
pub use notifier::{Announcer, CommandAnnouncer, IdleNotifier};
