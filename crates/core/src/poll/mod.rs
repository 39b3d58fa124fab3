//! Polling controller: owns the selected symbol and fetched data, issues fetches on mount, on
//! symbol change and on timers, and applies results only when they belong to the current
//! selection.

pub mod controller;
pub mod notify;
pub mod poller;
pub mod state;

pub use controller::{PollIntervals, PollingController};
pub use notify::{Notification, Notifications};
pub use poller::Poller;
pub use state::{ApplyOutcome, DashboardState, Payload, Update};
