//! Chrome visibility state machine.
//!
//! The resolver and velocity tracker are synchronous and pure; the
//! schedulers own deadline-based timers that the controller fires from the
//! host's event loop.

pub mod activity;
pub mod auto_hide;
pub mod controller;
pub mod pause_reveal;
pub mod resolver;
pub mod timer;
pub mod velocity;

// Re-export for convenience
pub use activity::RecentActivity;
pub use auto_hide::AutoHideScheduler;
pub use controller::ChromeController;
pub use pause_reveal::PauseRevealScheduler;
pub use resolver::resolve;
pub use timer::{CancellableTimer, TimerHandle, TimerKind};
pub use velocity::{VelocityReading, VelocitySample, VelocityTracker};
