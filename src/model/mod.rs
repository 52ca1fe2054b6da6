//! Domain model types (pure).
//!
//! All types in this module are plain data with no I/O and no timers.

pub mod chrome_state;
pub mod error;
pub mod key_action;
pub mod outputs;
pub mod signals;

// Re-export for convenience
pub use chrome_state::ChromeState;
pub use error::AppError;
pub use key_action::KeyAction;
pub use outputs::{VisibilityOutputs, FULL_OPACITY, VELOCITY_REVEAL_OPACITY};
pub use signals::{AccessibilityFlags, SignalSnapshot};
