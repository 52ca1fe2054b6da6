//! Lectern: auto-hiding reader chrome.
//!
//! A chrome visibility controller decides, from a handful of collaborator
//! signals, whether the floating controls of a reading surface are shown,
//! hidden, or briefly revealed after a slow upward scroll.
//!
//! The crate follows a Pure Core / Impure Shell split:
//! - [`model`] and [`state::resolve`] are pure data and functions
//! - [`state::ChromeController`] owns the timers, driven by an injected [`clock::Clock`]
//! - [`view`] hosts the controller in a terminal reader

pub mod clock;
pub mod config;
pub mod logging;
pub mod model;
pub mod preferences;
pub mod state;
pub mod view;
