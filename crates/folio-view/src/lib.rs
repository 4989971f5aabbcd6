//! Platform-free view state for the portfolio page.
//!
//! Every component is a plain state machine: the browser frontend feeds it
//! events and renders whatever comes back. Nothing in here touches the DOM.

pub mod config;
pub mod device;
pub mod edit;
pub mod nav;
pub mod notify;
pub mod portfolio;
pub mod reveal;
pub mod scroll;
pub mod stats;
pub mod theme;
pub mod throttle;
pub mod typewriter;
pub mod upload;

pub use config::SiteConfig;
pub use portfolio::{Environment, Portfolio};
