//! View Layer
//!
//! Everything a screen needs that does not depend on the UI toolkit.

mod cache;
mod controller;
mod route;

pub use cache::{DetailState, DetailView, IndexView, ViewChange};
pub use controller::Controller;
pub use route::{share_link, Screen};
