//! Animated, simplified Keplerian orbits of the solar system on a plane.
//!
//! The library holds everything that is not terminal I/O: orbit sampling,
//! the per-frame updater, click selection, viewport framing and the
//! session that ties them together behind [`session::Control`].

pub mod body;
pub mod config;
pub mod error;
pub mod orbit;
pub mod select;
pub mod session;
pub mod state;
pub mod trail;
pub mod updater;
pub mod viewport;

pub use body::{solar_system, Body, Rgb};
pub use error::ConfigError;
pub use orbit::{OrbitTable, Point};
pub use session::{Control, Session, SessionOptions, Surface};
pub use state::SimulationState;
pub use updater::{Telemetry, UpdateResult};
pub use viewport::{compute_view, ScrollDirection, ViewBounds};
