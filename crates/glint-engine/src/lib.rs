//! Glint engine crate.
//!
//! A thin convenience layer over a windowing system and a GPU driver: a window
//! controller that sequences context lifecycle and event dispatch, and a debug
//! introspector reporting driver capabilities and live driver objects.

pub mod debug;
pub mod device;
pub mod logging;
pub mod objects;
pub mod window;
