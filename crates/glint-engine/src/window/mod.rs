//! Window controller and platform backends.
//!
//! This module is responsible for:
//! - the `Window` controller and its lifecycle dispatch
//! - the `PlatformWindow`/`EventLoop` contracts a backend implements
//! - the winit backend and a headless one that traces every call

mod config;
mod controller;
mod error;
mod event_loop;
mod handler;
mod platform;

pub mod headless;
pub mod native;

pub use config::WindowConfig;
pub use controller::{SharedHandler, Window};
pub use error::WindowError;
pub use event_loop::{EventLoop, LoopHandle};
pub use handler::{WindowCtx, WindowEventHandler};
pub use native::{NativeEventLoop, WinitWindow};
pub use platform::PlatformWindow;

/// Platform used by applications that do not pick one.
pub type DefaultWindow = WinitWindow;
