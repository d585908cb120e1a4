//! Rendering contexts.
//!
//! This module is responsible for:
//! - the `RenderContext` contract the window controller drives
//! - the requested `ContextFormat`
//! - the wgpu-backed native context and its driver capability report

mod context;
mod driver;
mod format;
mod gpu;
mod surface;

pub use context::{ContextError, RenderContext};
pub use driver::{vendor_name, DriverInfo, DriverSummary, LimitFamily};
pub use format::{ContextFormat, Profile};
pub use gpu::{GpuFrame, WgpuContext};
pub use surface::SurfaceErrorAction;
