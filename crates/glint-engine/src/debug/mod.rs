//! Debug introspection.
//!
//! Builds grouped, human-readable reports of driver capabilities and live
//! driver objects, and writes them to the log.

mod info;
mod introspector;
mod size;

pub use info::{InfoGroup, InfoUnit, Property};
pub use introspector::{
    general_info, object_info, object_name, print, print_all, print_general_info,
    print_object_info, render, DebugInfo,
};
pub use size::human_readable_size;
