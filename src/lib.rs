//! exit-intent library - pointer exit detection
//!
//! Tracks raw pointer coordinates against a target region (and an optional
//! trigger region), debounces near-boundary departures through a delay
//! timer, and delivers a single "exit" notification before going inert.
//! Region bounds, pointer event subscription, and timers come from the host
//! environment through the [`Surface`] trait.

pub mod error;
pub mod geometry;
pub mod monitor;
pub mod surface;

#[cfg(test)]
pub mod test_utils;

// Re-export commonly used types for convenience
pub use error::MonitorError;
pub use geometry::Rect;
pub use monitor::{ExitEvent, ExitMonitor, Handler, HandlerMap, MonitorOptions};
pub use surface::{PointerEvent, Surface};
