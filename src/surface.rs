//! Surface collaborator trait
//!
//! The monitor core never touches a real windowing system. Everything it
//! needs from the outside world -- region bounds, global pointer event
//! subscription, and single-shot timers -- comes through this trait, so a
//! browser bridge, a desktop toolkit, or a test fixture can all host it.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::geometry::Rect;

/// A pointer sample in page coordinates
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PointerEvent {
    pub x: f64,
    pub y: f64,
}

/// Capabilities the exit monitor consumes from its host environment
///
/// Implementations must support several monitors bound to the same global
/// pointer streams without interference, must tolerate repeated `bind_*`
/// calls (each one adds a registration), and must treat `unbind_*` without
/// a matching bind as a no-op.
pub trait Surface {
    /// Opaque handle to a rectangular screen area
    type Region: Clone;

    /// Handle to a scheduled single-shot timer
    type Timer: PartialEq;

    /// Current bounding rectangle of a region
    ///
    /// Queried on every classification; the core never caches bounds.
    fn region_rect(&self, region: &Self::Region) -> Rect;

    /// Register the calling monitor on the global pointer-move stream
    fn bind_move(&mut self);

    /// Drop every pointer-move registration held by the calling monitor
    fn unbind_move(&mut self);

    /// Register the calling monitor on the global pointer-down stream
    fn bind_down(&mut self);

    /// Drop every pointer-down registration held by the calling monitor
    fn unbind_down(&mut self);

    /// Schedule a single-shot timer; expiry is reported back through
    /// [`ExitMonitor::timer_fired`](crate::monitor::ExitMonitor::timer_fired)
    fn schedule_once(&mut self, delay: Duration) -> Self::Timer;

    /// Cancel a previously scheduled timer (no-op if it already fired)
    fn cancel(&mut self, timer: Self::Timer);
}
