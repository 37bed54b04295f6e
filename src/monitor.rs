//! Exit monitor state machine
//!
//! Owns the pointer coordinate state, classifies it against the target and
//! trigger regions, debounces near-boundary departures through a delay
//! timer, and delivers a single "exit" notification before stopping itself.

mod handlers;

pub use handlers::{Handler, HandlerMap};

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};

use crate::error::MonitorError;
use crate::surface::{PointerEvent, Surface};

static NEXT_MONITOR_ID: AtomicU64 = AtomicU64::new(1);

/// Tuning knobs for an [`ExitMonitor`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonitorOptions {
    /// Pixel margin expanding the target bounds for "near" classification
    pub threshold: f64,
    /// How long the pointer may dwell in the threshold band before exit
    pub delay: Duration,
    /// Whether any pointer-down event forces an immediate exit
    pub exit_on_click: bool,
}

impl Default for MonitorOptions {
    fn default() -> Self {
        Self {
            threshold: 100.0,
            delay: Duration::from_millis(2000),
            exit_on_click: true,
        }
    }
}

/// Notification delivered to a registered handler when the pointer leaves
#[derive(Debug, Clone)]
pub struct ExitEvent<R> {
    /// The monitored target region the pointer left
    pub related_target: R,
    /// Payload properties: `type`, `source`, `pointerX` and `pointerY` by
    /// default, plus any caller-supplied extras (extras win on collision)
    pub properties: Map<String, Value>,
}

impl<R> ExitEvent<R> {
    /// Notification name, normally `"exit"`
    pub fn kind(&self) -> &str {
        self.properties
            .get("type")
            .and_then(Value::as_str)
            .unwrap_or("")
    }

    /// Pointer x coordinate at the time of the exit
    pub fn pointer_x(&self) -> f64 {
        self.properties
            .get("pointerX")
            .and_then(Value::as_f64)
            .unwrap_or(0.0)
    }

    /// Pointer y coordinate at the time of the exit
    pub fn pointer_y(&self) -> f64 {
        self.properties
            .get("pointerY")
            .and_then(Value::as_f64)
            .unwrap_or(0.0)
    }

    /// Id of the monitor that produced this notification
    pub fn source_id(&self) -> Option<u64> {
        self.properties.get("source").and_then(Value::as_u64)
    }
}

/// Pointer-exit state machine over a [`Surface`]
///
/// Constructed around a required target region and an optional trigger
/// region, started explicitly, and inert again after it fires an exit or is
/// stopped. The surface's event pump feeds it through
/// [`pointer_moved`](Self::pointer_moved),
/// [`pointer_down`](Self::pointer_down) and
/// [`timer_fired`](Self::timer_fired).
pub struct ExitMonitor<S: Surface> {
    surface: S,
    target: S::Region,
    trigger: Option<S::Region>,
    options: MonitorOptions,
    pointer_x: f64,
    pointer_y: f64,
    pending_exit: Option<S::Timer>,
    handlers: HandlerMap<S::Region>,
    move_bindings: usize,
    down_bindings: usize,
    id: u64,
}

impl<S: Surface> ExitMonitor<S> {
    /// Create a monitor for `target`, optionally suppressed by `trigger`
    ///
    /// The target is not validated here; its rectangle is queried from the
    /// surface on first classification.
    pub fn new(
        surface: S,
        target: S::Region,
        trigger: Option<S::Region>,
        options: MonitorOptions,
    ) -> Self {
        Self {
            surface,
            target,
            trigger,
            options,
            pointer_x: 0.0,
            pointer_y: 0.0,
            pending_exit: None,
            handlers: HandlerMap::new(),
            move_bindings: 0,
            down_bindings: 0,
            id: NEXT_MONITOR_ID.fetch_add(1, Ordering::Relaxed),
        }
    }

    /// Begin monitoring pointer movement
    ///
    /// Subscribes on the surface's global pointer-move stream and, when
    /// `exit_on_click` is set, the pointer-down stream. Calling `start`
    /// again without an intervening [`stop`](Self::stop) double-registers:
    /// each delivered event is then processed once per registration.
    pub fn start(&mut self) {
        log::debug!("monitor {}: start", self.id);
        self.surface.bind_move();
        self.move_bindings += 1;

        if self.options.exit_on_click {
            self.surface.bind_down();
            self.down_bindings += 1;
        }
    }

    /// Stop monitoring and clear any pending exit timer
    pub fn stop(&mut self) {
        log::debug!("monitor {}: stop", self.id);
        self.surface.unbind_move();
        self.move_bindings = 0;

        if self.options.exit_on_click {
            self.surface.unbind_down();
        }
        self.down_bindings = 0;

        self.reset();
    }

    /// Cancel any pending exit timer; safe to call when none is armed
    pub fn reset(&mut self) {
        if let Some(timer) = self.pending_exit.take() {
            log::debug!("monitor {}: pending exit cancelled", self.id);
            self.surface.cancel(timer);
        }
    }

    /// Stop monitoring and deliver the exit notification
    ///
    /// The default properties (`type`, `source`, `pointerX`, `pointerY`)
    /// are assembled first and `extra` entries are inserted over them, so a
    /// caller-supplied key wins on collision. The notification goes to the
    /// handler registered under the payload's final `type` value, if any.
    pub fn exit(&mut self, extra: Option<Map<String, Value>>) {
        self.stop();

        let mut properties = Map::new();
        properties.insert("type".to_string(), json!("exit"));
        properties.insert("source".to_string(), json!(self.id));
        properties.insert("pointerX".to_string(), json!(self.pointer_x));
        properties.insert("pointerY".to_string(), json!(self.pointer_y));
        if let Some(extra) = extra {
            for (key, value) in extra {
                properties.insert(key, value);
            }
        }

        log::debug!(
            "monitor {}: exit at ({}, {})",
            self.id,
            self.pointer_x,
            self.pointer_y
        );

        let event = ExitEvent {
            related_target: self.target.clone(),
            properties,
        };

        if let Some(handler) = self.handlers.get(event.kind()) {
            handler(&event);
        }
    }

    /// Whether the pointer is within the target region
    ///
    /// With `include_threshold` the bounds are expanded by the configured
    /// threshold on all four sides. Bounds are exclusive either way.
    pub fn in_target(&self, include_threshold: bool) -> bool {
        self.is_within(&self.target, include_threshold)
    }

    /// Whether the pointer is within the trigger region
    ///
    /// # Errors
    ///
    /// Returns [`MonitorError::MissingTriggerRegion`] when the monitor was
    /// constructed without a trigger region.
    pub fn in_trigger(&self, include_threshold: bool) -> Result<bool, MonitorError> {
        let trigger = self
            .trigger
            .as_ref()
            .ok_or(MonitorError::MissingTriggerRegion)?;
        Ok(self.is_within(trigger, include_threshold))
    }

    /// Deliver a pointer-move event from the surface's event pump
    ///
    /// Processed once per live registration; a stopped monitor ignores it.
    pub fn pointer_moved(&mut self, event: PointerEvent) {
        // Snapshot the registration count: a delivery that stops the
        // monitor does not suppress the remaining deliveries of this event.
        let deliveries = self.move_bindings;
        for _ in 0..deliveries {
            self.process_move(event);
        }
    }

    /// Deliver a pointer-down event from the surface's event pump
    ///
    /// Forces an exit regardless of pointer location. Only bound while
    /// `exit_on_click` is set; the coordinates are ignored.
    pub fn pointer_down(&mut self, _event: PointerEvent) {
        let deliveries = self.down_bindings;
        for _ in 0..deliveries {
            self.exit(None);
        }
    }

    /// Report expiry of a previously scheduled timer
    ///
    /// Consumes the pending timer and exits when the handle matches. A
    /// handle cancelled by [`reset`](Self::reset)/[`stop`](Self::stop), or
    /// one already consumed, no longer matches and is ignored.
    pub fn timer_fired(&mut self, timer: S::Timer) {
        if self.pending_exit.as_ref() == Some(&timer) {
            self.pending_exit = None;
            self.exit(None);
        }
    }

    /// Register `handler` for each whitespace-separated notification name
    pub fn on(&mut self, names: &str, handler: Handler<S::Region>) {
        self.handlers.on(names, handler);
    }

    /// Unregister `handler` from each whitespace-separated notification name
    pub fn off(&mut self, names: &str, handler: &Handler<S::Region>) {
        self.handlers.off(names, handler);
    }

    /// Whether the monitor currently holds any pointer-stream registration
    pub fn is_running(&self) -> bool {
        self.move_bindings > 0 || self.down_bindings > 0
    }

    /// Whether a delayed exit is armed
    pub fn has_pending_exit(&self) -> bool {
        self.pending_exit.is_some()
    }

    /// Process-unique monitor id, carried as `source` in the payload
    pub fn id(&self) -> u64 {
        self.id
    }

    /// Last observed pointer coordinates, `(0.0, 0.0)` before any movement
    pub fn pointer(&self) -> (f64, f64) {
        (self.pointer_x, self.pointer_y)
    }

    /// The monitored target region
    pub fn target(&self) -> &S::Region {
        &self.target
    }

    /// The trigger region, when one was configured
    pub fn trigger(&self) -> Option<&S::Region> {
        self.trigger.as_ref()
    }

    /// The monitor's options
    pub fn options(&self) -> &MonitorOptions {
        &self.options
    }

    /// The underlying surface collaborator
    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// Mutable access to the underlying surface collaborator
    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    fn is_within(&self, region: &S::Region, include_threshold: bool) -> bool {
        let margin = if include_threshold {
            self.options.threshold
        } else {
            0.0
        };
        self.surface
            .region_rect(region)
            .contains_with_margin(self.pointer_x, self.pointer_y, margin)
    }

    fn process_move(&mut self, event: PointerEvent) {
        self.pointer_x = event.x;
        self.pointer_y = event.y;

        let in_exact_target = self.in_target(false);
        let in_exact_trigger = match &self.trigger {
            Some(trigger) => self.is_within(trigger, false),
            None => false,
        };

        if in_exact_target || (self.trigger.is_some() && in_exact_trigger) {
            // Inside either region: always safe, disarm any pending exit.
            self.reset();
        } else if !in_exact_target && self.in_target(true) {
            // Near the boundary: arm the delayed exit, but leave an
            // already-armed timer running rather than rescheduling it.
            if self.pending_exit.is_none() {
                log::debug!("monitor {}: pointer in threshold band, exit armed", self.id);
                self.pending_exit = Some(self.surface.schedule_once(self.options.delay));
            }
        } else if !self.in_target(true) && !in_exact_trigger {
            // Far outside the expanded target and outside the trigger.
            self.exit(None);
        }
        // A position matching none of the branches leaves the state
        // untouched for this event.
    }
}
