//! Shared test utilities for exit-intent
//!
//! This module provides common test fixtures and helper functions
//! used across multiple test modules.

#[cfg(test)]
pub mod test_helpers {
    use std::collections::HashMap;
    use std::time::Duration;

    use crate::geometry::Rect;
    use crate::monitor::{ExitMonitor, MonitorOptions};
    use crate::surface::Surface;

    /// The 200x200 target at (100, 100) used by the scenario tests
    pub const TARGET_RECT: Rect = Rect {
        left: 100.0,
        top: 100.0,
        width: 200.0,
        height: 200.0,
    };

    /// Scriptable in-memory surface recording every collaborator call
    #[derive(Debug, Default)]
    pub struct FakeSurface {
        pub rects: HashMap<&'static str, Rect>,
        pub move_bindings: usize,
        pub down_bindings: usize,
        pub scheduled: Vec<(u32, Duration)>,
        pub cancelled: Vec<u32>,
        next_timer: u32,
    }

    impl FakeSurface {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn with_rect(mut self, region: &'static str, rect: Rect) -> Self {
            self.rects.insert(region, rect);
            self
        }

        /// Handle of the most recently scheduled timer
        pub fn last_timer(&self) -> Option<u32> {
            self.scheduled.last().map(|(timer, _)| *timer)
        }
    }

    impl Surface for FakeSurface {
        type Region = &'static str;
        type Timer = u32;

        fn region_rect(&self, region: &Self::Region) -> Rect {
            self.rects
                .get(region)
                .copied()
                .unwrap_or(Rect::new(0.0, 0.0, 0.0, 0.0))
        }

        fn bind_move(&mut self) {
            self.move_bindings += 1;
        }

        fn unbind_move(&mut self) {
            self.move_bindings = 0;
        }

        fn bind_down(&mut self) {
            self.down_bindings += 1;
        }

        fn unbind_down(&mut self) {
            self.down_bindings = 0;
        }

        fn schedule_once(&mut self, delay: Duration) -> u32 {
            self.next_timer += 1;
            self.scheduled.push((self.next_timer, delay));
            self.next_timer
        }

        fn cancel(&mut self, timer: u32) {
            self.cancelled.push(timer);
        }
    }

    /// Options used by the worked scenarios: threshold 50, delay 1s
    pub fn scenario_options() -> MonitorOptions {
        MonitorOptions {
            threshold: 50.0,
            delay: Duration::from_millis(1000),
            exit_on_click: true,
        }
    }

    /// Monitor over a fake surface with the scenario target and no trigger
    pub fn scenario_monitor(options: MonitorOptions) -> ExitMonitor<FakeSurface> {
        let surface = FakeSurface::new().with_rect("target", TARGET_RECT);
        ExitMonitor::new(surface, "target", None, options)
    }

    /// Monitor with the scenario target plus a trigger region at `rect`
    pub fn scenario_monitor_with_trigger(
        options: MonitorOptions,
        trigger: Rect,
    ) -> ExitMonitor<FakeSurface> {
        let surface = FakeSurface::new()
            .with_rect("target", TARGET_RECT)
            .with_rect("trigger", trigger);
        ExitMonitor::new(surface, "target", Some("trigger"), options)
    }
}
