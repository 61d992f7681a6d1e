// Path: crates/telemetry/src/time.rs
use crate::sinks::MonitorMetricsSink;
use std::time::Instant;

/// Observes the lifetime of a check invocation into the duration histogram.
pub struct CheckTimer<'a> {
    sink: &'a dyn MonitorMetricsSink,
    check: &'static str,
    start: Instant,
}

impl<'a> CheckTimer<'a> {
    pub fn new(sink: &'a dyn MonitorMetricsSink, check: &'static str) -> Self {
        Self {
            sink,
            check,
            start: Instant::now(),
        }
    }
}

impl Drop for CheckTimer<'_> {
    fn drop(&mut self) {
        self.sink
            .observe_check_duration(self.check, self.start.elapsed().as_secs_f64());
    }
}
