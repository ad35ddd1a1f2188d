use std::collections::HashMap;
use std::time::Instant;

use crate::filtering::domain::filter_kind::FilterKind;

/// Observer for frame loop events: presented frames, filter fallbacks and
/// per-stage timings.
pub trait PipelineLogger: Send {
    /// A frame reached the display sink.
    fn frame_presented(&mut self, index: usize, filter: FilterKind);

    /// The selected filter failed and the input was presented instead.
    fn fallback(&mut self, filter: FilterKind);

    /// How long a named loop stage took for one frame.
    fn timing(&mut self, stage: &str, duration_ms: f64);

    /// Emit an end-of-run summary. Default: no-op.
    fn summary(&self) {}
}

/// Discards all events. Used by tests.
pub struct NullPipelineLogger;

impl PipelineLogger for NullPipelineLogger {
    fn frame_presented(&mut self, _index: usize, _filter: FilterKind) {}
    fn fallback(&mut self, _filter: FilterKind) {}
    fn timing(&mut self, _stage: &str, _duration_ms: f64) {}
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct StageStats {
    pub count: usize,
    pub total_ms: f64,
    pub max_ms: f64,
}

impl StageStats {
    fn record(&mut self, ms: f64) {
        self.count += 1;
        self.total_ms += ms;
        self.max_ms = self.max_ms.max(ms);
    }

    pub fn avg_ms(&self) -> f64 {
        if self.count == 0 {
            0.0
        } else {
            self.total_ms / self.count as f64
        }
    }
}

/// Logs a throughput line every `report_every` presented frames and a
/// summary of stage timings, filter usage and fallbacks at the end.
///
/// Keeps running totals only, so memory stays flat on endless runs.
pub struct StdoutPipelineLogger {
    report_every: usize,
    started: Instant,
    window_started: Instant,
    window_frames: usize,
    presented: usize,
    per_filter: HashMap<FilterKind, usize>,
    fallbacks: HashMap<FilterKind, usize>,
    stages: HashMap<String, StageStats>,
}

impl StdoutPipelineLogger {
    pub fn new(report_every: usize) -> Self {
        let now = Instant::now();
        Self {
            report_every: report_every.max(1),
            started: now,
            window_started: now,
            window_frames: 0,
            presented: 0,
            per_filter: HashMap::new(),
            fallbacks: HashMap::new(),
            stages: HashMap::new(),
        }
    }

    pub fn presented(&self) -> usize {
        self.presented
    }

    pub fn fallbacks_for(&self, filter: FilterKind) -> usize {
        self.fallbacks.get(&filter).copied().unwrap_or(0)
    }

    pub fn stage(&self, stage: &str) -> Option<StageStats> {
        self.stages.get(stage).copied()
    }

    /// Formatted summary, or `None` before the first presented frame.
    pub fn summary_string(&self) -> Option<String> {
        if self.presented == 0 {
            return None;
        }
        let elapsed = self.started.elapsed().as_secs_f64();
        let mut lines = vec![format!(
            "Frame loop summary ({} frames, {elapsed:.1}s):",
            self.presented
        )];

        let mut stages: Vec<_> = self.stages.iter().collect();
        stages.sort_by(|a, b| a.0.cmp(b.0));
        for (name, stats) in stages {
            lines.push(format!(
                "  {name:8}: avg {:6.1}ms  max {:6.1}ms",
                stats.avg_ms(),
                stats.max_ms
            ));
        }

        for &kind in FilterKind::ALL {
            let used = self.per_filter.get(&kind).copied().unwrap_or(0);
            if used == 0 {
                continue;
            }
            let failed = self.fallbacks_for(kind);
            if failed > 0 {
                lines.push(format!("  {kind}: {used} frames, {failed} passed through"));
            } else {
                lines.push(format!("  {kind}: {used} frames"));
            }
        }

        if elapsed > 0.0 {
            lines.push(format!(
                "  Throughput: {:.1} fps",
                self.presented as f64 / elapsed
            ));
        }
        Some(lines.join("\n"))
    }
}

impl Default for StdoutPipelineLogger {
    fn default() -> Self {
        Self::new(100)
    }
}

impl PipelineLogger for StdoutPipelineLogger {
    fn frame_presented(&mut self, index: usize, filter: FilterKind) {
        self.presented += 1;
        *self.per_filter.entry(filter).or_default() += 1;
        self.window_frames += 1;
        if self.window_frames >= self.report_every {
            let secs = self.window_started.elapsed().as_secs_f64();
            if secs > 0.0 {
                let fps = self.window_frames as f64 / secs;
                log::info!("Frame {index}: {fps:.1} fps ({filter})");
            }
            self.window_frames = 0;
            self.window_started = Instant::now();
        }
    }

    fn fallback(&mut self, filter: FilterKind) {
        *self.fallbacks.entry(filter).or_default() += 1;
    }

    fn timing(&mut self, stage: &str, duration_ms: f64) {
        self.stages
            .entry(stage.to_string())
            .or_default()
            .record(duration_ms);
    }

    fn summary(&self) {
        if let Some(text) = self.summary_string() {
            log::info!("\n\n{text}");
        }
    }
}
