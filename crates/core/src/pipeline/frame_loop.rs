use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::filtering::domain::control_snapshot::ControlSnapshot;
use crate::filtering::domain::filter_error::FilterError;
use crate::filtering::domain::frame_filter::FrameFilter;
use crate::shared::constants::DEFAULT_FPS;
use crate::shared::frame::Frame;
use crate::video::domain::control_state::ControlState;
use crate::video::domain::display_sink::DisplaySink;
use crate::video::domain::frame_source::{FramePoll, FrameSource};

use super::label;
use super::pipeline_logger::PipelineLogger;
use super::scheduler::Scheduler;

/// Frame loop settings.
#[derive(Clone, Debug)]
pub struct LoopConfig {
    /// Target frames per second; values below 1 are treated as 1.
    pub fps: u32,
    /// Draw `"Filter: {name}"` on every presented frame.
    pub show_label: bool,
    /// Stop after this many presented frames.
    pub max_frames: Option<usize>,
    /// Checked before every iteration; set it to stop the loop.
    pub cancelled: Arc<AtomicBool>,
}

impl Default for LoopConfig {
    fn default() -> Self {
        Self {
            fps: DEFAULT_FPS,
            show_label: true,
            max_frames: None,
            cancelled: Arc::new(AtomicBool::new(false)),
        }
    }
}

impl LoopConfig {
    /// Minimum time between the end of one iteration and the start of the next.
    pub fn frame_interval(&self) -> Duration {
        Duration::from_secs_f64(1.0 / self.fps.max(1) as f64)
    }
}

/// What one iteration did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TickOutcome {
    /// A frame was shown; `fallback` is set when the filter failed and the
    /// input was shown instead.
    Presented { fallback: bool },
    NotReady,
    /// The source delivered a frame without pixels.
    Skipped,
    Ended,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LoopStats {
    pub presented: usize,
    pub not_ready: usize,
    pub skipped: usize,
    pub fallbacks: usize,
}

/// Single-threaded capture → filter → present loop.
///
/// Each presented frame is filtered with the controls sampled once for
/// that frame. Filter failures never stop the loop: the input is shown
/// in place of the output.
pub struct FrameLoop {
    source: Box<dyn FrameSource>,
    filter: Box<dyn FrameFilter>,
    controls: Box<dyn ControlState>,
    sink: Box<dyn DisplaySink>,
    scheduler: Box<dyn Scheduler>,
    logger: Box<dyn PipelineLogger>,
    config: LoopConfig,
    stats: LoopStats,
}

impl FrameLoop {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        source: Box<dyn FrameSource>,
        filter: Box<dyn FrameFilter>,
        controls: Box<dyn ControlState>,
        sink: Box<dyn DisplaySink>,
        scheduler: Box<dyn Scheduler>,
        logger: Box<dyn PipelineLogger>,
        config: LoopConfig,
    ) -> Self {
        Self {
            source,
            filter,
            controls,
            sink,
            scheduler,
            logger,
            config,
            stats: LoopStats::default(),
        }
    }

    pub fn stats(&self) -> LoopStats {
        self.stats
    }

    /// Runs until the source ends, the frame limit is reached or the loop
    /// is cancelled.
    pub fn run(&mut self) -> LoopStats {
        let interval = self.config.frame_interval();
        log::info!(
            "Frame loop started ({} fps, {:.1}ms interval)",
            self.config.fps.max(1),
            interval.as_secs_f64() * 1000.0
        );

        while !self.config.cancelled.load(Ordering::Relaxed) {
            let delay = match self.tick() {
                TickOutcome::Ended => {
                    log::info!("Frame source ended");
                    break;
                }
                TickOutcome::NotReady => Duration::ZERO,
                TickOutcome::Skipped | TickOutcome::Presented { .. } => interval,
            };
            if self
                .config
                .max_frames
                .is_some_and(|max| self.stats.presented >= max)
            {
                break;
            }
            self.scheduler.wait(delay);
        }

        self.logger.summary();
        log::info!(
            "Frame loop stopped: {} presented, {} fallbacks, {} skipped",
            self.stats.presented,
            self.stats.fallbacks,
            self.stats.skipped
        );
        self.stats
    }

    /// One iteration: poll, filter, label, present.
    pub fn tick(&mut self) -> TickOutcome {
        let frame = match self.source.next_frame() {
            FramePoll::Ready(frame) => frame,
            FramePoll::NotReady => {
                self.stats.not_ready += 1;
                return TickOutcome::NotReady;
            }
            FramePoll::Ended => return TickOutcome::Ended,
        };
        if self.source.is_empty(&frame) {
            log::warn!("Skipping empty frame {}", frame.index());
            self.stats.skipped += 1;
            return TickOutcome::Skipped;
        }

        let index = frame.index();
        let controls = self.controls.get();

        let started = Instant::now();
        let (output, fallback) = match self.apply_filter(&frame, &controls) {
            Ok(output) => (output, false),
            Err(e) => {
                log::error!(
                    "Filter '{}' failed on frame {index}, showing input: {e}",
                    controls.filter
                );
                self.logger.fallback(controls.filter);
                (frame, true)
            }
        };
        self.logger.timing("filter", elapsed_ms(started));

        // Unrecognised control names are labeled as the filter that ran.
        let output = if self.config.show_label {
            let started = Instant::now();
            let labeled = label::draw_label(output, &format!("Filter: {}", controls.filter));
            self.logger.timing("label", elapsed_ms(started));
            labeled
        } else {
            output
        };

        let started = Instant::now();
        self.sink.present(&output);
        self.logger.timing("present", elapsed_ms(started));

        self.stats.presented += 1;
        if fallback {
            self.stats.fallbacks += 1;
        }
        self.logger.frame_presented(index, controls.filter);
        TickOutcome::Presented { fallback }
    }

    /// Runs the filter, turning panics and wrongly sized output into errors.
    fn apply_filter(
        &mut self,
        frame: &Frame,
        controls: &ControlSnapshot,
    ) -> Result<Frame, FilterError> {
        let filter = &mut self.filter;
        let output = panic::catch_unwind(AssertUnwindSafe(|| filter.apply(frame, controls)))
            .map_err(|payload| FilterError::Panicked(panic_message(payload.as_ref())))??;
        if !output.same_size(frame) {
            return Err(FilterError::DimensionMismatch {
                width: frame.width(),
                height: frame.height(),
                got_width: output.width(),
                got_height: output.height(),
            });
        }
        Ok(output)
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}

fn elapsed_ms(started: Instant) -> f64 {
    started.elapsed().as_secs_f64() * 1000.0
}
