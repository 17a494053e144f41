//! Animation runner: drives a progress callback over frames until it reaches 1.
//!
//! Every `run` owns its own [`AnimationJob`]; the job moves from one frame
//! callback into the next and is dropped after delivering `1.0`.

use std::rc::Rc;

use log::debug;

use crate::scheduler::FrameScheduler;

/// One in-flight animation timeline.
pub struct AnimationJob {
    start: Option<f64>,
    duration_ms: u32,
    last_progress: f64,
    on_progress: Box<dyn FnMut(f64)>,
}

impl AnimationJob {
    pub fn new(duration_ms: u32, on_progress: Box<dyn FnMut(f64)>) -> Self {
        Self {
            start: None,
            duration_ms,
            last_progress: 0.0,
            on_progress,
        }
    }

    /// Feed one frame timestamp. The first call captures the start time.
    /// Returns the progress delivered to the callback.
    pub fn advance(&mut self, now: f64) -> f64 {
        let start = *self.start.get_or_insert(now);
        let raw = if self.duration_ms == 0 {
            1.0
        } else {
            (now - start) / f64::from(self.duration_ms)
        };
        // `max` keeps progress monotonic and swallows a NaN `raw`.
        let progress = raw.clamp(0.0, 1.0).max(self.last_progress);
        self.last_progress = progress;
        (self.on_progress)(progress);
        progress
    }

    pub fn is_finished(&self) -> bool {
        self.last_progress >= 1.0
    }
}

impl std::fmt::Debug for AnimationJob {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AnimationJob")
            .field("start", &self.start)
            .field("duration_ms", &self.duration_ms)
            .field("last_progress", &self.last_progress)
            .finish_non_exhaustive()
    }
}

/// Time-progress driver on top of a [`FrameScheduler`].
#[derive(Clone)]
pub struct AnimationRunner {
    frames: Option<Rc<dyn FrameScheduler>>,
}

impl AnimationRunner {
    pub fn new(frames: Rc<dyn FrameScheduler>) -> Self {
        Self {
            frames: Some(frames),
        }
    }

    /// Runner for platforms without frame scheduling: `run` delivers `1.0`
    /// synchronously.
    pub fn instant() -> Self {
        Self { frames: None }
    }

    pub fn from_option(frames: Option<Rc<dyn FrameScheduler>>) -> Self {
        Self { frames }
    }

    pub fn is_instant(&self) -> bool {
        self.frames.is_none()
    }

    /// Drive `on_progress` with values in `[0, 1]`, non-decreasing, ending
    /// with exactly `1.0`.
    pub fn run<F>(&self, duration_ms: u32, mut on_progress: F)
    where
        F: FnMut(f64) + 'static,
    {
        match &self.frames {
            Some(frames) => {
                debug!("animation run: {duration_ms}ms");
                let job = AnimationJob::new(duration_ms, Box::new(on_progress));
                schedule(Rc::clone(frames), job);
            }
            None => on_progress(1.0),
        }
    }
}

fn schedule(frames: Rc<dyn FrameScheduler>, mut job: AnimationJob) {
    let next = Rc::clone(&frames);
    frames.request_frame(Box::new(move |now| {
        job.advance(now);
        if !job.is_finished() {
            schedule(next, job);
        }
    }));
}

impl std::fmt::Debug for AnimationRunner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AnimationRunner")
            .field("instant", &self.is_instant())
            .finish()
    }
}
