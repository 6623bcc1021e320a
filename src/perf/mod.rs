/// Performance measurement utilities
/// Stages are timed with a scope guard and reported through `log`
use std::ops::AddAssign;
use std::time::{Duration, Instant};

pub struct PerfTimer {
    name: &'static str,
    start: Instant,
}

impl PerfTimer {
    #[inline]
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            start: Instant::now(),
        }
    }

    #[inline]
    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }
}

impl Drop for PerfTimer {
    fn drop(&mut self) {
        log::debug!("[perf] {}: {}us", self.name, self.elapsed().as_micros());
    }
}

/// Triangle and pixel counts for one render call.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct FrameStats {
    pub submitted: usize,
    pub culled_backface: usize,
    /// Discarded whole because a vertex fell behind the near threshold
    pub clipped_near: usize,
    /// Screen-space area below epsilon
    pub degenerate: usize,
    pub rasterized: usize,
    pub pixels_written: u64,
}

impl AddAssign for FrameStats {
    fn add_assign(&mut self, rhs: Self) {
        self.submitted += rhs.submitted;
        self.culled_backface += rhs.culled_backface;
        self.clipped_near += rhs.clipped_near;
        self.degenerate += rhs.degenerate;
        self.rasterized += rhs.rasterized;
        self.pixels_written += rhs.pixels_written;
    }
}

/// Rolling frame-time accumulator for the interactive loop.
pub struct FrameTimings {
    window: Duration,
    started: Instant,
    frames: u32,
    tick: Duration,
    render: Duration,
    present: Duration,
    last_stats: FrameStats,
}

impl FrameTimings {
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            started: Instant::now(),
            frames: 0,
            tick: Duration::ZERO,
            render: Duration::ZERO,
            present: Duration::ZERO,
            last_stats: FrameStats::default(),
        }
    }

    pub fn record(&mut self, tick: Duration, render: Duration, present: Duration, stats: FrameStats) {
        self.frames += 1;
        self.tick += tick;
        self.render += render;
        self.present += present;
        self.last_stats = stats;

        if self.started.elapsed() >= self.window {
            self.log_summary();
            *self = Self::new(self.window);
        }
    }

    fn log_summary(&self) {
        let frames = self.frames.max(1);
        let secs = self.started.elapsed().as_secs_f64();
        let s = &self.last_stats;
        log::info!(
            "{:.1} fps | tick {:.2}ms render {:.2}ms present {:.2}ms | tris {}/{} (culled {}, near {}, degenerate {})",
            self.frames as f64 / secs,
            (self.tick / frames).as_secs_f64() * 1e3,
            (self.render / frames).as_secs_f64() * 1e3,
            (self.present / frames).as_secs_f64() * 1e3,
            s.rasterized,
            s.submitted,
            s.culled_backface,
            s.clipped_near,
            s.degenerate,
        );
    }
}

/// Time the rest of the enclosing scope.
#[macro_export]
macro_rules! perf_scope {
    ($name:expr) => {
        let _timer = $crate::perf::PerfTimer::new($name);
    };
}
