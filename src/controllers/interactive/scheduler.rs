use crate::controllers::interactive::data::frame_data::FrameData;
use crate::controllers::interactive::data::render_request::RenderRequest;
use crate::controllers::interactive::errors::render_error::RenderError;
use crate::controllers::interactive::errors::scheduler_error::SchedulerError;
use crate::controllers::interactive::events::render_event::RenderEvent;
use crate::controllers::interactive::ports::frame_sink::FrameSink;
use crate::core::actions::render_frame::ports::colour_map::ColourMap;
use crate::core::actions::render_frame::render_preview::render_preview;
use crate::core::actions::render_frame::render_slices::render_full_parallel;
use crate::core::data::framebuffer::Framebuffer;
use crate::core::data::viewport::Viewport;
use crate::core::fractals::mandelbrot::algorithm::MandelbrotAlgorithm;
use crate::core::fractals::mandelbrot::errors::{ColourMapError, MandelbrotError};
use crate::core::fractals::mandelbrot::iteration_budget::IterationBudget;
use crate::core::fractals::mandelbrot::mandelbrot_config::MandelbrotConfig;
use crate::core::util::calculate_slice_count::{available_workers, calculate_slice_count};
use log::{debug, error, trace};
use rayon::{ThreadPool, ThreadPoolBuilder};
use std::any::Any;
use std::fmt;
use std::num::NonZeroU32;
use std::panic::{self, AssertUnwindSafe};
use std::sync::atomic::{AtomicU8, AtomicU64, Ordering};
use std::sync::{Arc, Condvar, Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};

const IDLE: u8 = 0;
const RENDERING: u8 = 1;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum SchedulerState {
    Idle,
    Rendering,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum RenderSubmission {
    Accepted { generation: u64 },
    /// Another render was in flight. The request was discarded, not queued.
    Dropped,
}

enum RenderFailure {
    Algorithm(MandelbrotError),
    ColourMap(ColourMapError),
    WorkerPanicked(String),
}

impl fmt::Display for RenderFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Algorithm(err) => write!(f, "algorithm error: {}", err),
            Self::ColourMap(err) => write!(f, "colour map error: {}", err),
            Self::WorkerPanicked(message) => write!(f, "render worker panicked: {}", message),
        }
    }
}

impl From<MandelbrotError> for RenderFailure {
    fn from(err: MandelbrotError) -> Self {
        Self::Algorithm(err)
    }
}

impl From<ColourMapError> for RenderFailure {
    fn from(err: ColourMapError) -> Self {
        Self::ColourMap(err)
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic payload".to_string()
    }
}

struct SharedState {
    state: AtomicU8,
    generation: AtomicU64,
    last_completed_generation: AtomicU64,
    idle_lock: Mutex<()>,
    idle: Condvar,
    pool: ThreadPool,
    workers: NonZeroU32,
    frame_sink: Arc<dyn FrameSink>,
    colour_map: Arc<dyn ColourMap>,
    iteration_budget: IterationBudget,
    progressive_stride: u32,
}

/// Returns the scheduler to `Idle` however the render ends, panics included.
struct ReleaseOnDrop<'a>(&'a SharedState);

impl Drop for ReleaseOnDrop<'_> {
    fn drop(&mut self) {
        self.0.release();
    }
}

impl SharedState {
    fn lock_idle(&self) -> MutexGuard<'_, ()> {
        self.idle_lock.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn release(&self) {
        self.state.store(IDLE, Ordering::Release);

        // Taking the lock orders this notify after any waiter's state check.
        let _guard = self.lock_idle();
        self.idle.notify_all();
    }

    fn run(&self, generation: u64, viewport: Viewport, request: RenderRequest) {
        let started = Instant::now();

        let outcome = panic::catch_unwind(AssertUnwindSafe(|| {
            self.render_passes(generation, viewport, request, started)
        }));

        let failure = match outcome {
            Ok(Ok(())) => return,
            Ok(Err(failure)) => failure,
            Err(payload) => RenderFailure::WorkerPanicked(panic_message(payload.as_ref())),
        };

        error!("render {} failed: {}", generation, failure);

        self.last_completed_generation
            .store(generation, Ordering::Release);

        let event = RenderEvent::Error(RenderError {
            generation,
            message: failure.to_string(),
        });

        // A panic escaping a pool job aborts the process.
        if let Err(payload) =
            panic::catch_unwind(AssertUnwindSafe(|| self.frame_sink.present(event)))
        {
            error!(
                "frame sink panicked reporting render {} failure: {}",
                generation,
                panic_message(payload.as_ref())
            );
        }
    }

    fn render_passes(
        &self,
        generation: u64,
        viewport: Viewport,
        request: RenderRequest,
        started: Instant,
    ) -> Result<(), RenderFailure> {
        let max_iterations = self.iteration_budget.max_iterations(&viewport);
        let algorithm = MandelbrotAlgorithm::new(viewport, max_iterations)?;
        let colour_map = self.colour_map.as_ref();

        // A fresh buffer per render: passes never share pixels across renders.
        let mut framebuffer = Framebuffer::new(viewport.pixel_width(), viewport.pixel_height());

        if request.progressive {
            render_preview(&mut framebuffer, &algorithm, colour_map, self.progressive_stride)?;

            let render_duration = started.elapsed();
            debug!("render {} preview pass took {:?}", generation, render_duration);

            self.frame_sink.present(RenderEvent::Preview(FrameData {
                generation,
                framebuffer: framebuffer.clone(),
                viewport,
                max_iterations,
                render_duration,
            }));
        }

        let slice_count = calculate_slice_count(self.workers, viewport.pixel_height());

        self.pool.install(|| {
            render_full_parallel(&mut framebuffer, &algorithm, colour_map, slice_count)
        })?;

        let render_duration = started.elapsed();
        debug!(
            "render {} full pass took {:?} ({} slices, {} max iterations)",
            generation, render_duration, slice_count, max_iterations
        );

        self.last_completed_generation
            .store(generation, Ordering::Release);

        self.frame_sink.present(RenderEvent::Frame(FrameData {
            generation,
            framebuffer,
            viewport,
            max_iterations,
            render_duration,
        }));

        Ok(())
    }
}

/// Single-flight render orchestration over a session-long worker pool.
///
/// [`RenderScheduler::render`] returns immediately; the passes run on the pool
/// and report through the [`FrameSink`]. While a render is in flight further
/// requests are dropped.
pub struct RenderScheduler {
    shared: Arc<SharedState>,
}

impl RenderScheduler {
    /// One worker per available hardware thread.
    pub fn new(
        frame_sink: Arc<dyn FrameSink>,
        colour_map: Arc<dyn ColourMap>,
        config: &MandelbrotConfig,
    ) -> Result<Self, SchedulerError> {
        Self::with_workers(frame_sink, colour_map, config, available_workers())
    }

    pub fn with_workers(
        frame_sink: Arc<dyn FrameSink>,
        colour_map: Arc<dyn ColourMap>,
        config: &MandelbrotConfig,
        workers: NonZeroU32,
    ) -> Result<Self, SchedulerError> {
        let pool = ThreadPoolBuilder::new()
            .num_threads(workers.get() as usize)
            .thread_name(|index| format!("render-worker-{}", index))
            .build()?;

        debug!("render pool started with {} workers", workers);

        Ok(Self {
            shared: Arc::new(SharedState {
                state: AtomicU8::new(IDLE),
                generation: AtomicU64::new(0),
                last_completed_generation: AtomicU64::new(0),
                idle_lock: Mutex::new(()),
                idle: Condvar::new(),
                pool,
                workers,
                frame_sink,
                colour_map,
                iteration_budget: config.iteration_budget,
                progressive_stride: config.progressive_stride,
            }),
        })
    }

    pub fn render(&self, viewport: Viewport, request: RenderRequest) -> RenderSubmission {
        if self
            .shared
            .state
            .compare_exchange(IDLE, RENDERING, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            trace!("render request {:?} dropped: another render is in flight", request);
            return RenderSubmission::Dropped;
        }

        let generation = self.shared.generation.fetch_add(1, Ordering::SeqCst) + 1;
        let shared = Arc::clone(&self.shared);

        self.shared.pool.spawn(move || {
            let _release = ReleaseOnDrop(&shared);
            shared.run(generation, viewport, request);
        });

        RenderSubmission::Accepted { generation }
    }

    #[must_use]
    pub fn state(&self) -> SchedulerState {
        match self.shared.state.load(Ordering::Acquire) {
            IDLE => SchedulerState::Idle,
            _ => SchedulerState::Rendering,
        }
    }

    #[must_use]
    pub fn is_rendering(&self) -> bool {
        self.state() == SchedulerState::Rendering
    }

    #[must_use]
    pub fn workers(&self) -> NonZeroU32 {
        self.shared.workers
    }

    #[must_use]
    pub fn last_completed_generation(&self) -> u64 {
        self.shared
            .last_completed_generation
            .load(Ordering::Acquire)
    }

    /// Blocks until no render is in flight or `timeout` elapses.
    ///
    /// Returns `false` on timeout.
    pub fn wait_until_idle(&self, timeout: Duration) -> bool {
        let deadline = Instant::now() + timeout;
        let mut guard = self.shared.lock_idle();

        while self.shared.state.load(Ordering::Acquire) == RENDERING {
            let now = Instant::now();
            if now >= deadline {
                return false;
            }

            guard = match self.shared.idle.wait_timeout(guard, deadline - now) {
                Ok((guard, _)) => guard,
                Err(poisoned) => poisoned.into_inner().0,
            };
        }

        true
    }
}
