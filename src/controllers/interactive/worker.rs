use crate::controllers::interactive::errors::render::RenderError;
use crate::controllers::interactive::events::worker_message::WorkerMessage;
use crate::controllers::interactive::ports::job_dispatcher::JobDispatcher;
use crate::controllers::interactive::ports::worker_message_port::WorkerMessagePort;
use crate::core::actions::rasterize_bands::rasterize_bands::{
    RasterizeError, RasterizeOptions, rasterize_cancelable,
};
use crate::core::colouring::palette_cache::PaletteCache;
use crate::core::data::band::Band;
use crate::core::data::raster_job::RasterJob;
use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Condvar, Mutex, PoisonError};
use std::thread::{self, JoinHandle};
use std::time::Instant;
use tracing::{debug, error, info, warn};

struct SharedState {
    latest_request_id: AtomicU64,
    latest_job: Mutex<Option<RasterJob>>,
    wake: Condvar,
    shutdown: AtomicBool,
    crashed: AtomicBool,
    port: Arc<dyn WorkerMessagePort>,
}

/// Background thread that rasterizes one job at a time.
///
/// The mailbox holds a single job: dispatching while a job is queued replaces
/// it, and a running job stops at its next band boundary once a newer job
/// arrives. Bands, failures and crashes go out through the message port.
pub struct RasterWorker {
    shared: Arc<SharedState>,
    worker: Option<JoinHandle<()>>,
}

impl RasterWorker {
    pub fn spawn(
        options: RasterizeOptions,
        port: Arc<dyn WorkerMessagePort>,
    ) -> Result<Self, RenderError> {
        let shared = Arc::new(SharedState {
            latest_request_id: AtomicU64::new(0),
            latest_job: Mutex::new(None),
            wake: Condvar::new(),
            shutdown: AtomicBool::new(false),
            crashed: AtomicBool::new(false),
            port,
        });

        let worker_shared = Arc::clone(&shared);

        let worker = thread::Builder::new()
            .name("raster-worker".to_string())
            .spawn(move || {
                Self::worker_loop(&worker_shared, options);
            })
            .map_err(|e| RenderError::WorkerUnavailable(e.to_string()))?;

        info!(
            band_height = options.band_height.get(),
            smooth_colouring = options.smooth_colouring,
            "raster worker started"
        );

        Ok(Self {
            shared,
            worker: Some(worker),
        })
    }

    #[must_use]
    pub fn is_available(&self) -> bool {
        !self.shared.shutdown.load(Ordering::Acquire) && !self.shared.crashed.load(Ordering::Acquire)
    }

    pub fn shutdown(&mut self) {
        self.shared.shutdown.store(true, Ordering::Release);
        self.shared.wake.notify_one();

        if let Some(handle) = self.worker.take() {
            let _ = handle.join();
            debug!("raster worker stopped");
        }
    }

    fn worker_loop(shared: &SharedState, options: RasterizeOptions) {
        let mut palettes = PaletteCache::default();

        loop {
            let job = {
                let mut guard = shared
                    .latest_job
                    .lock()
                    .unwrap_or_else(PoisonError::into_inner);
                loop {
                    if shared.shutdown.load(Ordering::Acquire) {
                        return;
                    }

                    if let Some(job) = guard.take() {
                        break job;
                    }

                    guard = shared
                        .wake
                        .wait(guard)
                        .unwrap_or_else(PoisonError::into_inner);
                }
            };

            let request_id = job.request_id();
            let cancel_token = || {
                shared.shutdown.load(Ordering::Relaxed)
                    || request_id != shared.latest_request_id.load(Ordering::Relaxed)
            };

            let start = Instant::now();
            let result = panic::catch_unwind(AssertUnwindSafe(|| {
                rasterize_cancelable(&job, options, &mut palettes, &cancel_token, &mut |band: Band| {
                    shared.port.post(WorkerMessage::Band(band));
                })
            }));
            let elapsed_ms = start.elapsed().as_millis() as u64;

            match result {
                Ok(Ok(summary)) => {
                    debug!(request_id, bands = summary.bands, elapsed_ms, "render job finished");
                }
                Ok(Err(RasterizeError::Cancelled(_))) => {
                    debug!(request_id, elapsed_ms, "render job superseded");
                }
                Ok(Err(RasterizeError::Band(err))) => {
                    warn!(request_id, error = %err, "render job failed");
                    shared.port.post(WorkerMessage::Failed {
                        request_id,
                        message: err.to_string(),
                    });
                }
                Err(payload) => {
                    let message = panic_message(payload.as_ref());
                    error!(request_id, %message, "raster worker crashed");
                    shared.crashed.store(true, Ordering::Release);
                    shared.port.post(WorkerMessage::Crashed {
                        request_id,
                        message,
                    });
                    return;
                }
            }
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "worker panicked".to_string()
    }
}

impl JobDispatcher for RasterWorker {
    fn dispatch(&self, job: RasterJob) -> Result<(), RenderError> {
        if self.shared.crashed.load(Ordering::Acquire) {
            return Err(RenderError::WorkerUnavailable("worker crashed".to_string()));
        }

        if self.shared.shutdown.load(Ordering::Acquire) {
            return Err(RenderError::WorkerUnavailable("worker shut down".to_string()));
        }

        self.shared
            .latest_request_id
            .store(job.request_id(), Ordering::Release);

        {
            let mut guard = self
                .shared
                .latest_job
                .lock()
                .unwrap_or_else(PoisonError::into_inner);
            *guard = Some(job);
        }

        self.shared.wake.notify_one();

        Ok(())
    }
}

impl Drop for RasterWorker {
    fn drop(&mut self) {
        self.shutdown();
    }
}
