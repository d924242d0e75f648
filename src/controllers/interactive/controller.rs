use crate::controllers::interactive::data::display_surface::DisplaySurface;
use crate::controllers::interactive::errors::render::RenderError;
use crate::controllers::interactive::events::worker_message::WorkerMessage;
use crate::controllers::interactive::ports::job_dispatcher::JobDispatcher;
use crate::controllers::interactive::ports::render_listener::RenderListener;
use crate::controllers::interactive::ports::surface_writer::SurfaceWriter;
use crate::core::data::band::Band;
use crate::core::data::fractal_params::FractalParams;
use crate::core::data::raster_job::RasterJob;
use crate::core::data::viewport::Viewport;
use std::collections::HashSet;
use tracing::{debug, trace, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControllerState {
    Idle,
    JobInFlight {
        request_id: u64,
        rows_received: u32,
        height: u32,
    },
}

/// What happened to one incoming band.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BandOutcome {
    /// Not for the current job; nothing was written.
    Stale,
    Composited { rows_received: u32 },
    /// The band finished the current job.
    Completed { request_id: u64 },
}

#[derive(Debug)]
struct InFlightJob {
    request_id: u64,
    width: u32,
    height: u32,
    rows_received: u32,
    bands_seen: HashSet<u32>,
}

/// Owns the display surface and the current request id.
///
/// Every submit takes a fresh, strictly increasing request id, so bands from
/// any earlier job are recognised as stale and dropped before compositing. A
/// job is complete once its bands have covered every row.
pub struct RenderJobController<D: JobDispatcher, S: SurfaceWriter = DisplaySurface> {
    dispatcher: D,
    surface: S,
    listener: Option<Box<dyn RenderListener>>,
    last_request_id: u64,
    last_completed: u64,
    current: Option<InFlightJob>,
}

impl<D: JobDispatcher> RenderJobController<D> {
    #[must_use]
    pub fn new(dispatcher: D) -> Self {
        Self::with_surface(dispatcher, DisplaySurface::default())
    }
}

impl<D: JobDispatcher, S: SurfaceWriter> RenderJobController<D, S> {
    #[must_use]
    pub fn with_surface(dispatcher: D, surface: S) -> Self {
        Self {
            dispatcher,
            surface,
            listener: None,
            last_request_id: 0,
            last_completed: 0,
            current: None,
        }
    }

    pub fn set_listener(&mut self, listener: Box<dyn RenderListener>) {
        self.listener = Some(listener);
    }

    /// Validates and dispatches a new job, superseding whatever is in flight.
    /// An invalid job is rejected without consuming a request id.
    pub fn submit(
        &mut self,
        viewport: Viewport,
        params: FractalParams,
        width: u32,
        height: u32,
        preview: bool,
    ) -> Result<u64, RenderError> {
        let request_id = self.last_request_id + 1;
        let job = RasterJob::new(request_id, width, height, viewport, params, preview)?;

        self.last_request_id = request_id;

        if let Some(previous) = self.current.take() {
            trace!(
                superseded = previous.request_id,
                rows_received = previous.rows_received,
                "superseding render job"
            );
        }

        if let Err(err) = self.dispatcher.dispatch(job) {
            warn!(request_id, error = %err, "render job dispatch failed");
            self.notify_error(&err);
            return Err(err);
        }

        debug!(request_id, width, height, preview, kind = %params.kind, "render job dispatched");

        self.current = Some(InFlightJob {
            request_id,
            width,
            height,
            rows_received: 0,
            bands_seen: HashSet::new(),
        });

        Ok(request_id)
    }

    pub fn on_band(&mut self, band: &Band) -> BandOutcome {
        let Some(job) = self.current.as_mut() else {
            trace!(request_id = band.request_id(), "band arrived with no job in flight");
            return BandOutcome::Stale;
        };

        if band.request_id() != job.request_id {
            trace!(
                request_id = band.request_id(),
                current = job.request_id,
                "discarding stale band"
            );
            return BandOutcome::Stale;
        }

        if band.width() != job.width || band.y_end() > job.height {
            warn!(
                request_id = job.request_id,
                band_width = band.width(),
                y_start = band.y_start(),
                rows = band.height(),
                "discarding band that does not fit the job"
            );
            return BandOutcome::Stale;
        }

        if self.surface.size() != (job.width, job.height) {
            self.surface.resize(job.width, job.height);
        }

        self.surface.write_rows(band.y_start(), band.pixels());

        if job.bands_seen.insert(band.y_start()) {
            job.rows_received += band.height();
        }

        if job.rows_received < job.height {
            return BandOutcome::Composited {
                rows_received: job.rows_received,
            };
        }

        let request_id = job.request_id;
        self.current = None;
        self.last_completed = request_id;
        debug!(request_id, "render job completed");

        if let Some(listener) = self.listener.as_mut() {
            listener.on_complete(request_id);
        }

        BandOutcome::Completed { request_id }
    }

    /// Routes one worker message. Returns the band outcome for band messages.
    pub fn on_worker_message(&mut self, message: WorkerMessage) -> Option<BandOutcome> {
        match message {
            WorkerMessage::Band(band) => Some(self.on_band(&band)),
            WorkerMessage::Failed {
                request_id,
                message,
            } => {
                if self.current_request_id() == Some(request_id) {
                    self.current = None;
                    self.notify_error(&RenderError::JobFailed {
                        request_id,
                        message,
                    });
                }
                None
            }
            WorkerMessage::Crashed {
                request_id,
                message,
            } => {
                warn!(request_id, %message, "render worker lost");
                self.current = None;
                self.notify_error(&RenderError::WorkerUnavailable(message));
                None
            }
        }
    }

    fn notify_error(&mut self, error: &RenderError) {
        if let Some(listener) = self.listener.as_mut() {
            listener.on_error(error);
        }
    }

    #[must_use]
    pub fn state(&self) -> ControllerState {
        match &self.current {
            None => ControllerState::Idle,
            Some(job) => ControllerState::JobInFlight {
                request_id: job.request_id,
                rows_received: job.rows_received,
                height: job.height,
            },
        }
    }

    #[must_use]
    pub fn current_request_id(&self) -> Option<u64> {
        self.current.as_ref().map(|job| job.request_id)
    }

    /// Id of the most recently issued request, whether or not it finished.
    #[must_use]
    pub fn last_request_id(&self) -> u64 {
        self.last_request_id
    }

    #[must_use]
    pub fn last_completed(&self) -> u64 {
        self.last_completed
    }

    #[must_use]
    pub fn surface(&self) -> &S {
        &self.surface
    }

    #[must_use]
    pub fn dispatcher(&self) -> &D {
        &self.dispatcher
    }
}
