use crate::controllers::interactive::data::render_options::RenderOptions;
use std::time::{Duration, Instant};

pub const DEFAULT_SETTLE_DELAY: Duration = Duration::from_millis(140);

/// Collapses bursts of render requests into at most one submit per frame and
/// tracks the settle deadline that promotes a preview to a final render.
///
/// Callers request renders as often as they like; at each scheduling point
/// (one per displayed frame) they take the frame and submit once with the
/// latest options.
#[derive(Debug)]
pub struct RenderCoalescer {
    pending: Option<RenderOptions>,
    settle_delay: Duration,
    settle_deadline: Option<Instant>,
}

impl RenderCoalescer {
    #[must_use]
    pub fn new(settle_delay: Duration) -> Self {
        Self {
            pending: None,
            settle_delay,
            settle_deadline: None,
        }
    }

    /// Records a request for the next frame. Returns `true` if this call
    /// scheduled the frame, `false` if it folded into one already pending.
    pub fn request_render(&mut self, options: RenderOptions) -> bool {
        let scheduled = self.pending.is_none();
        self.pending = Some(options);
        scheduled
    }

    #[must_use]
    pub fn has_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Consumes the pending request at a scheduling point.
    pub fn take_frame(&mut self) -> Option<RenderOptions> {
        self.pending.take()
    }

    /// Arms the settle timer, replacing any earlier deadline.
    pub fn schedule_full_res_render(&mut self, now: Instant) {
        self.settle_deadline = Some(now + self.settle_delay);
    }

    pub fn cancel_full_res_render(&mut self) {
        self.settle_deadline = None;
    }

    /// Fires the settle timer if its deadline has passed. Fires at most once
    /// per arming.
    pub fn take_settled(&mut self, now: Instant) -> bool {
        match self.settle_deadline {
            Some(deadline) if now >= deadline => {
                self.settle_deadline = None;
                true
            }
            _ => false,
        }
    }

    #[must_use]
    pub fn settle_deadline(&self) -> Option<Instant> {
        self.settle_deadline
    }

    #[must_use]
    pub fn settle_delay(&self) -> Duration {
        self.settle_delay
    }
}

impl Default for RenderCoalescer {
    fn default() -> Self {
        Self::new(DEFAULT_SETTLE_DELAY)
    }
}
