use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("render superseded before completion")]
pub struct Cancelled;

/// Polled between bands; a `true` answer abandons the rest of the job.
pub trait CancelToken: Send + Sync {
    fn is_cancelled(&self) -> bool;

    /// `Err(Cancelled)` once the token has fired, for use with `?`.
    fn checkpoint(&self) -> Result<(), Cancelled> {
        if self.is_cancelled() {
            Err(Cancelled)
        } else {
            Ok(())
        }
    }
}

/// Token for one-shot renders (CLI, export) that nothing can supersede.
#[derive(Debug, Clone, Copy, Default)]
pub struct NeverCancel;

impl CancelToken for NeverCancel {
    #[inline]
    fn is_cancelled(&self) -> bool {
        false
    }
}

/// The worker passes `|| latest != request_id`.
impl<F> CancelToken for F
where
    F: Fn() -> bool + Send + Sync,
{
    #[inline]
    fn is_cancelled(&self) -> bool {
        self()
    }
}
