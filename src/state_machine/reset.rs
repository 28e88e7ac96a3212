use std::time::Duration;
use tokio::runtime::Handle;
use tokio::task::JoinHandle;

/// A draft reset scheduled to run after the wizard closes
///
/// Each reset carries the generation it was scheduled for. The wizard bumps
/// its generation on every open and close, so a reset that fires late only
/// applies when nothing has happened since it was scheduled.
#[derive(Debug)]
pub struct PendingReset {
    generation: u64,
    handle: JoinHandle<()>,
}

impl PendingReset {
    /// Spawn `apply` after `delay` on the current tokio runtime
    ///
    /// Returns `None` when called outside a runtime; the caller is expected to
    /// reset inline instead.
    pub fn schedule<F>(delay: Duration, generation: u64, apply: F) -> Option<Self>
    where
        F: FnOnce(u64) + Send + 'static,
    {
        let runtime = Handle::try_current().ok()?;
        let handle = runtime.spawn(async move {
            tokio::time::sleep(delay).await;
            apply(generation);
        });
        Some(Self { generation, handle })
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    /// Abort the reset if it has not fired yet
    pub fn cancel(self) {
        self.handle.abort();
    }
}
