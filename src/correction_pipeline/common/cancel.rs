use tokio_util::sync::CancellationToken as SharedToken;

use crate::correction_pipeline::common::error::{CorrectionError, Result};

/// Abort handle for a matrix build or an export, checked between samples/tiles.
///
/// Clones observe the same token, so the session owner can keep one handle and
/// pass another to the long-running operation. No async runtime is needed.
#[derive(Debug, Clone, Default)]
pub struct CancellationToken {
    inner: SharedToken,
}

impl CancellationToken {
    pub fn new() -> Self {
        Self::default()
    }

    /// Token cancelled together with `self`, but which can also be cancelled
    /// on its own without affecting the parent.
    pub fn child_token(&self) -> Self {
        Self {
            inner: self.inner.child_token(),
        }
    }

    pub fn cancel(&self) {
        self.inner.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.inner.is_cancelled()
    }

    /// Returns `Err(Cancelled)` once `cancel` has been called on any clone.
    pub fn check(&self) -> Result<()> {
        if self.is_cancelled() {
            return Err(CorrectionError::Cancelled);
        }
        Ok(())
    }
}
