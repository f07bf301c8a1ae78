//! Cooperative cancellation for analysis passes.
//!
//! The hosting engine may abandon an in-flight pass at any time (it re-runs
//! analysis per edit). Each core engine checks the token at well-defined
//! points: once per content node and text token, once per sliding-window
//! step, once per enum member scanned.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::core::errors::Error;

/// Cheap-to-clone cancellation flag shared between the host and a pass.
///
/// The default token can never be cancelled.
#[derive(Clone, Debug, Default)]
pub struct CancellationToken {
    flag: Option<Arc<AtomicBool>>,
}

impl CancellationToken {
    /// A token that never cancels.
    pub fn none() -> Self {
        Self::default()
    }

    /// A fresh cancellable token.
    pub fn new() -> Self {
        Self {
            flag: Some(Arc::new(AtomicBool::new(false))),
        }
    }

    /// Signals every clone of this token.
    pub fn cancel(&self) {
        if let Some(flag) = &self.flag {
            flag.store(true, Ordering::Release);
        }
    }

    pub fn is_cancelled(&self) -> bool {
        self.flag
            .as_ref()
            .is_some_and(|flag| flag.load(Ordering::Acquire))
    }

    /// Aborts the current pass when cancellation has been requested.
    pub fn ensure(&self) -> Result<(), Error> {
        if self.is_cancelled() {
            Err(Error::Cancelled)
        } else {
            Ok(())
        }
    }
}
