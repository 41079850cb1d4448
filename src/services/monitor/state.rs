//! Lifecycle of a balance monitor instance.

use tokio::{sync::watch, task::JoinHandle};

use super::error::BalanceMonitorError;

/// Observable lifecycle state of a balance monitor
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum MonitorState {
	Uninitialized,
	Initialized,
	Destroyed,
}

/// Handle on the task delivering live activity to listeners
pub(crate) struct LiveDelivery {
	shutdown: watch::Sender<bool>,
	handle: JoinHandle<()>,
}

impl LiveDelivery {
	pub(crate) fn new(shutdown: watch::Sender<bool>, handle: JoinHandle<()>) -> Self {
		Self { shutdown, handle }
	}

	/// Signals the delivery task and waits for it to exit. No listener is invoked
	/// once this returns.
	pub(crate) async fn stop(self) {
		let _ = self.shutdown.send(true);
		if let Err(e) = self.handle.await {
			tracing::warn!(error = %e, "Live delivery task did not exit cleanly");
		}
	}
}

pub(crate) enum Lifecycle {
	Uninitialized,
	Initialized(LiveDelivery),
	Destroyed,
}

impl Lifecycle {
	pub(crate) fn state(&self) -> MonitorState {
		match self {
			Self::Uninitialized => MonitorState::Uninitialized,
			Self::Initialized(_) => MonitorState::Initialized,
			Self::Destroyed => MonitorState::Destroyed,
		}
	}

	/// Fails unless the monitor is initialized
	pub(crate) fn ensure_initialized(
		&self,
		operation: &'static str,
	) -> Result<(), BalanceMonitorError> {
		match self {
			Self::Initialized(_) => Ok(()),
			Self::Uninitialized => Err(BalanceMonitorError::NotInitialized { operation }),
			Self::Destroyed => Err(BalanceMonitorError::AlreadyDestroyed { operation }),
		}
	}
}
