//! Fan-out of live balance activity to registered listeners.

use std::sync::Arc;
use tokio::sync::RwLock;

use crate::models::{BalanceActivity, BalanceActivityCallback};

/// Single broadcast point for live activity
///
/// Registration only appends. Delivery works on a snapshot of the listener list, so
/// listeners registered during a delivery receive the next activity onwards.
#[derive(Clone, Default)]
pub struct ActivityDispatcher {
	listeners: Arc<RwLock<Vec<BalanceActivityCallback>>>,
}

impl ActivityDispatcher {
	pub fn new() -> Self {
		Self::default()
	}

	pub async fn register(&self, listener: BalanceActivityCallback) {
		self.listeners.write().await.push(listener);
	}

	pub async fn snapshot(&self) -> Vec<BalanceActivityCallback> {
		self.listeners.read().await.clone()
	}

	/// Invokes every listener with `activity` in registration order, returning how
	/// many returned normally
	///
	/// Each listener runs on the blocking pool. A panicking listener is logged and
	/// skipped; the remaining listeners and later activities are still delivered.
	pub async fn dispatch(&self, activity: &BalanceActivity) -> usize {
		let listeners = self.snapshot().await;
		let activity = Arc::new(activity.clone());
		let mut delivered = 0;

		for (index, listener) in listeners.into_iter().enumerate() {
			let activity_ref = activity.clone();
			match tokio::task::spawn_blocking(move || listener(&activity_ref)).await {
				Ok(()) => delivered += 1,
				Err(e) => tracing::error!(
					listener = index,
					transaction_id = %activity.transaction_id,
					address = %activity.address,
					error = %e,
					"Balance activity listener panicked"
				),
			}
		}
		delivered
	}

	pub async fn clear(&self) {
		self.listeners.write().await.clear();
	}

	pub async fn len(&self) -> usize {
		self.listeners.read().await.len()
	}

	pub async fn is_empty(&self) -> bool {
		self.listeners.read().await.is_empty()
	}
}
