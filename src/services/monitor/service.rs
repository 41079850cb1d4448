//! Balance monitor backed by a network client.
//!
//! [`NetworkBalanceMonitor`] implements [`BalanceMonitor`] on top of any
//! [`BalanceNetworkClient`]. Live transactions pushed by the client are turned into
//! activity for every subscribed address and fanned out to the registered listeners
//! by a single delivery task.

use async_trait::async_trait;
use futures::StreamExt;
use serde_json::Value;
use std::{
	collections::{BTreeSet, HashSet},
	ops::ControlFlow,
	sync::Arc,
};
use tokio::sync::{mpsc, watch, Mutex, RwLock};

use crate::{
	models::{
		BalanceActivity, BalanceActivityCallback, GetBalanceActivityOptions, Network,
		RetrievalCallback, RetrieveBalanceActivitiesResult,
	},
	services::{
		blockchain::BalanceNetworkClient,
		monitor::{
			derivation::ActivityDeriver,
			dispatcher::ActivityDispatcher,
			state::{Lifecycle, LiveDelivery, MonitorState},
			BalanceMonitor, BalanceMonitorError,
		},
	},
};

/// Balance monitor delegating chain I/O to a [`BalanceNetworkClient`]
pub struct NetworkBalanceMonitor<C: BalanceNetworkClient + 'static> {
	client: Arc<C>,
	deriver: Arc<ActivityDeriver>,
	lifecycle: Mutex<Lifecycle>,
	subscriptions: Arc<RwLock<BTreeSet<String>>>,
	/// Serializes subscription requests to the network
	subscribe_guard: Mutex<()>,
	dispatcher: ActivityDispatcher,
}

impl<C: BalanceNetworkClient + 'static> NetworkBalanceMonitor<C> {
	pub fn new(network: Network, client: Arc<C>) -> Self {
		Self {
			client,
			deriver: Arc::new(ActivityDeriver::new(network)),
			lifecycle: Mutex::new(Lifecycle::Uninitialized),
			subscriptions: Arc::new(RwLock::new(BTreeSet::new())),
			subscribe_guard: Mutex::new(()),
			dispatcher: ActivityDispatcher::new(),
		}
	}

	pub fn network(&self) -> &Network {
		self.deriver.network()
	}

	pub async fn state(&self) -> MonitorState {
		self.lifecycle.lock().await.state()
	}

	/// Addresses currently subscribed for live activity, in lexical order
	pub async fn subscribed_addresses(&self) -> Vec<String> {
		self.subscriptions.read().await.iter().cloned().collect()
	}

	async fn ensure_initialized(&self, operation: &'static str) -> Result<(), BalanceMonitorError> {
		self.lifecycle.lock().await.ensure_initialized(operation)
	}

	/// Best-effort teardown after a failed `init`
	async fn release_connection(&self) {
		if let Err(e) = self.client.disconnect().await {
			tracing::warn!(
				network = %self.network().slug,
				error = %e,
				"Failed to release network connection after failed init"
			);
		}
	}
}

#[async_trait]
impl<C: BalanceNetworkClient + 'static> BalanceMonitor for NetworkBalanceMonitor<C> {
	async fn init(&self) -> Result<(), BalanceMonitorError> {
		let mut lifecycle = self.lifecycle.lock().await;
		match &*lifecycle {
			Lifecycle::Uninitialized => {}
			Lifecycle::Initialized(_) => return Err(BalanceMonitorError::AlreadyInitialized),
			Lifecycle::Destroyed => {
				return Err(BalanceMonitorError::AlreadyDestroyed { operation: "init" })
			}
		}

		let network = self.network();
		let (sender, feed) = mpsc::channel(network.feed_buffer_size());

		if let Err(e) = self.client.connect(sender).await {
			self.release_connection().await;
			return Err(BalanceMonitorError::connection_error(format!(
				"Failed to connect to network {}: {}",
				network.slug, e
			)));
		}

		let (shutdown, shutdown_rx) = watch::channel(false);
		let handle = tokio::spawn(deliver_live_activities(
			feed,
			shutdown_rx,
			self.deriver.clone(),
			self.subscriptions.clone(),
			self.dispatcher.clone(),
		));
		*lifecycle = Lifecycle::Initialized(LiveDelivery::new(shutdown, handle));

		tracing::info!(network = %network.slug, "Balance monitor initialized");
		Ok(())
	}

	async fn destroy(&self) -> Result<(), BalanceMonitorError> {
		let mut lifecycle = self.lifecycle.lock().await;
		let previous = std::mem::replace(&mut *lifecycle, Lifecycle::Destroyed);

		let delivery = match previous {
			Lifecycle::Destroyed => {
				return Err(BalanceMonitorError::AlreadyDestroyed {
					operation: "destroy",
				})
			}
			Lifecycle::Uninitialized => {
				tracing::info!(network = %self.network().slug, "Balance monitor destroyed before init");
				return Ok(());
			}
			Lifecycle::Initialized(delivery) => delivery,
		};

		delivery.stop().await;
		self.dispatcher.clear().await;
		self.subscriptions.write().await.clear();

		self.client.disconnect().await.map_err(|e| {
			BalanceMonitorError::connection_error(format!(
				"Failed to disconnect from network {}: {}",
				self.network().slug,
				e
			))
		})?;

		tracing::info!(network = %self.network().slug, "Balance monitor destroyed");
		Ok(())
	}

	async fn subscribe_addresses(&self, addresses: &[String]) -> Result<(), BalanceMonitorError> {
		self.ensure_initialized("subscribe addresses").await?;
		let _guard = self.subscribe_guard.lock().await;

		let new_addresses: Vec<String> = {
			let subscribed = self.subscriptions.read().await;
			let mut requested = BTreeSet::new();
			addresses
				.iter()
				.filter(|address| !subscribed.contains(*address) && requested.insert(*address))
				.cloned()
				.collect()
		};

		if new_addresses.is_empty() {
			tracing::debug!(network = %self.network().slug, "All addresses already subscribed");
			return Ok(());
		}

		self.client
			.subscribe_addresses(&new_addresses)
			.await
			.map_err(|e| {
				BalanceMonitorError::connection_error(format!(
					"Failed to subscribe {} addresses on network {}: {}",
					new_addresses.len(),
					self.network().slug,
					e
				))
			})?;

		tracing::info!(
			network = %self.network().slug,
			count = new_addresses.len(),
			"Subscribed addresses for balance activity"
		);
		self.subscriptions.write().await.extend(new_addresses);
		Ok(())
	}

	async fn on_balance_activity(
		&self,
		callback: BalanceActivityCallback,
	) -> Result<(), BalanceMonitorError> {
		let lifecycle = self.lifecycle.lock().await;
		lifecycle.ensure_initialized("register balance activity listener")?;
		self.dispatcher.register(callback).await;
		Ok(())
	}

	async fn retrieve_balance_activities<'a>(
		&self,
		address: &str,
		callback: &mut RetrievalCallback<'a>,
		options: GetBalanceActivityOptions,
	) -> Result<RetrieveBalanceActivitiesResult, BalanceMonitorError> {
		self.ensure_initialized("retrieve balance activities").await?;

		if let (Some(from), Some(to)) = (options.from, options.to) {
			if from > to {
				return Err(BalanceMonitorError::InvalidRange { from, to });
			}
		}

		let retained = self.client.get_retained_range().await.map_err(|e| {
			BalanceMonitorError::retrieval_failure(format!(
				"Failed to get retained block range: {}",
				e
			))
		})?;

		let from = options
			.from
			.map_or(retained.earliest, |from| from.max(retained.earliest));
		let to = options
			.to
			.map_or(retained.latest, |to| to.min(retained.latest));

		if from > to {
			tracing::info!(
				address,
				requested_from = ?options.from,
				requested_to = ?options.to,
				retained_from = retained.earliest,
				retained_to = retained.latest,
				"Requested range is outside retained history"
			);
			return Ok(RetrieveBalanceActivitiesResult { from, to });
		}

		let mut transactions = self
			.client
			.get_address_transactions(address, from, to)
			.await
			.map_err(|e| {
				BalanceMonitorError::retrieval_failure(format!(
					"Failed to query transactions of {} in blocks {} to {}: {}",
					address, from, to, e
				))
			})?;

		let mut delivered = HashSet::new();
		let mut last_height: Option<u64> = None;

		while let Some(item) = transactions.next().await {
			let tx = item.map_err(|e| {
				BalanceMonitorError::retrieval_failure(format!(
					"Transaction stream of {} failed: {}",
					address, e
				))
			})?;

			let Some(activity) = self.deriver.derive(address, &tx)? else {
				continue;
			};

			let Some(height) = activity.confirmation_number else {
				tracing::debug!(
					transaction_id = %activity.transaction_id,
					"Skipping unconfirmed transaction in historical retrieval"
				);
				continue;
			};

			if let Some(previous) = last_height {
				if height < previous {
					return Err(BalanceMonitorError::retrieval_failure(format!(
						"Transactions of {} out of order: block {} after block {}",
						address, height, previous
					)));
				}
			}
			last_height = Some(height);

			if height < from || height > to {
				continue;
			}

			if !delivered.insert(activity.key()) {
				tracing::debug!(
					transaction_id = %activity.transaction_id,
					"Skipping duplicate balance activity"
				);
				continue;
			}

			match callback(activity) {
				Ok(ControlFlow::Continue(())) => {}
				Ok(ControlFlow::Break(())) => {
					tracing::debug!(address, block = height, "Retrieval stopped by callback");
					return Ok(covered_before(from, height));
				}
				Err(e) => return Err(BalanceMonitorError::callback_error(e)),
			}
		}

		tracing::debug!(
			address,
			from,
			to,
			activities = delivered.len(),
			"Balance activity retrieval complete"
		);
		Ok(RetrieveBalanceActivitiesResult { from, to })
	}

	async fn tx_to_balance_activity(
		&self,
		address: &str,
		tx: &Value,
	) -> Result<Option<BalanceActivity>, BalanceMonitorError> {
		self.ensure_initialized("convert transaction to balance activity")
			.await?;
		self.deriver.derive(address, tx)
	}
}

/// Range fully delivered when a retrieval stops inside block `height`
///
/// The stopping block may hold activities that were never delivered, so coverage
/// ends at the block before it. Stopping in the first block covers nothing.
fn covered_before(from: u64, height: u64) -> RetrieveBalanceActivitiesResult {
	match height.checked_sub(1) {
		Some(to) => RetrieveBalanceActivitiesResult { from, to },
		None => RetrieveBalanceActivitiesResult { from: 1, to: 0 },
	}
}

/// Turns live raw transactions into activity for every subscribed address until
/// shutdown is signalled or the feed closes.
async fn deliver_live_activities(
	mut feed: mpsc::Receiver<Value>,
	mut shutdown: watch::Receiver<bool>,
	deriver: Arc<ActivityDeriver>,
	subscriptions: Arc<RwLock<BTreeSet<String>>>,
	dispatcher: ActivityDispatcher,
) {
	loop {
		tokio::select! {
			biased;
			_ = shutdown.changed() => {
				tracing::debug!(network = %deriver.network().slug, "Live delivery stopped");
				break;
			}
			received = feed.recv() => {
				let Some(tx) = received else {
					tracing::error!(
						network = %deriver.network().slug,
						"Live transaction feed closed by the network, live delivery has ended"
					);
					break;
				};
				let addresses: Vec<String> = subscriptions.read().await.iter().cloned().collect();
				for address in &addresses {
					match deriver.derive(address, &tx) {
						Ok(Some(activity)) => {
							dispatcher.dispatch(&activity).await;
						}
						Ok(None) => {}
						Err(e) => tracing::warn!(
							network = %deriver.network().slug,
							address = %address,
							error = %e,
							"Dropping live transaction"
						),
					}
				}
			}
		}
	}
}
