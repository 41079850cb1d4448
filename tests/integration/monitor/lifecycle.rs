//! Integration tests for the balance monitor lifecycle.
//!
//! Tests state transitions between uninitialized, initialized and destroyed monitors
//! and the way subscriptions are forwarded to the network client.

use std::sync::Arc;

use balance_monitor::{
	models::GetBalanceActivityOptions,
	services::{
		blockchain::BlockChainError,
		monitor::{BalanceMonitor, BalanceMonitorError, MonitorState, NetworkBalanceMonitor},
	},
	utils::tests::builders::transaction::RawTransactionBuilder,
};
use tracing_test::traced_test;

use crate::integration::mocks::{
	collector, expect_connect, expect_disconnect, initialized_monitor, noop_listener,
	test_network, MockNetworkClient,
};

fn addresses(values: &[&str]) -> Vec<String> {
	values.iter().map(|value| value.to_string()).collect()
}

#[tokio::test]
async fn test_operations_before_init_fail_with_not_initialized() {
	let client = MockNetworkClient::new();
	let monitor = NetworkBalanceMonitor::new(test_network(), Arc::new(client));

	assert_eq!(monitor.state().await, MonitorState::Uninitialized);

	let result = monitor.subscribe_addresses(&addresses(&["a"])).await;
	assert!(matches!(
		result,
		Err(BalanceMonitorError::NotInitialized { .. })
	));

	let result = monitor.on_balance_activity(noop_listener()).await;
	assert!(matches!(
		result,
		Err(BalanceMonitorError::NotInitialized { .. })
	));

	let mut collected = Vec::new();
	let mut callback = collector(&mut collected);
	let result = monitor
		.retrieve_balance_activities("a", &mut callback, GetBalanceActivityOptions::default())
		.await;
	assert!(matches!(
		result,
		Err(BalanceMonitorError::NotInitialized { .. })
	));

	let tx = RawTransactionBuilder::new().output("a", "100").build();
	let result = monitor.tx_to_balance_activity("a", &tx).await;
	assert!(matches!(
		result,
		Err(BalanceMonitorError::NotInitialized { .. })
	));
}

#[tokio::test]
async fn test_init_twice_fails() {
	let mut client = MockNetworkClient::new();
	expect_connect(&mut client);
	expect_disconnect(&mut client);

	let monitor = initialized_monitor(client).await;
	assert_eq!(monitor.state().await, MonitorState::Initialized);

	assert!(matches!(
		monitor.init().await,
		Err(BalanceMonitorError::AlreadyInitialized)
	));
	assert_eq!(monitor.state().await, MonitorState::Initialized);

	monitor.destroy().await.unwrap();
}

#[tokio::test]
async fn test_operations_after_destroy_fail_with_already_destroyed() {
	let mut client = MockNetworkClient::new();
	expect_connect(&mut client);
	expect_disconnect(&mut client);

	let monitor = initialized_monitor(client).await;
	monitor.destroy().await.unwrap();
	assert_eq!(monitor.state().await, MonitorState::Destroyed);

	assert!(matches!(
		monitor.init().await,
		Err(BalanceMonitorError::AlreadyDestroyed { .. })
	));
	assert!(matches!(
		monitor.destroy().await,
		Err(BalanceMonitorError::AlreadyDestroyed { .. })
	));
	assert!(matches!(
		monitor.subscribe_addresses(&addresses(&["a"])).await,
		Err(BalanceMonitorError::AlreadyDestroyed { .. })
	));
	assert!(matches!(
		monitor.on_balance_activity(noop_listener()).await,
		Err(BalanceMonitorError::AlreadyDestroyed { .. })
	));

	let mut collected = Vec::new();
	let mut callback = collector(&mut collected);
	assert!(matches!(
		monitor
			.retrieve_balance_activities("a", &mut callback, GetBalanceActivityOptions::default())
			.await,
		Err(BalanceMonitorError::AlreadyDestroyed { .. })
	));

	let tx = RawTransactionBuilder::new().output("a", "100").build();
	assert!(matches!(
		monitor.tx_to_balance_activity("a", &tx).await,
		Err(BalanceMonitorError::AlreadyDestroyed { .. })
	));
}

#[tokio::test]
async fn test_destroy_before_init() {
	let mut client = MockNetworkClient::new();
	client.expect_connect().times(0);
	client.expect_disconnect().times(0);

	let monitor = NetworkBalanceMonitor::new(test_network(), Arc::new(client));
	monitor.destroy().await.unwrap();

	assert_eq!(monitor.state().await, MonitorState::Destroyed);
	assert!(matches!(
		monitor.init().await,
		Err(BalanceMonitorError::AlreadyDestroyed { .. })
	));
}

#[tokio::test]
#[traced_test]
async fn test_failed_init_releases_connection() {
	let mut client = MockNetworkClient::new();
	client
		.expect_connect()
		.times(1)
		.returning(|_| Err(BlockChainError::connection_error("node unreachable")));
	client
		.expect_disconnect()
		.times(1)
		.returning(|| Err(BlockChainError::connection_error("not connected")));

	let monitor = NetworkBalanceMonitor::new(test_network(), Arc::new(client));
	let result = monitor.init().await;

	match result {
		Err(BalanceMonitorError::ConnectionError(message)) => {
			assert!(message.contains("bitcoin_mainnet"));
			assert!(message.contains("node unreachable"));
		}
		other => panic!("Expected ConnectionError, got {:?}", other),
	}
	assert_eq!(monitor.state().await, MonitorState::Uninitialized);
	assert!(logs_contain("Failed to release network connection"));

	assert!(matches!(
		monitor.subscribe_addresses(&addresses(&["a"])).await,
		Err(BalanceMonitorError::NotInitialized { .. })
	));
}

#[tokio::test]
async fn test_init_can_be_retried_after_failure() {
	let mut client = MockNetworkClient::new();
	let mut sequence = mockall::Sequence::new();
	client
		.expect_connect()
		.times(1)
		.in_sequence(&mut sequence)
		.returning(|_| Err(BlockChainError::connection_error("timeout")));
	client
		.expect_disconnect()
		.times(1)
		.in_sequence(&mut sequence)
		.returning(|| Ok(()));
	client
		.expect_connect()
		.times(1)
		.in_sequence(&mut sequence)
		.returning(|_| Ok(()));

	let monitor = NetworkBalanceMonitor::new(test_network(), Arc::new(client));
	assert!(monitor.init().await.is_err());
	assert!(monitor.init().await.is_ok());
	assert_eq!(monitor.state().await, MonitorState::Initialized);
}

#[tokio::test]
async fn test_destroy_reports_disconnect_failure() {
	let mut client = MockNetworkClient::new();
	expect_connect(&mut client);
	client
		.expect_disconnect()
		.times(1)
		.returning(|| Err(BlockChainError::connection_error("socket closed")));

	let monitor = initialized_monitor(client).await;
	let result = monitor.destroy().await;

	assert!(matches!(result, Err(BalanceMonitorError::ConnectionError(_))));
	assert_eq!(monitor.state().await, MonitorState::Destroyed);
}

#[tokio::test]
async fn test_subscriptions_accumulate_without_duplicates() {
	let mut client = MockNetworkClient::new();
	expect_connect(&mut client);
	expect_disconnect(&mut client);
	let mut sequence = mockall::Sequence::new();
	client
		.expect_subscribe_addresses()
		.withf(|requested: &[String]| requested.to_vec() == addresses(&["b", "a"]))
		.times(1)
		.in_sequence(&mut sequence)
		.returning(|_| Ok(()));
	client
		.expect_subscribe_addresses()
		.withf(|requested: &[String]| requested.to_vec() == addresses(&["c"]))
		.times(1)
		.in_sequence(&mut sequence)
		.returning(|_| Ok(()));

	let monitor = initialized_monitor(client).await;

	monitor
		.subscribe_addresses(&addresses(&["b", "a", "b"]))
		.await
		.unwrap();
	monitor
		.subscribe_addresses(&addresses(&["a", "c"]))
		.await
		.unwrap();
	// Nothing new, so the network is not asked again
	monitor.subscribe_addresses(&addresses(&["c", "b"])).await.unwrap();
	monitor.subscribe_addresses(&[]).await.unwrap();

	assert_eq!(monitor.subscribed_addresses().await, addresses(&["a", "b", "c"]));

	monitor.destroy().await.unwrap();
}

#[tokio::test]
async fn test_failed_subscription_is_not_recorded() {
	let mut client = MockNetworkClient::new();
	expect_connect(&mut client);
	expect_disconnect(&mut client);
	let mut sequence = mockall::Sequence::new();
	client
		.expect_subscribe_addresses()
		.times(1)
		.in_sequence(&mut sequence)
		.returning(|_| Err(BlockChainError::request_error("rate limited")));
	client
		.expect_subscribe_addresses()
		.withf(|requested: &[String]| requested.to_vec() == addresses(&["a"]))
		.times(1)
		.in_sequence(&mut sequence)
		.returning(|_| Ok(()));

	let monitor = initialized_monitor(client).await;

	let result = monitor.subscribe_addresses(&addresses(&["a"])).await;
	assert!(matches!(result, Err(BalanceMonitorError::ConnectionError(_))));
	assert!(monitor.subscribed_addresses().await.is_empty());

	monitor.subscribe_addresses(&addresses(&["a"])).await.unwrap();
	assert_eq!(monitor.subscribed_addresses().await, addresses(&["a"]));

	monitor.destroy().await.unwrap();
}

#[tokio::test]
async fn test_destroy_clears_subscriptions() {
	let mut client = MockNetworkClient::new();
	expect_connect(&mut client);
	expect_disconnect(&mut client);
	client
		.expect_subscribe_addresses()
		.times(1)
		.returning(|_| Ok(()));

	let monitor = initialized_monitor(client).await;
	monitor.subscribe_addresses(&addresses(&["a"])).await.unwrap();
	monitor.destroy().await.unwrap();

	assert!(monitor.subscribed_addresses().await.is_empty());
}
