use std::sync::Mutex;

use alloy_primitives::{address, Address, Bytes, Log, LogData, U256};
use alloy_rpc_types::{Filter, Log as RpcLog};
use alloy_sol_types::SolEvent;
use alloy_transport::TransportErrorKind;
use async_trait::async_trait;
use erc20_activity_scanner::{scan, AddressMetric, ScanError, TransferSource, IERC20};

const USDC: Address = address!("A0b86991c6218b36c1d19D4a2e9Eb0cE3606eB48");

const ALICE: Address = address!("1111111111111111111111111111111111111111");
const BOB: Address = address!("2222222222222222222222222222222222222222");

/// A node answering from memory.
#[derive(Debug, Default)]
struct MemorySource {
    head: Option<u64>,
    logs: Vec<RpcLog>,
    fail_logs: bool,
    requested: Mutex<Vec<(Option<u64>, Option<u64>)>>,
}

#[async_trait]
impl TransferSource for MemorySource {
    async fn latest_block_number(&self) -> Result<u64, ScanError> {
        self.head.ok_or(ScanError::HeadNotFound)
    }

    async fn get_logs(&self, filter: &Filter) -> Result<Vec<RpcLog>, ScanError> {
        self.requested.lock().unwrap().push((filter.get_from_block(), filter.get_to_block()));

        if self.fail_logs {
            return Err(TransportErrorKind::custom_str("connection refused").into());
        }

        Ok(self.logs.clone())
    }
}

fn rpc_log(data: LogData) -> RpcLog {
    RpcLog {
        inner: Log { address: USDC, data },
        block_hash: None,
        block_number: None,
        block_timestamp: None,
        transaction_hash: None,
        transaction_index: None,
        log_index: None,
        removed: false,
    }
}

fn transfer_log(from: Address, to: Address) -> RpcLog {
    let event = IERC20::Transfer { from, to, value: U256::from(1_000_000) };
    rpc_log(event.encode_log_data())
}

fn two_topic_log(from: Address) -> RpcLog {
    rpc_log(LogData::new_unchecked(
        vec![IERC20::Transfer::SIGNATURE_HASH, from.into_word()],
        Bytes::from(U256::from(1).to_be_bytes::<32>().to_vec()),
    ))
}

#[tokio::test]
async fn test_scan_ranks_addresses() -> eyre::Result<()> {
    let source = MemorySource {
        head: Some(20_764_847),
        logs: vec![transfer_log(ALICE, BOB), transfer_log(BOB, ALICE), transfer_log(ALICE, ALICE)],
        ..Default::default()
    };

    let report = scan(&source).await?;

    assert_eq!(report.window.from, 20_764_748);
    assert_eq!(report.window.to, 20_764_847);
    assert_eq!(report.logs, 3);
    assert_eq!(report.transfers, 3);
    assert_eq!(
        report.ranked,
        vec![AddressMetric { address: ALICE, count: 4 }, AddressMetric { address: BOB, count: 2 }]
    );

    Ok(())
}

#[tokio::test]
async fn test_scan_queries_the_window() -> eyre::Result<()> {
    let source =
        MemorySource { head: Some(1_000), logs: vec![transfer_log(ALICE, BOB)], ..Default::default() };

    scan(&source).await?;

    assert_eq!(*source.requested.lock().unwrap(), vec![(Some(901), Some(1_000))]);

    Ok(())
}

#[tokio::test]
async fn test_scan_ignores_malformed_logs() -> eyre::Result<()> {
    let valid = vec![transfer_log(ALICE, BOB), transfer_log(BOB, BOB)];

    let clean = MemorySource { head: Some(500), logs: valid.clone(), ..Default::default() };

    let mut noisy_logs = valid;
    noisy_logs.insert(0, two_topic_log(ALICE));
    noisy_logs.push(two_topic_log(BOB));
    let noisy = MemorySource { head: Some(500), logs: noisy_logs, ..Default::default() };

    let clean_report = scan(&clean).await?;
    let noisy_report = scan(&noisy).await?;

    assert_eq!(noisy_report.logs, 4);
    assert_eq!(noisy_report.transfers, 2);
    assert_eq!(clean_report.ranked, noisy_report.ranked);

    Ok(())
}

#[tokio::test]
async fn test_scan_is_repeatable() -> eyre::Result<()> {
    let source = MemorySource {
        head: Some(77),
        logs: vec![transfer_log(ALICE, BOB), transfer_log(BOB, USDC), transfer_log(USDC, ALICE)],
        ..Default::default()
    };

    let first = scan(&source).await?;
    let second = scan(&source).await?;

    assert_eq!(first.ranked, second.ranked);

    Ok(())
}

#[tokio::test]
async fn test_scan_without_transfers() {
    let source = MemorySource { head: Some(500), logs: vec![], ..Default::default() };

    let err = scan(&source).await.unwrap_err();

    assert!(matches!(err, ScanError::NoTransfers));
}

#[tokio::test]
async fn test_scan_only_malformed_logs() {
    let source = MemorySource {
        head: Some(500),
        logs: vec![two_topic_log(ALICE), two_topic_log(BOB)],
        ..Default::default()
    };

    assert!(matches!(scan(&source).await, Err(ScanError::NoTransfers)));
}

#[tokio::test]
async fn test_scan_missing_head() {
    let source = MemorySource { head: None, ..Default::default() };

    assert!(matches!(scan(&source).await, Err(ScanError::HeadNotFound)));
    assert!(source.requested.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_scan_log_query_failure() {
    let source = MemorySource {
        head: Some(500),
        logs: vec![transfer_log(ALICE, BOB)],
        fail_logs: true,
        ..Default::default()
    };

    assert!(matches!(scan(&source).await, Err(ScanError::Transport(_))));
}

#[tokio::test]
async fn test_report_top_is_bounded() -> eyre::Result<()> {
    let source =
        MemorySource { head: Some(500), logs: vec![transfer_log(ALICE, BOB)], ..Default::default() };

    let report = scan(&source).await?;

    assert_eq!(report.top(5).len(), 2);
    assert_eq!(report.top(1), &[AddressMetric { address: ALICE, count: 1 }]);
    assert!(report.top(0).is_empty());

    let json = serde_json::to_value(report.top(5))?;
    assert_eq!(json[0]["count"], 1);

    Ok(())
}
