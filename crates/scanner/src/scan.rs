use std::fmt;

use alloy_rpc_types::Filter;
use serde::Serialize;

use crate::{
    decode_transfers, rank, tally, AddressMetric, ScanError, TransferSource, TRANSFER_EVENT,
};

/// Number of blocks covered by a scan, head included.
pub const BLOCK_WINDOW_LEN: u64 = 100;

/// An inclusive range of block numbers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BlockWindow {
    pub from: u64,
    pub to: u64,
}

impl fmt::Display for BlockWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..={}", self.from, self.to)
    }
}

/// Returns the [`BLOCK_WINDOW_LEN`] blocks ending at `head`.
pub fn block_window(head: u64) -> BlockWindow {
    BlockWindow { from: head.saturating_sub(BLOCK_WINDOW_LEN - 1), to: head }
}

/// Builds the filter selecting every ERC20 `Transfer` log emitted in `window`.
pub fn transfer_filter(window: BlockWindow) -> Filter {
    Filter::new()
        .from_block(window.from)
        .to_block(window.to)
        .event_signature(TRANSFER_EVENT.topic0())
}

/// The outcome of a [`scan`].
#[derive(Debug, Clone, Serialize)]
pub struct ScanReport {
    /// The scanned blocks.
    pub window: BlockWindow,
    /// Number of logs returned by the node.
    pub logs: usize,
    /// Number of logs decoded as transfers.
    pub transfers: usize,
    /// Addresses by descending transfer count.
    pub ranked: Vec<AddressMetric>,
}

impl ScanReport {
    /// Returns at most `n` of the most active addresses.
    pub fn top(&self, n: usize) -> &[AddressMetric] {
        &self.ranked[..n.min(self.ranked.len())]
    }
}

/// Ranks the addresses taking part in ERC20 transfers over the last [`BLOCK_WINDOW_LEN`] blocks.
pub async fn scan<S>(source: &S) -> Result<ScanReport, ScanError>
where
    S: TransferSource + ?Sized,
{
    let head = source.latest_block_number().await?;
    let window = block_window(head);
    tracing::info!("scanning blocks {window}");

    let filter = transfer_filter(window);
    tracing::debug!(?filter, "fetching transfer logs");
    let logs = source.get_logs(&filter).await?;

    let transfers = decode_transfers(&logs);
    tracing::info!("decoded {} transfers out of {} logs", transfers.len(), logs.len());

    let ranked = rank(tally(&transfers))?;

    Ok(ScanReport { window, logs: logs.len(), transfers: transfers.len(), ranked })
}
