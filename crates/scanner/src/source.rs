use alloy_eips::BlockId;
use alloy_provider::{Provider, RootProvider};
use alloy_rpc_types::{BlockTransactionsKind, Filter, Log as RpcLog};
use async_trait::async_trait;
use url::Url;

use crate::ScanError;

/// The node queries a scan depends on.
#[async_trait]
pub trait TransferSource {
    /// Returns the number of the latest block header.
    async fn latest_block_number(&self) -> Result<u64, ScanError>;

    /// Returns the logs matching `filter`.
    async fn get_logs(&self, filter: &Filter) -> Result<Vec<RpcLog>, ScanError>;
}

/// A [`TransferSource`] backed by a JSON-RPC [`Provider`].
#[derive(Debug, Clone)]
pub struct RpcSource<P> {
    provider: P,
}

impl<P> RpcSource<P> {
    pub fn new(provider: P) -> Self {
        Self { provider }
    }
}

impl RpcSource<RootProvider> {
    /// Creates a source talking to the HTTP endpoint at `rpc_url`.
    pub fn new_http(rpc_url: Url) -> Self {
        let provider: RootProvider = RootProvider::new_http(rpc_url);
        Self::new(provider)
    }
}

#[async_trait]
impl<P: Provider> TransferSource for RpcSource<P> {
    async fn latest_block_number(&self) -> Result<u64, ScanError> {
        let block =
            self.provider.get_block(BlockId::latest(), BlockTransactionsKind::Hashes).await?.ok_or(ScanError::HeadNotFound)?;

        Ok(block.header.number)
    }

    async fn get_logs(&self, filter: &Filter) -> Result<Vec<RpcLog>, ScanError> {
        let logs = self.provider.get_logs(filter).await?;

        Ok(logs)
    }
}
