use async_trait::async_trait;
use explorer::client::Client;
use explorer::error::FetchError;
use explorer::model::RawTransfer;

/// Read-only view of the ledger-indexing API, as the sweep needs it. The
/// HTTP client implements it in production; tests script their own.
#[async_trait]
pub trait TransferSource: Send + Sync {
    /// Oldest block holding a transfer for the contract, `None` when the
    /// contract has no transfer history.
    async fn first_transfer_block(&self, contract: &str) -> Result<Option<u64>, FetchError>;

    async fn current_block(&self) -> Result<u64, FetchError>;

    /// Transfers within the inclusive block range, ascending.
    async fn transfer_page(
        &self,
        contract: &str,
        from_block: u64,
        to_block: u64,
    ) -> Result<Vec<RawTransfer>, FetchError>;
}

pub struct ExplorerSource {
    pub client: Client,
}

#[async_trait]
impl TransferSource for ExplorerSource {
    async fn first_transfer_block(&self, contract: &str) -> Result<Option<u64>, FetchError> {
        self.client.first_transfer_block(contract).await
    }

    async fn current_block(&self) -> Result<u64, FetchError> {
        self.client.current_block().await
    }

    async fn transfer_page(
        &self,
        contract: &str,
        from_block: u64,
        to_block: u64,
    ) -> Result<Vec<RawTransfer>, FetchError> {
        self.client.transfer_page(contract, from_block, to_block).await
    }
}
