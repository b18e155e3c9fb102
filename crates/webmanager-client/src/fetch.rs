//! Block fetch service for the selection controller.

use async_trait::async_trait;
use tracing::debug;

use webmanager_models::{Block, BlockId};
use webmanager_selection::{FetchFailure, FetchService};

use crate::client::WebManagerClient;

/// Loads full blocks through an authenticated client.
#[derive(Clone)]
pub struct BlockFetcher {
    client: WebManagerClient,
}

impl BlockFetcher {
    /// Creates a fetcher over the given client.
    pub fn new(client: WebManagerClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl FetchService for BlockFetcher {
    type Content = Block;

    async fn fetch(&self, id: BlockId) -> Result<Block, FetchFailure> {
        self.client.block(id).await.map_err(|e| {
            debug!(block_id = %id, error = %e, "block fetch failed");
            FetchFailure::from_error(e)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::time::Duration;

    use webmanager_models::SelectionSummary;
    use webmanager_selection::{SelectionConfig, SelectionController};

    use crate::client::tests::{spawn_api, TOKEN};
    use crate::config::ClientConfig;

    async fn make_fetcher(token: Option<&str>) -> BlockFetcher {
        let config = ClientConfig::new(spawn_api().await);
        let mut client = WebManagerClient::new(&config).unwrap();
        if let Some(token) = token {
            client = client.with_token(token);
        }
        BlockFetcher::new(client)
    }

    #[tokio::test]
    async fn test_fetch_block() {
        let fetcher = make_fetcher(Some(TOKEN)).await;
        let block = fetcher.fetch(BlockId::new(11)).await.unwrap();
        assert_eq!(block.name, "Field 11");
    }

    #[tokio::test]
    async fn test_client_errors_become_failures() {
        let fetcher = make_fetcher(Some(TOKEN)).await;
        let failure = fetcher.fetch(BlockId::new(404)).await.unwrap_err();
        assert_eq!(failure.message, "API error 404: No block with id 404");

        let fetcher = make_fetcher(None).await;
        let failure = fetcher.fetch(BlockId::new(10)).await.unwrap_err();
        assert!(failure.message.contains("not logged in"));
    }

    #[tokio::test]
    async fn test_controller_over_http() {
        let fetcher = Arc::new(make_fetcher(Some(TOKEN)).await);
        let config = SelectionConfig::new().with_debounce(Duration::from_millis(10));
        let controller = SelectionController::start(
            fetcher,
            config,
            vec![SelectionSummary::new(10, "Field A"), SelectionSummary::new(404, "Missing")],
        );

        let mut states = controller.subscribe_state();
        let loaded = tokio::time::timeout(
            Duration::from_secs(5),
            states.wait_for(|s| !s.is_loading && s.content.is_some()),
        )
        .await
        .unwrap()
        .unwrap()
        .clone();
        assert_eq!(loaded.content.map(|b| b.id.value()), Some(10));

        controller.select_item(SelectionSummary::new(404, "Missing"));
        let failed = tokio::time::timeout(
            Duration::from_secs(5),
            states.wait_for(|s| !s.is_loading && s.error.is_some()),
        )
        .await
        .unwrap()
        .unwrap()
        .clone();
        assert!(failed.content.is_none());
        assert!(failed.error.unwrap().contains("404"));

        controller.dispose().await.unwrap();
    }
}
