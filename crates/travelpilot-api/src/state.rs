//! Application state wiring the client together.
//!
//! The chat service is generic over its storage and assistant ports;
//! AppState pins it to the concrete infra implementations.

use std::path::PathBuf;

use anyhow::Context;
use travelpilot_core::chat::controller::ConversationController;
use travelpilot_core::chat::service::ChatService;
use travelpilot_core::storage::session_store::SessionStore;
use travelpilot_infra::assistant::HttpAssistantClient;
use travelpilot_infra::config::load_client_config;
use travelpilot_infra::filesystem::resolve_data_dir;
use travelpilot_infra::storage::FileKvStore;
use travelpilot_types::config::ClientConfig;

pub type ConcreteChatService = ChatService<FileKvStore, HttpAssistantClient>;

/// Shared application state used by every CLI command.
#[derive(Clone)]
pub struct AppState {
    pub chat: ConcreteChatService,
    pub config: ClientConfig,
    pub data_dir: PathBuf,
}

impl AppState {
    /// Initialize the application state: load config, hydrate the trip
    /// history, build the assistant client.
    pub async fn init() -> anyhow::Result<Self> {
        let data_dir = resolve_data_dir();

        tokio::fs::create_dir_all(&data_dir)
            .await
            .with_context(|| format!("Failed to create data directory {}", data_dir.display()))?;

        let config = load_client_config(&data_dir).await;
        tracing::debug!(
            data_dir = %data_dir.display(),
            api_url = %config.api_url,
            "Loaded client config"
        );

        let store = SessionStore::new(
            FileKvStore::new(data_dir.clone()),
            config.storage_slot.clone(),
        );
        let client = HttpAssistantClient::from_config(&config)
            .context("Failed to build assistant client")?;
        let controller = ConversationController::load(store, client).await;

        Ok(Self {
            chat: ChatService::new(controller),
            config,
            data_dir,
        })
    }
}
