//! Application state wiring all services together.
//!
//! Services are generic over repository/storage/session traits; AppState pins
//! them to the concrete infra implementations.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use menubot_core::chat::eviction::{EvictionPolicy, IdleTtl, NoEviction};
use menubot_core::chat::session_store::InMemorySessionStore;
use menubot_core::llm::client::{GenerationClient, GenerationSettings};
use menubot_core::recommend::service::RecommendationService;
use menubot_core::service::category::CategoryService;
use menubot_core::service::menu::MenuService;
use menubot_infra::config::resolve_api_key;
use menubot_infra::filesystem::uploads::LocalUploadStore;
use menubot_infra::llm::create_provider;
use menubot_infra::sqlite::category::SqliteCategoryRepository;
use menubot_infra::sqlite::menu::SqliteMenuRepository;
use menubot_infra::sqlite::pool::{DatabasePool, database_url};
use menubot_types::config::{GlobalConfig, SessionConfig};

/// Concrete type aliases for the service generics pinned to infra implementations.
pub type ConcreteMenuService = MenuService<SqliteMenuRepository, LocalUploadStore>;

pub type ConcreteCategoryService = CategoryService<SqliteCategoryRepository>;

pub type ConcreteRecommendationService =
    RecommendationService<InMemorySessionStore, SqliteMenuRepository>;

/// Shared application state handed to every HTTP handler.
#[derive(Clone)]
pub struct AppState {
    pub menu_service: Arc<ConcreteMenuService>,
    pub category_service: Arc<ConcreteCategoryService>,
    pub recommendation_service: Arc<ConcreteRecommendationService>,
    pub config: Arc<GlobalConfig>,
    pub data_dir: PathBuf,
}

impl AppState {
    /// Initialize the application state: connect to DB, build the provider, wire services.
    ///
    /// A missing or unusable provider does not fail startup; the recommend
    /// endpoint then answers 503 while menu management keeps working.
    pub async fn init(data_dir: PathBuf, config: GlobalConfig) -> anyhow::Result<Self> {
        tokio::fs::create_dir_all(&data_dir).await?;

        let db_pool = DatabasePool::new(&database_url(&data_dir)).await?;

        let provider = match create_provider(&config.llm, resolve_api_key(&config.llm)) {
            Ok(provider) => Some(provider),
            Err(e) => {
                tracing::warn!(
                    provider = %config.llm.provider,
                    error = %e,
                    "Generation provider unavailable, recommendations disabled"
                );
                None
            }
        };
        let generator = GenerationClient::new(provider, GenerationSettings::from(&config.llm));

        Self::from_parts(data_dir, config, db_pool, generator).await
    }

    /// Wire services over an already-open pool and generation client.
    pub async fn from_parts(
        data_dir: PathBuf,
        config: GlobalConfig,
        db_pool: DatabasePool,
        generator: GenerationClient,
    ) -> anyhow::Result<Self> {
        let uploads = LocalUploadStore::in_data_dir(&data_dir);
        uploads.ensure_dir().await?;

        let menu_repo = SqliteMenuRepository::new(db_pool.clone());
        let menu_service = MenuService::new(
            menu_repo.clone(),
            uploads,
            config.server.public_base_url.clone(),
        );
        let category_service = CategoryService::new(SqliteCategoryRepository::new(db_pool));

        let sessions = Arc::new(build_session_store(&config.session));
        let recommendation_service = RecommendationService::new(sessions, menu_repo, generator);

        Ok(Self {
            menu_service: Arc::new(menu_service),
            category_service: Arc::new(category_service),
            recommendation_service: Arc::new(recommendation_service),
            config: Arc::new(config),
            data_dir,
        })
    }

    pub fn sessions(&self) -> &Arc<InMemorySessionStore> {
        self.recommendation_service.sessions()
    }
}

/// Build the session store from the `[session]` config section.
pub fn build_session_store(config: &SessionConfig) -> InMemorySessionStore {
    let policy: Box<dyn EvictionPolicy> = match config.idle_ttl_secs {
        Some(secs) => Box::new(IdleTtl::new(Duration::from_secs(secs))),
        None => Box::new(NoEviction),
    };
    InMemorySessionStore::with_policy(policy, config.max_sessions)
}

#[cfg(test)]
mod tests {
    use super::*;
    use menubot_core::chat::session_store::SessionStore;
    use menubot_types::chat::{SessionKey, Turn};

    #[test]
    fn test_default_session_store_never_evicts() {
        let store = build_session_store(&SessionConfig::default());
        store.append(&SessionKey::new("a"), Turn::user("hi"));
        let far_future = chrono::Utc::now() + chrono::TimeDelta::days(365);
        assert_eq!(store.sweep(far_future), 0);
    }

    #[test]
    fn test_session_store_applies_ttl_and_capacity() {
        let config = SessionConfig {
            idle_ttl_secs: Some(60),
            max_sessions: Some(1),
            sweep_interval_secs: 1,
        };
        let store = build_session_store(&config);
        store.append(&SessionKey::new("a"), Turn::user("hi"));
        store.append(&SessionKey::new("b"), Turn::user("hi"));

        assert_eq!(store.sweep(chrono::Utc::now()), 1);
        assert_eq!(store.session_count(), 1);

        let later = chrono::Utc::now() + chrono::TimeDelta::seconds(120);
        assert_eq!(store.sweep(later), 1);
        assert_eq!(store.session_count(), 0);
    }

    #[tokio::test]
    async fn test_init_creates_database_and_upload_dir() {
        let dir = tempfile::tempdir().unwrap();
        let data_dir = dir.path().join("data");

        let state = AppState::init(data_dir.clone(), GlobalConfig::default())
            .await
            .unwrap();

        assert!(data_dir.join("menubot.db").exists());
        assert!(data_dir.join("uploads").is_dir());
        assert!(state.menu_service.list_items().await.unwrap().is_empty());
    }
}
