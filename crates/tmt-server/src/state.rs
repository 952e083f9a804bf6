//! Shared application state.

use std::sync::Arc;

use tmt_auth::AuthService;
use tmt_core::TmtConfig;
use tmt_runtime::{Reconciler, TranslationSearch};
use tmt_store::SqliteStore;
use tmt_translate::{create_provider, FanOutOrchestrator, TranslationProvider, TranslatorGateway};

/// Shared application state accessible from all route handlers.
pub struct AppState {
    pub config: TmtConfig,
    pub store: Arc<SqliteStore>,
    pub reconciler: Reconciler,
    pub search: TranslationSearch,
    pub auth: AuthService,
}

impl AppState {
    /// Wire components using the provider named in `config.translator`.
    pub fn new(config: TmtConfig, store: SqliteStore) -> Self {
        let provider = create_provider(&config.translator);
        Self::with_provider(config, store, provider)
    }

    pub fn with_provider(
        config: TmtConfig,
        store: SqliteStore,
        provider: Arc<dyn TranslationProvider>,
    ) -> Self {
        let store = Arc::new(store);

        let gateway = TranslatorGateway::new(provider, config.translator.timeout);
        let reconciler = Reconciler::new(store.clone(), FanOutOrchestrator::new(gateway));
        let search = TranslationSearch::new(store.clone());
        let auth = AuthService::new(store.clone(), config.session_ttl);

        Self {
            config,
            store,
            reconciler,
            search,
            auth,
        }
    }
}
