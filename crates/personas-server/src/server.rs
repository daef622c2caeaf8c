// crates/personas-server/src/server.rs
// ============================================================================
// Module: Personas HTTP Server
// Description: Server construction, routing, and the HTTP serve loop.
// Purpose: Wire config, store, and audit sink into an axum router.
// Dependencies: personas-core, personas-config, personas-store-sqlite, axum, tokio
// ============================================================================

//! ## Overview
//! [`PersonaServer`] validates configuration, builds the configured persona
//! store and audit sink, and serves the `/personas` routes over HTTP. Request
//! bodies are capped at `server.max_body_bytes`.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::future::Future;
use std::path::Path;
use std::sync::Arc;

use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::routing::get;
use personas_config::PersonasConfig;
use personas_config::ServerAuditConfig;
use personas_config::StoreType;
use personas_core::InMemoryPersonaStore;
use personas_core::PersonaService;
use personas_core::SharedPersonaStore;
use personas_store_sqlite::SqlitePersonaStore;
use tokio::net::TcpListener;

use crate::audit::PersonaAuditSink;
use crate::audit::PersonaFileAuditSink;
use crate::audit::PersonaNoopAuditSink;
use crate::audit::PersonaStderrAuditSink;
use crate::audit::ServerStartedEvent;
use crate::routes::COLLECTION_ROUTE;
use crate::routes::ITEM_ROUTE;
use crate::routes::ServerState;
use crate::routes::create_persona;
use crate::routes::delete_persona;
use crate::routes::get_persona;
use crate::routes::list_personas;
use crate::routes::update_persona;

// ============================================================================
// SECTION: Personas Server
// ============================================================================

/// Personas HTTP server instance.
pub struct PersonaServer {
    /// Server configuration.
    config: PersonasConfig,
    /// Shared handler state.
    state: Arc<ServerState>,
}

impl PersonaServer {
    /// Builds a new server from configuration.
    ///
    /// # Errors
    ///
    /// Returns [`PersonaServerError`] when initialization fails.
    pub fn from_config(config: PersonasConfig) -> Result<Self, PersonaServerError> {
        config.validate().map_err(|err| PersonaServerError::Config(err.to_string()))?;
        let store = build_persona_store(&config)?;
        let audit = build_audit_sink(&config.server.audit)?;
        Self::with_parts(config, store, audit)
    }

    /// Builds a server over an explicit store and audit sink.
    ///
    /// # Errors
    ///
    /// Returns [`PersonaServerError::Config`] when the configuration is invalid.
    pub fn with_parts(
        config: PersonasConfig,
        store: SharedPersonaStore,
        audit: Arc<dyn PersonaAuditSink>,
    ) -> Result<Self, PersonaServerError> {
        config.validate().map_err(|err| PersonaServerError::Config(err.to_string()))?;
        let state = Arc::new(ServerState {
            service: PersonaService::new(store),
            audit,
        });
        Ok(Self {
            config,
            state,
        })
    }

    /// Returns the router for the `/personas` routes.
    pub fn router(&self) -> Router {
        Router::new()
            .route(COLLECTION_ROUTE, get(list_personas).post(create_persona))
            .route(ITEM_ROUTE, get(get_persona).put(update_persona).delete(delete_persona))
            .layer(DefaultBodyLimit::max(self.config.server.max_body_bytes))
            .with_state(Arc::clone(&self.state))
    }

    /// Binds the configured address and serves until the process exits.
    ///
    /// # Errors
    ///
    /// Returns [`PersonaServerError`] when binding or serving fails.
    pub async fn serve(self) -> Result<(), PersonaServerError> {
        let addr = self
            .config
            .server
            .bind_addr()
            .map_err(|err| PersonaServerError::Config(err.to_string()))?;
        let listener = TcpListener::bind(addr)
            .await
            .map_err(|_| PersonaServerError::Transport("http bind failed".to_string()))?;
        self.serve_with_listener(listener, std::future::pending()).await
    }

    /// Serves on an already-bound listener until `shutdown` resolves.
    ///
    /// # Errors
    ///
    /// Returns [`PersonaServerError::Transport`] when the server fails.
    pub async fn serve_with_listener<F>(
        self,
        listener: TcpListener,
        shutdown: F,
    ) -> Result<(), PersonaServerError>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let bind = listener
            .local_addr()
            .map_err(|_| PersonaServerError::Transport("listener address unavailable".to_string()))?;
        self.state.audit.record_started(&ServerStartedEvent::new(
            bind.to_string(),
            self.config.store.store_type.as_str(),
        ));
        let app = self.router();
        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown)
            .await
            .map_err(|_| PersonaServerError::Transport("http server failed".to_string()))
    }
}

/// Builds the persona store from configuration.
fn build_persona_store(config: &PersonasConfig) -> Result<SharedPersonaStore, PersonaServerError> {
    let store = match config.store.store_type {
        StoreType::Memory => SharedPersonaStore::from_store(InMemoryPersonaStore::new()),
        StoreType::Sqlite => {
            let sqlite_config = config.store.sqlite_config().ok_or_else(|| {
                PersonaServerError::Config("sqlite store requires path".to_string())
            })?;
            let store = SqlitePersonaStore::new(&sqlite_config)
                .map_err(|err| PersonaServerError::Init(err.to_string()))?;
            SharedPersonaStore::from_store(store)
        }
    };
    Ok(store)
}

/// Builds the audit sink selected by `server.audit`.
fn build_audit_sink(
    config: &ServerAuditConfig,
) -> Result<Arc<dyn PersonaAuditSink>, PersonaServerError> {
    if !config.enabled {
        return Ok(Arc::new(PersonaNoopAuditSink));
    }
    match &config.path {
        Some(path) => {
            let sink = PersonaFileAuditSink::new(Path::new(path.trim())).map_err(|err| {
                PersonaServerError::Init(format!("audit log open failed: {err}"))
            })?;
            Ok(Arc::new(sink))
        }
        None => Ok(Arc::new(PersonaStderrAuditSink)),
    }
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Personas server errors.
#[derive(Debug, thiserror::Error)]
pub enum PersonaServerError {
    /// Configuration errors.
    #[error("config error: {0}")]
    Config(String),
    /// Initialization errors.
    #[error("init error: {0}")]
    Init(String),
    /// Transport errors.
    #[error("transport error: {0}")]
    Transport(String),
}
