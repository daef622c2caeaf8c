// crates/personas-server/src/routes.rs
// ============================================================================
// Module: Persona Routes
// Description: HTTP handlers for the `/personas` resource.
// Purpose: Map requests onto the persona service and audit each response.
// Dependencies: personas-core, axum, tokio
// ============================================================================

//! ## Overview
//! Handlers are thin: they extract the path id and JSON body, call the
//! [`PersonaService`] on a blocking context, and serialize the result. A
//! missing persona is answered with `200` and a JSON `null`. Store failures
//! become a plain-text `500`; extractor rejections keep the framework status.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::sync::Arc;
use std::time::Instant;

use axum::Json;
use axum::extract::Path;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::extract::rejection::PathRejection;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::response::Response;
use personas_core::Persona;
use personas_core::PersonaFields;
use personas_core::PersonaId;
use personas_core::PersonaRecord;
use personas_core::PersonaService;
use personas_core::SharedPersonaStore;
use personas_core::StoreError;

use crate::audit::PersonaAuditEvent;
use crate::audit::PersonaAuditEventParams;
use crate::audit::PersonaAuditSink;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Collection route template.
pub const COLLECTION_ROUTE: &str = "/personas";
/// Single-persona route template.
pub const ITEM_ROUTE: &str = "/personas/{id}";

// ============================================================================
// SECTION: State
// ============================================================================

/// Shared handler state.
pub(crate) struct ServerState {
    /// Persona service over the configured store.
    pub(crate) service: PersonaService<SharedPersonaStore>,
    /// Audit sink for request events.
    pub(crate) audit: Arc<dyn PersonaAuditSink>,
}

/// Audit labels for one request.
struct RequestLabel {
    /// HTTP method.
    method: &'static str,
    /// Route template.
    route: &'static str,
    /// Handler start time.
    started: Instant,
}

impl RequestLabel {
    /// Starts timing a request.
    fn start(method: &'static str, route: &'static str) -> Self {
        Self {
            method,
            route,
            started: Instant::now(),
        }
    }
}

impl ServerState {
    /// Converts a handler result into a response and records the audit event.
    fn respond(
        &self,
        label: &RequestLabel,
        persona_id: Option<PersonaId>,
        result: Result<Response, ApiError>,
    ) -> Response {
        let (response, error_kind) = match result {
            Ok(response) => (response, None),
            Err(err) => {
                let kind = err.kind();
                (err.into_response(), Some(kind))
            }
        };
        self.audit.record(&PersonaAuditEvent::new(&PersonaAuditEventParams {
            method: label.method,
            route: label.route,
            persona_id: persona_id.map(PersonaId::get),
            status: response.status().as_u16(),
            error_kind,
            duration_ms: label.started.elapsed().as_millis(),
        }));
        response
    }
}

// ============================================================================
// SECTION: Handlers
// ============================================================================

/// `GET /personas`
pub(crate) async fn list_personas(State(state): State<Arc<ServerState>>) -> Response {
    let label = RequestLabel::start("GET", COLLECTION_ROUTE);
    let result = run_blocking(|| state.service.find_all())
        .map(|personas| Json(personas).into_response())
        .map_err(ApiError::from);
    state.respond(&label, None, result)
}

/// `GET /personas/{id}`
pub(crate) async fn get_persona(
    State(state): State<Arc<ServerState>>,
    id: Result<Path<i64>, PathRejection>,
) -> Response {
    let label = RequestLabel::start("GET", ITEM_ROUTE);
    let id = match id {
        Ok(Path(id)) => PersonaId::new(id),
        Err(rejection) => return state.respond(&label, None, Err(ApiError::path(&rejection))),
    };
    let result = run_blocking(|| state.service.find_by_id(id))
        .map(|persona| Json(persona).into_response())
        .map_err(ApiError::from);
    state.respond(&label, Some(id), result)
}

/// `POST /personas`
pub(crate) async fn create_persona(
    State(state): State<Arc<ServerState>>,
    body: Result<Json<PersonaFields>, JsonRejection>,
) -> Response {
    let label = RequestLabel::start("POST", COLLECTION_ROUTE);
    let fields = match body {
        Ok(Json(fields)) => fields,
        Err(rejection) => return state.respond(&label, None, Err(ApiError::body(&rejection))),
    };
    match run_blocking(|| state.service.save(&PersonaRecord::new(fields))) {
        Ok(persona) => {
            let id = persona.id;
            state.respond(&label, Some(id), Ok(Json(persona).into_response()))
        }
        Err(err) => state.respond(&label, None, Err(ApiError::from(err))),
    }
}

/// `PUT /personas/{id}`
pub(crate) async fn update_persona(
    State(state): State<Arc<ServerState>>,
    id: Result<Path<i64>, PathRejection>,
    body: Result<Json<PersonaFields>, JsonRejection>,
) -> Response {
    let label = RequestLabel::start("PUT", ITEM_ROUTE);
    let id = match id {
        Ok(Path(id)) => PersonaId::new(id),
        Err(rejection) => return state.respond(&label, None, Err(ApiError::path(&rejection))),
    };
    let fields = match body {
        Ok(Json(fields)) => fields,
        Err(rejection) => return state.respond(&label, Some(id), Err(ApiError::body(&rejection))),
    };
    let result = run_blocking(|| overwrite_existing(&state.service, id, fields))
        .map(|persona| Json(persona).into_response())
        .map_err(ApiError::from);
    state.respond(&label, Some(id), result)
}

/// `DELETE /personas/{id}`
pub(crate) async fn delete_persona(
    State(state): State<Arc<ServerState>>,
    id: Result<Path<i64>, PathRejection>,
) -> Response {
    let label = RequestLabel::start("DELETE", ITEM_ROUTE);
    let id = match id {
        Ok(Path(id)) => PersonaId::new(id),
        Err(rejection) => return state.respond(&label, None, Err(ApiError::path(&rejection))),
    };
    let result = run_blocking(|| state.service.delete(id))
        .map(|()| StatusCode::OK.into_response())
        .map_err(ApiError::from);
    state.respond(&label, Some(id), result)
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Replaces both fields of an existing persona; `None` when the id is unknown.
fn overwrite_existing(
    service: &PersonaService<SharedPersonaStore>,
    id: PersonaId,
    fields: PersonaFields,
) -> Result<Option<Persona>, StoreError> {
    let Some(existing) = service.find_by_id(id)? else {
        return Ok(None);
    };
    let mut record = PersonaRecord::from(existing);
    record.overwrite_fields(fields);
    service.save(&record).map(Some)
}

/// Runs a store call, shifting to a blocking context when available.
fn run_blocking<T>(call: impl FnOnce() -> T) -> T {
    match tokio::runtime::Handle::try_current() {
        Ok(handle) if handle.runtime_flavor() == tokio::runtime::RuntimeFlavor::MultiThread => {
            tokio::task::block_in_place(call)
        }
        _ => call(),
    }
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Handler errors rendered as plain-text responses.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Persona store failure.
    #[error("{0}")]
    Store(#[from] StoreError),
    /// Request rejected before reaching the service.
    #[error("{message}")]
    Rejected {
        /// Status chosen by the extractor.
        status: StatusCode,
        /// Normalized error kind label.
        kind: &'static str,
        /// Extractor message.
        message: String,
    },
}

impl ApiError {
    /// Wraps a path extractor rejection.
    fn path(rejection: &PathRejection) -> Self {
        Self::Rejected {
            status: rejection.status(),
            kind: "invalid_path",
            message: rejection.body_text(),
        }
    }

    /// Wraps a JSON body extractor rejection.
    fn body(rejection: &JsonRejection) -> Self {
        let status = rejection.status();
        let kind = if status == StatusCode::PAYLOAD_TOO_LARGE {
            "body_too_large"
        } else {
            "invalid_body"
        };
        Self::Rejected {
            status,
            kind,
            message: rejection.body_text(),
        }
    }

    /// Returns the HTTP status for this error.
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Rejected {
                status, ..
            } => *status,
        }
    }

    /// Returns a stable label for audit events.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match *self {
            Self::Store(ref err) => err.kind(),
            Self::Rejected {
                kind, ..
            } => kind,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status(), self.to_string()).into_response()
    }
}
