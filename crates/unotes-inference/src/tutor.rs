//! Request orchestration entry point.
//!
//! A request moves through `Resolving → Dispatching → Invoking → Done`; any
//! stage may fail, and a failure is returned to the caller unchanged. There is
//! no partial success and no retry.

use std::fmt;
use std::sync::Arc;
use std::time::Instant;

use tracing::{debug, info, instrument, warn};
use unotes_core::{
    ChatBackend, Error, InboundRequest, Mode, ModeRequest, ModelInvocation, ResponseEnvelope,
    Result,
};

use crate::config::ModelCatalog;
use crate::modes::build_invocation;
use crate::resolver::resolve_mode;

/// Orchestration stage, reported when a request fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Resolving,
    Dispatching,
    Invoking,
    Done,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Resolving => "resolving",
            Stage::Dispatching => "dispatching",
            Stage::Invoking => "invoking",
            Stage::Done => "done",
        };
        f.write_str(name)
    }
}

impl Stage {
    /// Stage in which a given error is raised.
    pub fn of(err: &Error) -> Stage {
        match err {
            Error::AmbiguousMode | Error::InvalidMode(_) => Stage::Resolving,
            Error::MissingRequiredField { .. } => Stage::Dispatching,
            _ => Stage::Invoking,
        }
    }
}

/// A request ready to send: resolved mode plus its invocation.
#[derive(Debug, Clone, PartialEq)]
pub struct PreparedRequest {
    pub mode: Mode,
    pub invocation: ModelInvocation,
}

/// Stateless tutor orchestrator. Cheap to clone; share one per process.
#[derive(Clone)]
pub struct Tutor {
    backend: Arc<dyn ChatBackend>,
    catalog: ModelCatalog,
}

impl Tutor {
    pub fn new(backend: Arc<dyn ChatBackend>, catalog: ModelCatalog) -> Self {
        Self { backend, catalog }
    }

    pub fn catalog(&self) -> &ModelCatalog {
        &self.catalog
    }

    pub fn backend(&self) -> &dyn ChatBackend {
        self.backend.as_ref()
    }

    /// Normalize, resolve and dispatch without calling the model.
    pub fn prepare(&self, request: InboundRequest) -> Result<PreparedRequest> {
        let canonical = request.normalize()?;
        let mode = resolve_mode(&canonical)?;
        let bound = ModeRequest::bind(mode, canonical)?;
        let invocation = build_invocation(&bound, &self.catalog);

        debug!(
            mode = %mode,
            variant = %invocation.variant,
            model = %invocation.model,
            prompt_len = invocation.system.len(),
            "Request dispatched"
        );

        Ok(PreparedRequest { mode, invocation })
    }

    /// Run one request end to end: exactly one outbound model call.
    #[instrument(skip(self, request), fields(subsystem = "inference", component = "tutor", op = "handle", backend = self.backend.backend_name()))]
    pub async fn handle(&self, request: InboundRequest) -> Result<ResponseEnvelope> {
        let start = Instant::now();

        let result = self.run(request).await;
        let duration_ms = start.elapsed().as_millis() as u64;

        match &result {
            Ok(envelope) => info!(
                mode = %envelope.mode,
                response_len = envelope.response.len(),
                duration_ms,
                stage = %Stage::Done,
                "Tutor request completed"
            ),
            Err(e) => warn!(
                stage = %Stage::of(e),
                error = %e,
                duration_ms,
                "Tutor request failed"
            ),
        }

        result
    }

    async fn run(&self, request: InboundRequest) -> Result<ResponseEnvelope> {
        let PreparedRequest { mode, invocation } = self.prepare(request)?;
        let response = self.backend.complete(&invocation).await?;
        Ok(ResponseEnvelope::new(response, mode))
    }
}
