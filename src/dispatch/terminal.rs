//! Default finalizer for requests the registry did not handle.

use std::sync::Arc;

use tracing::error;

use crate::config::Config;
use crate::http::request::Request;
use crate::http::response::{Response, ResponseBuilder, StatusCode};

/// Error-reporting hook invoked for every error that reaches the terminal.
pub type ErrorHook = Arc<dyn Fn(&anyhow::Error) + Send + Sync>;

/// Terminal finalizer: writes the response for a request no handler
/// finalized.
///
/// With no surviving error the request gets a 404 naming the original
/// target; with one it gets a 500, and the error is reported through the
/// hook. The hook is fixed at construction from explicit configuration.
pub struct Terminal {
    on_error: Option<ErrorHook>,
}

impl Terminal {
    /// Builds the default terminal for a configuration: errors are logged
    /// through `tracing` when `config.log_errors` is set, swallowed
    /// otherwise.
    pub fn new(config: &Config) -> Self {
        if config.log_errors {
            Self::with_hook(Arc::new(|err: &anyhow::Error| {
                error!(error = %err, "Unhandled dispatch error");
            }))
        } else {
            Self::silent()
        }
    }

    /// Builds a terminal with a custom error-reporting hook.
    pub fn with_hook(hook: ErrorHook) -> Self {
        Self {
            on_error: Some(hook),
        }
    }

    /// Builds a terminal that reports nothing. Unhandled errors still
    /// produce a 500 response.
    pub fn silent() -> Self {
        Self { on_error: None }
    }

    /// Writes the final response for a request whose dispatch exhausted
    /// the registry.
    pub fn finish(&self, req: &Request, res: &mut Response, err: Option<anyhow::Error>) {
        match err {
            Some(err) => {
                if let Some(hook) = &self.on_error {
                    hook(&err);
                }
                *res = ResponseBuilder::new(StatusCode::InternalServerError)
                    .header("Content-Type", "text/plain")
                    .body(b"500 Internal Server Error".to_vec())
                    .build();
            }
            None => {
                // Name the target the client sent, however many prefixes
                // dispatch stripped along the way.
                let body = format!("Cannot {:?} {}", req.method, req.original_path);
                *res = ResponseBuilder::new(StatusCode::NotFound)
                    .header("Content-Type", "text/plain")
                    .body(body.into_bytes())
                    .build();
            }
        }
    }
}
