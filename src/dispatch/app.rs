//! Handler registry and dispatch loop.

use std::sync::Arc;

use tracing::{debug, trace};

use crate::dispatch::handler::{Endpoint, ErrorHandler, Flow, Handler, Nested, Outcome};
use crate::dispatch::matcher;
use crate::http::request::Request;
use crate::http::response::Response;

/// One registry entry: a handler mounted under a path prefix.
pub struct Layer {
    prefix: String,
    endpoint: Endpoint,
}

impl Layer {
    /// The normalized mount prefix (`/`, or no trailing slash).
    pub fn prefix(&self) -> &str {
        &self.prefix
    }
}

/// An ordered middleware stack with two-channel dispatch.
///
/// Layers are appended during setup and never removed; registration order
/// is invocation order. Duplicate and overlapping prefixes are legal and
/// resolved by order. Once setup completes the registry is read-only, so
/// one `Arc<App>` can serve arbitrarily many concurrent dispatches.
#[derive(Default)]
pub struct App {
    layers: Vec<Layer>,
}

impl App {
    pub fn new() -> Self {
        Self { layers: Vec::new() }
    }

    /// Mounts a normal handler under a path prefix. Chainable.
    pub fn mount<H>(&mut self, prefix: impl Into<String>, handler: H) -> &mut Self
    where
        H: Handler + 'static,
    {
        self.push(prefix.into(), Endpoint::Normal(Arc::new(handler)))
    }

    /// Mounts an error-aware handler under a path prefix. Chainable.
    pub fn mount_error<H>(&mut self, prefix: impl Into<String>, handler: H) -> &mut Self
    where
        H: ErrorHandler + 'static,
    {
        self.push(prefix.into(), Endpoint::ErrorAware(Arc::new(handler)))
    }

    /// Mounts a normal handler at the root prefix.
    pub fn with<H>(&mut self, handler: H) -> &mut Self
    where
        H: Handler + 'static,
    {
        self.mount("/", handler)
    }

    /// Mounts an error-aware handler at the root prefix.
    pub fn with_error<H>(&mut self, handler: H) -> &mut Self
    where
        H: ErrorHandler + 'static,
    {
        self.mount_error("/", handler)
    }

    /// Mounts another dispatcher: its registry is consulted whenever
    /// `prefix` matches, with `prefix` as its mount route. An inner
    /// dispatch that exhausts its registry falls through to this
    /// registry's next layer.
    pub fn nest(&mut self, prefix: impl Into<String>, app: impl Into<Arc<App>>) -> &mut Self {
        self.mount(prefix, Nested(app.into()))
    }

    /// Number of registered layers.
    pub fn len(&self) -> usize {
        self.layers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    fn push(&mut self, prefix: String, endpoint: Endpoint) -> &mut Self {
        let prefix = normalize_prefix(prefix);
        debug!(prefix = %prefix, "Mounting handler");
        self.layers.push(Layer { prefix, endpoint });
        self
    }

    /// Walks the registry once for `req`, invoking every layer whose
    /// prefix matches the working path.
    ///
    /// Each matching layer sees `req.path` with its prefix stripped (and a
    /// synthetic leading `/` when the remainder lacks one); the working
    /// path is recomputed from the dispatch-entry value before every
    /// sibling layer, so no stripped prefix ever leaks into a later
    /// layer's matching decision. `req.original_path` is set once and
    /// never rewritten.
    ///
    /// Returns [`Outcome::Finalized`] when a handler halts dispatch, or
    /// [`Outcome::Unhandled`] with the surviving error once the registry
    /// is exhausted; the caller owes the request a terminal transition in
    /// the latter case.
    pub async fn dispatch(&self, req: &mut Request, res: &mut Response) -> Outcome {
        if req.original_path.is_empty() {
            req.original_path = req.path.clone();
        }

        // Working path at entry. For a nested dispatch this is the outer
        // loop's rewritten path, so all inner matching is mount-relative.
        let base = req.path.clone();
        let mut active: Option<anyhow::Error> = None;

        for layer in &self.layers {
            let path = matcher::pathname(&base);
            if !matcher::matches(path, &layer.prefix) {
                continue;
            }

            let result = match (&layer.endpoint, active.take()) {
                (Endpoint::Normal(handler), None) => {
                    req.path = strip_prefix(&base, &layer.prefix);
                    trace!(prefix = %layer.prefix, path = %req.path, "Invoking handler");
                    handler.handle(req, res).await
                }
                (Endpoint::ErrorAware(handler), Some(err)) => {
                    req.path = strip_prefix(&base, &layer.prefix);
                    trace!(prefix = %layer.prefix, path = %req.path, "Invoking error handler");
                    handler.recover(err, req, res).await
                }
                (_, state) => {
                    // Channel mismatch: skip without invoking, keeping the
                    // error state intact.
                    trace!(prefix = %layer.prefix, "Skipping handler on the other channel");
                    active = state;
                    continue;
                }
            };

            // Sibling layers always match against the unstripped path.
            req.path = base.clone();

            match result {
                Ok(Flow::Continue) => {}
                Ok(Flow::Halt) => return Outcome::Finalized,
                Err(err) => {
                    debug!(prefix = %layer.prefix, error = %err, "Handler entered the error channel");
                    active = Some(err);
                }
            }
        }

        Outcome::Unhandled(active)
    }
}

/// Normalizes a mount prefix: empty becomes the root, and one trailing
/// slash is stripped from anything longer than the root.
fn normalize_prefix(prefix: String) -> String {
    if prefix.is_empty() {
        return "/".to_string();
    }
    if prefix.len() > 1 && prefix.ends_with('/') {
        prefix[..prefix.len() - 1].to_string()
    } else {
        prefix
    }
}

/// Working path for a matched layer: `prefix` stripped from `base` behind
/// any scheme+host prefix, with a synthetic leading slash when the
/// remainder lacks one.
fn strip_prefix(base: &str, prefix: &str) -> String {
    if prefix.is_empty() || prefix == "/" {
        return base.to_string();
    }

    let host = matcher::proto_host(base).unwrap_or("");
    let rest = &base[host.len() + prefix.len()..];

    if host.is_empty() && !rest.starts_with('/') {
        format!("/{}", rest)
    } else {
        format!("{}{}", host, rest)
    }
}
