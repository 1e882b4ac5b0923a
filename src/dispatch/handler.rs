//! Handler contract for the dispatch engine.
//!
//! A handler is registered either as a normal handler or as an error-aware
//! handler; the two kinds are distinct traits and the registered form is a
//! tagged [`Endpoint`] variant, fixed at registration time. Instead of
//! calling a continuation, a handler returns a [`Flow`] telling the loop
//! what to do next; a returned error enters the error channel.

use std::sync::Arc;

use async_trait::async_trait;

use crate::dispatch::app::App;
use crate::http::request::Request;
use crate::http::response::Response;

/// What a handler asks the dispatch loop to do after it returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    /// Advance to the next matching layer. Returned by an error-aware
    /// handler, this also clears the active error.
    Continue,
    /// The response is finalized; stop dispatching.
    Halt,
}

/// Result of walking an entire registry.
#[derive(Debug)]
pub enum Outcome {
    /// A handler finalized the response.
    Finalized,
    /// The registry was exhausted; carries the surviving active error,
    /// if any. The caller owes the request a terminal transition.
    Unhandled(Option<anyhow::Error>),
}

/// A unit of request-processing logic, invoked only while no error is
/// active.
///
/// `req.path` is the working target with this layer's mount prefix already
/// stripped; `req.original_path` is the target as the client sent it.
#[async_trait]
pub trait Handler: Send + Sync {
    async fn handle(&self, req: &mut Request, res: &mut Response) -> anyhow::Result<Flow>;
}

/// A handler invoked only while an error is active.
///
/// The active error is passed by value: returning `Ok(Flow::Continue)`
/// consumes it and resumes normal dispatch; returning `Err(_)` keeps the
/// request on the error channel with the returned error (the same one, or
/// a replacement).
#[async_trait]
pub trait ErrorHandler: Send + Sync {
    async fn recover(
        &self,
        err: anyhow::Error,
        req: &mut Request,
        res: &mut Response,
    ) -> anyhow::Result<Flow>;
}

/// Registered form of a handler. The variant is fixed when the handler is
/// mounted and decides which dispatch channel can invoke it.
pub enum Endpoint {
    Normal(Arc<dyn Handler>),
    ErrorAware(Arc<dyn ErrorHandler>),
}

/// Adapts a plain closure into a [`Handler`].
///
/// ```ignore
/// app.with(Inline(|req: &mut Request, _res: &mut Response| -> anyhow::Result<Flow> {
///     tracing::info!(path = %req.path, "request");
///     Ok(Flow::Continue)
/// }));
/// ```
pub struct Inline<F>(pub F);

#[async_trait]
impl<F> Handler for Inline<F>
where
    F: Fn(&mut Request, &mut Response) -> anyhow::Result<Flow> + Send + Sync,
{
    async fn handle(&self, req: &mut Request, res: &mut Response) -> anyhow::Result<Flow> {
        (self.0)(req, res)
    }
}

/// Adapts a plain closure into an [`ErrorHandler`].
pub struct InlineError<F>(pub F);

#[async_trait]
impl<F> ErrorHandler for InlineError<F>
where
    F: Fn(anyhow::Error, &mut Request, &mut Response) -> anyhow::Result<Flow> + Send + Sync,
{
    async fn recover(
        &self,
        err: anyhow::Error,
        req: &mut Request,
        res: &mut Response,
    ) -> anyhow::Result<Flow> {
        (self.0)(err, req, res)
    }
}

/// A dispatcher mounted inside another dispatcher's registry.
///
/// The inner registry is consulted whenever the outer layer's prefix
/// matches; an inner dispatch that exhausts its registry falls through to
/// the outer loop's next layer, carrying any active error with it.
pub struct Nested(pub(crate) Arc<App>);

#[async_trait]
impl Handler for Nested {
    async fn handle(&self, req: &mut Request, res: &mut Response) -> anyhow::Result<Flow> {
        match self.0.dispatch(req, res).await {
            Outcome::Finalized => Ok(Flow::Halt),
            Outcome::Unhandled(None) => Ok(Flow::Continue),
            Outcome::Unhandled(Some(err)) => Err(err),
        }
    }
}
