//! Middleware dispatch engine.
//!
//! An [`App`] holds an ordered registry of handlers, each mounted under a
//! URL path prefix. Dispatch walks the registry once per request: a layer
//! whose prefix matches the request target is invoked with the prefix
//! stripped from the working path, so handlers can be written
//! prefix-agnostic. Sibling layers always match against the unstripped
//! path, and `original_path` preserves the target as the client sent it.
//!
//! Dispatch runs on two channels. A handler error moves the request onto
//! the error channel: normal layers are skipped until an error-aware layer
//! consumes the error (resuming normal dispatch) or the registry is
//! exhausted, at which point the surviving error reaches the [`Terminal`]
//! finalizer.
//!
//! ```text
//!   request ──▶ next layer ◀────────────────────────────┐
//!                   │                                   │
//!          prefix match? ── no ── skip ─────────────────┤
//!                   │ yes                               │
//!          strip prefix, invoke handler                 │
//!          (normal layers only without an active error, │
//!           error-aware layers only with one)           │
//!                   │                                   │
//!          Ok(Continue) ────────────────────────────────┤
//!          Err(e) ── error channel ─────────────────────┤
//!          Ok(Halt)                           registry exhausted
//!                   │                                   │
//!                   ▼                                   ▼
//!               Finalized                      Terminal finalizer
//! ```

pub mod app;
pub mod handler;
pub mod matcher;
pub mod terminal;

pub use app::{App, Layer};
pub use handler::{ErrorHandler, Flow, Handler, Inline, InlineError, Outcome};
pub use terminal::{ErrorHook, Terminal};
