//! Diagnostics plumbing for key resolution.
//!
//! The resolver never logs authoring errors itself. It builds [`LogEvent`]s and
//! hands them to a [`ComponentsLogger`] supplied by the embedder. This crate
//! defines that contract, a [`TracingLogger`] default, and the
//! [`StackTracePolicy`] that decides which captured frames end up in an event.

mod config;
mod error;
mod event;
mod logger;
mod trace;

pub use config::DiagnosticsConfig;
pub use error::{ConfigError, LogError};
pub use event::{EventKind, LogEvent, PARAM_COLLISION_TOKEN, PARAM_MESSAGE, PARAM_STACK_TRACE};
pub use logger::{ComponentsLogger, TracingLogger};
pub use trace::{Frame, StackTrace, StackTracePolicy};
