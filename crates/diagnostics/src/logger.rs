use tracing::{error, warn};

use crate::{EventKind, LogError, LogEvent};

/// Sink for diagnostic events.
///
/// Implementations must be cheap to call and may fail; callers treat failures
/// as non-fatal.
pub trait ComponentsLogger: Send + Sync {
	/// Emits one event.
	fn log(&self, event: LogEvent) -> Result<(), LogError>;

	/// Stack-frame patterns that must never appear in a key collision trace.
	fn key_collision_stack_trace_blacklist(&self) -> Vec<String> {
		Vec::new()
	}

	/// Stack-frame patterns to keep when a key collision trace is trimmed.
	fn key_collision_stack_trace_keywords(&self) -> Vec<String> {
		Vec::new()
	}
}

/// Logger that forwards events to `tracing`.
#[derive(Debug, Clone, Default)]
pub struct TracingLogger {
	blacklist: Vec<String>,
	keywords: Vec<String>,
}

impl TracingLogger {
	pub fn new() -> Self {
		Self::default()
	}

	/// Frame patterns reported through
	/// [`ComponentsLogger::key_collision_stack_trace_blacklist`].
	pub fn blacklist<I, S>(mut self, patterns: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		self.blacklist = patterns.into_iter().map(Into::into).collect();
		self
	}

	/// Frame patterns reported through
	/// [`ComponentsLogger::key_collision_stack_trace_keywords`].
	pub fn keywords<I, S>(mut self, patterns: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		self.keywords = patterns.into_iter().map(Into::into).collect();
		self
	}
}

impl ComponentsLogger for TracingLogger {
	fn log(&self, event: LogEvent) -> Result<(), LogError> {
		let message = event.message().unwrap_or_default();
		let stack_trace = event.stack_trace();
		match event.kind() {
			EventKind::Error => error!(target: "loom::diagnostics", stack_trace, "{message}"),
			EventKind::Warning => warn!(target: "loom::diagnostics", stack_trace, "{message}"),
		}
		Ok(())
	}

	fn key_collision_stack_trace_blacklist(&self) -> Vec<String> {
		self.blacklist.clone()
	}

	fn key_collision_stack_trace_keywords(&self) -> Vec<String> {
		self.keywords.clone()
	}
}
