//! Turns collision records into logged diagnostics.

use std::fmt::Write as _;
use std::panic::{AssertUnwindSafe, catch_unwind};
use std::sync::Arc;

use loom_diagnostics::{
	ComponentsLogger, DiagnosticsConfig, EventKind, LogEvent, PARAM_COLLISION_TOKEN, PARAM_MESSAGE,
	PARAM_STACK_TRACE, StackTrace, StackTracePolicy,
};
use tracing::warn;

use crate::collision::{BoundaryFrame, CollisionRecord, CollisionReport};

/// Reports duplicate sibling keys to a [`ComponentsLogger`].
///
/// Reporting never fails and never panics outward: a logger error or panic is
/// noted once through `tracing` and dropped.
#[derive(Clone)]
pub struct CollisionReporter {
	logger: Arc<dyn ComponentsLogger>,
	config: DiagnosticsConfig,
}

impl CollisionReporter {
	pub fn new(logger: Arc<dyn ComponentsLogger>) -> Self {
		Self {
			logger,
			config: DiagnosticsConfig::default(),
		}
	}

	pub fn config(mut self, config: DiagnosticsConfig) -> Self {
		self.config = config;
		self
	}

	/// Logs one event per record.
	pub fn report(&self, report: &CollisionReport) {
		if report.is_empty() {
			return;
		}

		let trace = self.capture_trace();
		for record in report {
			let mut event = LogEvent::new(EventKind::Error);
			event.add_param(PARAM_MESSAGE, message_for(record));
			event.add_param(PARAM_COLLISION_TOKEN, record.token.as_str());
			if let Some(trace) = &trace {
				event.add_param(PARAM_STACK_TRACE, trace.as_str());
			}
			self.emit(event);
		}
	}

	/// Captures and filters the current stack, if enabled and anything survives.
	fn capture_trace(&self) -> Option<String> {
		if !self.config.capture_stack_traces {
			return None;
		}
		let policy = StackTracePolicy::from_parts(&self.config, self.logger.as_ref());
		policy.filter(&StackTrace::capture())
	}

	fn emit(&self, event: LogEvent) {
		let logger = &self.logger;
		match catch_unwind(AssertUnwindSafe(|| logger.log(event))) {
			Ok(Ok(())) => {}
			Ok(Err(err)) => warn!(error = %err, "components logger rejected key collision event"),
			Err(_) => warn!("components logger panicked while logging key collision event"),
		}
	}
}

impl std::fmt::Debug for CollisionReporter {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("CollisionReporter").field("config", &self.config).finish_non_exhaustive()
	}
}

/// Developer-facing description of one collision.
pub fn message_for(record: &CollisionRecord) -> String {
	let mut message = format!(
		"Found another {} component with the same key.\n\
		 Please look at the following component hierarchy and make sure all sibling children \
		 components of the same type have unique keys:\n",
		record.kind
	);
	for frame in &record.chain {
		let _ = writeln!(message, "\t{}", describe(frame));
	}
	message
}

fn describe(frame: &BoundaryFrame) -> String {
	let file = frame.source.file();
	let file = file.rsplit(['/', '\\']).next().unwrap_or(file);
	format!("{} ({}:{})", frame.kind, file, frame.source.line())
}
