use std::collections::BTreeMap;
use std::fmt;

/// Human-readable description of the problem.
pub const PARAM_MESSAGE: &str = "message";
/// Filtered stack trace captured where the problem was detected.
pub const PARAM_STACK_TRACE: &str = "stack_trace";
/// The local key token that collided.
pub const PARAM_COLLISION_TOKEN: &str = "collision_token";

/// Classification of a diagnostic event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
	/// An authoring error the developer should fix.
	Error,
	/// Something suspicious that does not break resolution.
	Warning,
}

impl EventKind {
	pub fn as_str(self) -> &'static str {
		match self {
			Self::Error => "error",
			Self::Warning => "warning",
		}
	}
}

impl fmt::Display for EventKind {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

/// A diagnostic event handed to a [`ComponentsLogger`](crate::ComponentsLogger).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEvent {
	kind: EventKind,
	params: BTreeMap<String, String>,
}

impl LogEvent {
	/// Creates an event with no parameters.
	pub fn new(kind: EventKind) -> Self {
		Self {
			kind,
			params: BTreeMap::new(),
		}
	}

	/// Sets a parameter, replacing any previous value.
	pub fn add_param(&mut self, name: impl Into<String>, value: impl Into<String>) -> &mut Self {
		self.params.insert(name.into(), value.into());
		self
	}

	/// Builder form of [`add_param`](Self::add_param).
	pub fn with_param(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
		self.add_param(name, value);
		self
	}

	pub fn kind(&self) -> EventKind {
		self.kind
	}

	pub fn param(&self, name: &str) -> Option<&str> {
		self.params.get(name).map(String::as_str)
	}

	/// The [`PARAM_MESSAGE`] parameter.
	pub fn message(&self) -> Option<&str> {
		self.param(PARAM_MESSAGE)
	}

	/// The [`PARAM_STACK_TRACE`] parameter.
	pub fn stack_trace(&self) -> Option<&str> {
		self.param(PARAM_STACK_TRACE)
	}

	/// Parameters in name order.
	pub fn params(&self) -> impl Iterator<Item = (&str, &str)> {
		self.params.iter().map(|(k, v)| (k.as_str(), v.as_str()))
	}
}
