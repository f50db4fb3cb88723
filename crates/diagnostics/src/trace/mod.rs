//! Stack-trace capture and trimming for diagnostic events.
//!
//! Traces are captured with [`std::backtrace::Backtrace`], rendered, and parsed
//! back into [`Frame`]s so that a [`StackTracePolicy`] can drop and rank them by
//! substring patterns.

use std::backtrace::Backtrace;
use std::fmt;

use crate::{ComponentsLogger, DiagnosticsConfig};

/// Marker prepended to frames that matched a keyword.
const KEYWORD_MARKER: &str = "> ";

/// One frame of a captured stack trace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
	/// Demangled symbol name.
	pub symbol: String,
	/// `file:line:col`, when debug info is available.
	pub location: Option<String>,
}

impl Frame {
	fn matches(&self, pattern: &str) -> bool {
		self.symbol.contains(pattern) || self.location.as_deref().is_some_and(|loc| loc.contains(pattern))
	}

	fn matches_any(&self, patterns: &[String]) -> bool {
		patterns.iter().any(|p| !p.is_empty() && self.matches(p))
	}
}

impl fmt::Display for Frame {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match &self.location {
			Some(location) => write!(f, "{} at {}", self.symbol, location),
			None => f.write_str(&self.symbol),
		}
	}
}

/// A parsed stack trace.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StackTrace {
	frames: Vec<Frame>,
}

impl StackTrace {
	/// Captures the current thread's stack, regardless of `RUST_BACKTRACE`.
	///
	/// Yields an empty trace on platforms without unwinding support.
	pub fn capture() -> Self {
		Self::parse(&Backtrace::force_capture().to_string())
	}

	/// Parses the textual rendering of a [`Backtrace`].
	///
	/// Frame lines look like `  3: crate::module::function`, optionally followed by
	/// an `at path:line:col` line. Anything else is ignored.
	pub fn parse(text: &str) -> Self {
		let mut frames: Vec<Frame> = Vec::new();
		for line in text.lines().map(str::trim) {
			if let Some(location) = line.strip_prefix("at ") {
				if let Some(frame) = frames.last_mut()
					&& frame.location.is_none()
				{
					frame.location = Some(location.to_string());
				}
				continue;
			}

			let Some((index, symbol)) = line.split_once(": ") else {
				continue;
			};
			if !index.is_empty() && index.bytes().all(|b| b.is_ascii_digit()) {
				frames.push(Frame {
					symbol: symbol.to_string(),
					location: None,
				});
			}
		}
		Self { frames }
	}

	pub fn frames(&self) -> &[Frame] {
		&self.frames
	}

	pub fn is_empty(&self) -> bool {
		self.frames.is_empty()
	}
}

impl FromIterator<Frame> for StackTrace {
	fn from_iter<I: IntoIterator<Item = Frame>>(iter: I) -> Self {
		Self {
			frames: iter.into_iter().collect(),
		}
	}
}

/// Decides which frames of a trace are attached to an event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StackTracePolicy {
	/// Frames matching any of these are dropped outright.
	pub blacklist: Vec<String>,
	/// Frames matching any of these survive trimming first.
	pub keywords: Vec<String>,
	/// Maximum number of frames in the rendered trace.
	pub max_frames: usize,
}

impl Default for StackTracePolicy {
	fn default() -> Self {
		Self::from_config(&DiagnosticsConfig::default())
	}
}

impl StackTracePolicy {
	/// Policy built from configuration alone.
	pub fn from_config(config: &DiagnosticsConfig) -> Self {
		Self {
			blacklist: config.blacklist.clone(),
			keywords: config.keywords.clone(),
			max_frames: config.max_frames,
		}
	}

	/// Policy built from configuration plus the lists a logger supplies.
	pub fn from_parts(config: &DiagnosticsConfig, logger: &dyn ComponentsLogger) -> Self {
		let mut policy = Self::from_config(config);
		merge_unique(&mut policy.blacklist, logger.key_collision_stack_trace_blacklist());
		merge_unique(&mut policy.keywords, logger.key_collision_stack_trace_keywords());
		policy
	}

	/// Renders the frames of `trace` that survive this policy.
	///
	/// Returns `None` when nothing is left to show.
	pub fn filter(&self, trace: &StackTrace) -> Option<String> {
		let kept: Vec<&Frame> = trace.frames().iter().filter(|f| !f.matches_any(&self.blacklist)).collect();
		if kept.is_empty() || self.max_frames == 0 {
			return None;
		}

		let highlighted: Vec<bool> = kept.iter().map(|f| f.matches_any(&self.keywords)).collect();
		let mut selected = vec![kept.len() <= self.max_frames; kept.len()];
		if kept.len() > self.max_frames {
			let mut budget = self.max_frames;
			for (slot, _) in highlighted.iter().enumerate().filter(|(_, hit)| **hit) {
				if budget == 0 {
					break;
				}
				selected[slot] = true;
				budget -= 1;
			}
			for keep in selected.iter_mut().filter(|keep| !**keep) {
				if budget == 0 {
					break;
				}
				*keep = true;
				budget -= 1;
			}
		}

		let mut out = String::new();
		for ((frame, hit), _) in kept.iter().zip(&highlighted).zip(&selected).filter(|(_, keep)| **keep) {
			out.push('\t');
			if *hit {
				out.push_str(KEYWORD_MARKER);
			}
			out.push_str(&frame.to_string());
			out.push('\n');
		}
		Some(out)
	}
}

fn merge_unique(into: &mut Vec<String>, extra: Vec<String>) {
	for pattern in extra {
		if !into.contains(&pattern) {
			into.push(pattern);
		}
	}
}
