use rustc_hash::FxHashSet;

/// Tokens already used by the key-bearing children of one composition boundary.
///
/// A scope covers everything the boundary authored directly, including nodes
/// nested in structural groups and synthesized wrappers, but stops at nested
/// boundaries, which open scopes of their own.
#[derive(Debug, Default)]
pub struct ScopeTracker {
	path: String,
	seen: FxHashSet<String>,
}

impl ScopeTracker {
	/// Opens a scope for the boundary whose children are keyed under `path`.
	pub fn new(path: impl Into<String>) -> Self {
		Self {
			path: path.into(),
			seen: FxHashSet::default(),
		}
	}

	/// Records `token`; returns true if it was already used in this scope.
	pub fn observe(&mut self, token: &str) -> bool {
		if self.seen.contains(token) {
			return true;
		}
		self.seen.insert(token.to_owned());
		false
	}

	/// Path prefix shared by every node keyed in this scope.
	pub fn path(&self) -> &str {
		&self.path
	}

	/// Number of distinct tokens observed.
	pub fn len(&self) -> usize {
		self.seen.len()
	}

	pub fn is_empty(&self) -> bool {
		self.seen.is_empty()
	}
}
