use loom_identity::IdentityError;

/// Why a tree could not be resolved.
///
/// Duplicate keys are not errors; they are reported through
/// [`CollisionReport`](crate::CollisionReport).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ResolveError {
	/// A node was reached again while it was still being walked.
	#[error("cycle through {kind} at {path}")]
	Cycle { kind: String, path: String },

	/// A node claims to be both a synthesized wrapper and a composition boundary.
	#[error("{kind} is flagged both synthesized and boundary")]
	ContradictoryFlags { kind: String },

	/// The tree is deeper than the configured limit.
	#[error("tree exceeds maximum depth of {limit}")]
	TooDeep { limit: usize },

	#[error(transparent)]
	Identity(#[from] IdentityError),
}

pub type Result<T, E = ResolveError> = std::result::Result<T, E>;
