//! Local key tokens.

use std::borrow::Cow;

use loom_identity::{IdentityError, KindId, KindRegistry};

use crate::Node;

/// Renders the key fragment a node contributes before path prefixing.
///
/// A node with an author key yields the bracketed key; any other node yields the
/// decimal id of its kind.
pub fn local_token(node: &Node, kinds: &KindRegistry) -> Result<String, IdentityError> {
	match node.author_key() {
		Some(key) => Ok(bracket(key).into_owned()),
		None => Ok(kinds.id_of(node.kind())?.to_string()),
	}
}

/// [`local_token`] for a node whose kind id is already known.
pub(crate) fn token_with_id(node: &Node, id: KindId) -> String {
	match node.author_key() {
		Some(key) => bracket(key).into_owned(),
		None => id.to_string(),
	}
}

/// Wraps `key` in brackets unless it already is wrapped.
///
/// Bracketing keeps author keys apart from the purely numeric kind-id tokens.
pub fn bracket(key: &str) -> Cow<'_, str> {
	if key.len() >= 2 && key.starts_with('[') && key.ends_with(']') {
		Cow::Borrowed(key)
	} else {
		Cow::Owned(format!("[{key}]"))
	}
}
