//! Resolved trees.

use std::panic::Location;

use loom_identity::{ComponentKind, KindId};

use crate::NodeFlags;

/// A node of one resolved tree, mirroring an authored [`Node`](crate::Node).
///
/// Built fresh by every walk. Composite boundaries appear with the sub-tree
/// their configuration produced during that walk.
#[derive(Debug, Clone)]
pub struct OutputNode {
	pub(crate) kind: ComponentKind,
	pub(crate) kind_id: KindId,
	pub(crate) author_key: Option<String>,
	pub(crate) flags: NodeFlags,
	pub(crate) global_key: Option<String>,
	pub(crate) source: &'static Location<'static>,
	pub(crate) children: Vec<OutputNode>,
}

impl OutputNode {
	pub fn kind(&self) -> &ComponentKind {
		&self.kind
	}

	pub fn kind_id(&self) -> KindId {
		self.kind_id
	}

	pub fn author_key(&self) -> Option<&str> {
		self.author_key.as_deref()
	}

	pub fn flags(&self) -> NodeFlags {
		self.flags
	}

	pub fn is_synthesized(&self) -> bool {
		self.flags.contains(NodeFlags::SYNTHESIZED)
	}

	pub fn is_boundary(&self) -> bool {
		self.flags.contains(NodeFlags::BOUNDARY)
	}

	/// The path-qualified identity; `None` for synthesized wrappers.
	pub fn global_key(&self) -> Option<&str> {
		self.global_key.as_deref()
	}

	pub fn source(&self) -> &'static Location<'static> {
		self.source
	}

	pub fn children(&self) -> &[OutputNode] {
		&self.children
	}

	/// Pre-order iterator over this node and all its descendants.
	pub fn iter(&self) -> Iter<'_> {
		Iter { stack: vec![self] }
	}

	/// First node in pre-order whose global key equals `key`.
	pub fn find(&self, key: &str) -> Option<&OutputNode> {
		self.iter().find(|node| node.global_key() == Some(key))
	}

	/// Every global key in pre-order. Wrappers are skipped.
	pub fn keys(&self) -> Vec<&str> {
		self.iter().filter_map(OutputNode::global_key).collect()
	}
}

impl<'a> IntoIterator for &'a OutputNode {
	type Item = &'a OutputNode;
	type IntoIter = Iter<'a>;

	fn into_iter(self) -> Self::IntoIter {
		self.iter()
	}
}

/// Pre-order traversal of an [`OutputNode`] tree.
pub struct Iter<'a> {
	stack: Vec<&'a OutputNode>,
}

impl<'a> Iterator for Iter<'a> {
	type Item = &'a OutputNode;

	fn next(&mut self) -> Option<Self::Item> {
		let node = self.stack.pop()?;
		self.stack.extend(node.children.iter().rev());
		Some(node)
	}
}
