//! Duplicate sibling keys found during a walk.

use std::panic::Location;

use loom_identity::{ComponentKind, KindId};

/// A composition boundary on the way from the root to a collision.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoundaryFrame {
	pub kind: ComponentKind,
	pub kind_id: KindId,
	pub source: &'static Location<'static>,
}

/// One node whose local token was already used in its scope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollisionRecord {
	/// The repeated local token.
	pub token: String,
	/// The global key both nodes ended up with.
	pub global_key: String,
	/// Kind of the node that repeated the token.
	pub kind: ComponentKind,
	pub kind_id: KindId,
	/// Path prefix of the scope the collision happened in.
	pub scope_path: String,
	/// Enclosing boundaries, root first. The last entry owns the scope.
	pub chain: Vec<BoundaryFrame>,
}

/// Every collision of one walk, in traversal order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CollisionReport {
	records: Vec<CollisionRecord>,
}

impl CollisionReport {
	pub(crate) fn push(&mut self, record: CollisionRecord) {
		self.records.push(record);
	}

	pub fn records(&self) -> &[CollisionRecord] {
		&self.records
	}

	pub fn iter(&self) -> std::slice::Iter<'_, CollisionRecord> {
		self.records.iter()
	}

	pub fn len(&self) -> usize {
		self.records.len()
	}

	pub fn is_empty(&self) -> bool {
		self.records.is_empty()
	}
}

impl IntoIterator for CollisionReport {
	type Item = CollisionRecord;
	type IntoIter = std::vec::IntoIter<CollisionRecord>;

	fn into_iter(self) -> Self::IntoIter {
		self.records.into_iter()
	}
}

impl<'a> IntoIterator for &'a CollisionReport {
	type Item = &'a CollisionRecord;
	type IntoIter = std::slice::Iter<'a, CollisionRecord>;

	fn into_iter(self) -> Self::IntoIter {
		self.records.iter()
	}
}
