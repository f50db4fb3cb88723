//! Global key resolution.
//!
//! # Role
//!
//! Walks an authored tree pre-order and produces a fresh [`OutputNode`] tree in
//! which every node that is not a synthesized wrapper carries a global key:
//! the local tokens of its enclosing composition boundaries, root first,
//! followed by its own local token.
//!
//! # Invariants
//!
//! - The authored tree is never modified; keys exist only on the output.
//! - Structural groups and synthesized wrappers add nothing to the path and open
//!   no collision scope.
//! - A repeated token within one scope is recorded and logged, never fatal; both
//!   nodes keep the same global key. Nodes flagged
//!   [`NodeFlags::UNCHECKED`] are keyed but never observed.
//! - The walk uses an explicit stack, so tree depth is bounded only by
//!   [`ResolveOptions::max_depth`].

use std::mem;
use std::sync::Arc;

use loom_identity::{KindId, KindRegistry};
use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};
use tracing::{debug, debug_span, trace};

use crate::collision::{BoundaryFrame, CollisionRecord, CollisionReport};
use crate::error::{ResolveError, Result};
use crate::output::OutputNode;
use crate::report::CollisionReporter;
use crate::scope::ScopeTracker;
use crate::token::token_with_id;
use crate::{Node, NodeFlags};

fn default_max_depth() -> usize {
	4096
}

/// Tuning for a [`KeyResolver`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ResolveOptions {
	/// Deepest tree, in nodes from the root, that resolves successfully.
	/// Guards against composites that keep producing fresh sub-trees.
	#[serde(default = "default_max_depth")]
	pub max_depth: usize,
}

impl Default for ResolveOptions {
	fn default() -> Self {
		Self {
			max_depth: default_max_depth(),
		}
	}
}

/// Result of one walk.
#[derive(Debug, Clone)]
pub struct Resolution {
	pub root: OutputNode,
	pub collisions: CollisionReport,
}

/// Assigns global keys to authored trees.
pub struct KeyResolver<'r> {
	kinds: &'r KindRegistry,
	options: ResolveOptions,
	reporter: Option<CollisionReporter>,
}

impl KeyResolver<'static> {
	/// Resolver backed by the process-wide kind registry.
	pub fn global() -> Self {
		Self::new(KindRegistry::global())
	}
}

impl<'r> KeyResolver<'r> {
	pub fn new(kinds: &'r KindRegistry) -> Self {
		Self {
			kinds,
			options: ResolveOptions::default(),
			reporter: None,
		}
	}

	pub fn options(mut self, options: ResolveOptions) -> Self {
		self.options = options;
		self
	}

	/// Hands every non-empty collision report to `reporter` once a walk completes.
	pub fn reporter(mut self, reporter: CollisionReporter) -> Self {
		self.reporter = Some(reporter);
		self
	}

	/// Resolves `root` into a keyed output tree.
	///
	/// Fails only when the tree itself is malformed: a cycle, a node with
	/// contradictory flags, excessive depth, or an exhausted kind registry.
	pub fn resolve(&self, root: &Arc<Node>) -> Result<Resolution> {
		let _span = debug_span!("resolve_keys", root = %root.kind()).entered();

		let mut walk = Walk::new(self.kinds, self.options.max_depth);
		let mut root_frame = walk.enter(root, 1)?;
		let mut stack: Vec<Frame> = Vec::new();

		loop {
			let top = match stack.last_mut() {
				Some(frame) => frame,
				None => &mut root_frame,
			};
			if let Some(child) = top.pending.next() {
				let frame = walk.enter(&child, stack.len() + 2)?;
				stack.push(frame);
				continue;
			}

			let Some(done) = stack.pop() else {
				break;
			};
			walk.leave(&done);
			let parent = match stack.last_mut() {
				Some(frame) => frame,
				None => &mut root_frame,
			};
			parent.output.children.push(done.output);
		}
		walk.leave(&root_frame);

		let collisions = walk.report;
		debug!(keyed = walk.keyed, collisions = collisions.len(), "resolved global keys");

		if let Some(reporter) = &self.reporter
			&& !collisions.is_empty()
		{
			reporter.report(&collisions);
		}

		Ok(Resolution {
			root: root_frame.output,
			collisions,
		})
	}
}

/// Resolves `root` against the process-wide kind registry with default options.
pub fn resolve(root: &Arc<Node>) -> Result<Resolution> {
	KeyResolver::global().resolve(root)
}

/// A node whose children are still being walked.
struct Frame {
	/// Held until `leave`, so its address cannot be handed to a freshly
	/// composed node while it is still on the active path.
	node: Arc<Node>,
	output: OutputNode,
	pending: std::vec::IntoIter<Arc<Node>>,
	opened_scope: bool,
}

impl Frame {
	fn ptr(&self) -> usize {
		node_ptr(&self.node)
	}
}

fn node_ptr(node: &Arc<Node>) -> usize {
	Arc::as_ptr(node) as usize
}

/// Walk-local state. Never shared between walks.
struct Walk<'r> {
	kinds: &'r KindRegistry,
	max_depth: usize,
	/// Scope of the nearest enclosing boundary.
	scope: ScopeTracker,
	/// Scopes of the boundaries above `scope`.
	outer: Vec<ScopeTracker>,
	/// Boundaries that own `outer[1..]` and `scope`, root first.
	chain: Vec<BoundaryFrame>,
	/// Nodes on the path from the root to the current node.
	active: FxHashSet<usize>,
	report: CollisionReport,
	keyed: usize,
}

impl<'r> Walk<'r> {
	fn new(kinds: &'r KindRegistry, max_depth: usize) -> Self {
		Self {
			kinds,
			max_depth,
			scope: ScopeTracker::new(String::new()),
			outer: Vec::new(),
			chain: Vec::new(),
			active: FxHashSet::default(),
			report: CollisionReport::default(),
			keyed: 0,
		}
	}

	fn enter(&mut self, node: &Arc<Node>, depth: usize) -> Result<Frame> {
		if depth > self.max_depth {
			return Err(ResolveError::TooDeep {
				limit: self.max_depth,
			});
		}
		if node.flags().contains(NodeFlags::BOUNDARY | NodeFlags::SYNTHESIZED) {
			return Err(ResolveError::ContradictoryFlags {
				kind: node.kind().to_string(),
			});
		}

		if !self.active.insert(node_ptr(node)) {
			return Err(ResolveError::Cycle {
				kind: node.kind().to_string(),
				path: self.trail(),
			});
		}

		let kind_id = self.kinds.id_of(node.kind())?;
		let global_key = if node.is_synthesized() {
			None
		} else {
			Some(self.key(node, kind_id))
		};

		// The root always opens a scope, whatever its flags say.
		let opened_scope = match &global_key {
			Some(key) if node.is_boundary() || depth == 1 => {
				let parent = mem::replace(&mut self.scope, ScopeTracker::new(key.clone()));
				self.outer.push(parent);
				self.chain.push(BoundaryFrame {
					kind: node.kind().clone(),
					kind_id,
					source: node.source(),
				});
				true
			}
			_ => false,
		};

		Ok(Frame {
			node: Arc::clone(node),
			output: OutputNode {
				kind: node.kind().clone(),
				kind_id,
				author_key: node.author_key().map(str::to_owned),
				flags: node.flags(),
				global_key,
				source: node.source(),
				children: Vec::new(),
			},
			pending: node.expand().into_iter(),
			opened_scope,
		})
	}

	/// Computes the global key of a keyable node and records collisions.
	fn key(&mut self, node: &Node, kind_id: KindId) -> String {
		let token = token_with_id(node, kind_id);
		let global_key = format!("{}{}", self.scope.path(), token);
		self.keyed += 1;

		if !node.is_unchecked() && self.scope.observe(&token) {
			debug!(
				kind = %node.kind(),
				token = %token,
				scope = %self.scope.path(),
				"duplicate sibling key"
			);
			self.report.push(CollisionRecord {
				token,
				global_key: global_key.clone(),
				kind: node.kind().clone(),
				kind_id,
				scope_path: self.scope.path().to_owned(),
				chain: self.chain.clone(),
			});
		} else {
			trace!(kind = %node.kind(), key = %global_key, "keyed node");
		}
		global_key
	}

	fn leave(&mut self, frame: &Frame) {
		self.active.remove(&frame.ptr());
		if frame.opened_scope {
			if let Some(parent) = self.outer.pop() {
				self.scope = parent;
			}
			self.chain.pop();
		}
	}

	/// Boundary kinds from the root to the current scope, for error messages.
	fn trail(&self) -> String {
		if self.chain.is_empty() {
			return "<root>".to_string();
		}
		self.chain.iter().map(|frame| frame.kind.name()).collect::<Vec<_>>().join(" > ")
	}
}

#[cfg(test)]
mod tests;
