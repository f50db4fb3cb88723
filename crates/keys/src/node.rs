//! Authored component trees.
//!
//! A [`Node`] is what application code writes down: a component kind, an
//! optional key, and children. Nodes are immutable and shared through `Arc`, so
//! one node may be reused across renders, trees, and even several places of
//! one tree. Nothing computed during a walk is ever stored on a node.

use std::fmt;
use std::panic::Location;
use std::sync::Arc;

use loom_identity::ComponentKind;

bitflags::bitflags! {
	/// Structural role of a node.
	#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
	pub struct NodeFlags: u8 {
		/// The node's own configuration produces its sub-tree. Opens a new
		/// path level and a new collision scope.
		const BOUNDARY = 1 << 0;
		/// Framework-inserted host, such as a background or border. Never keyed
		/// and transparent to paths and scopes.
		const SYNTHESIZED = 1 << 1;
		/// Keyed as usual but never checked for duplicate siblings. Meant for
		/// structural groups whose repetition is not an authoring mistake, such
		/// as the layout columns of a list of cards.
		const UNCHECKED = 1 << 2;
	}
}

/// Configuration logic of a composite component.
///
/// Invoked once per walk when the resolver enters the owning node.
pub trait Compose: Send + Sync {
	fn compose(&self) -> Vec<Arc<Node>>;
}

impl<F> Compose for F
where
	F: Fn() -> Vec<Arc<Node>> + Send + Sync,
{
	fn compose(&self) -> Vec<Arc<Node>> {
		self()
	}
}

/// One authored element of a component tree.
pub struct Node {
	kind: ComponentKind,
	key: Option<String>,
	flags: NodeFlags,
	children: Vec<Arc<Node>>,
	composer: Option<Arc<dyn Compose>>,
	source: &'static Location<'static>,
}

impl Node {
	/// Starts a node with no flags set.
	#[track_caller]
	pub fn builder(kind: ComponentKind) -> NodeBuilder {
		NodeBuilder {
			kind,
			key: None,
			flags: NodeFlags::empty(),
			children: Vec::new(),
			composer: None,
			source: Location::caller(),
		}
	}

	/// A terminal view or drawable.
	#[track_caller]
	pub fn primitive(kind: ComponentKind) -> NodeBuilder {
		Self::builder(kind)
	}

	/// A structural container with no configuration logic of its own.
	#[track_caller]
	pub fn group(kind: ComponentKind) -> NodeBuilder {
		Self::builder(kind)
	}

	/// A composition boundary whose children are authored up front.
	#[track_caller]
	pub fn boundary(kind: ComponentKind) -> NodeBuilder {
		Self::builder(kind).flags(NodeFlags::BOUNDARY)
	}

	/// A composition boundary whose children are produced by `composer`.
	#[track_caller]
	pub fn composite(kind: ComponentKind, composer: impl Compose + 'static) -> NodeBuilder {
		let mut builder = Self::boundary(kind);
		builder.composer = Some(Arc::new(composer));
		builder
	}

	/// A framework-synthesized wrapper.
	#[track_caller]
	pub fn wrapper(kind: ComponentKind) -> NodeBuilder {
		Self::builder(kind).flags(NodeFlags::SYNTHESIZED)
	}

	pub fn kind(&self) -> &ComponentKind {
		&self.kind
	}

	/// The author-supplied key. An empty key counts as no key.
	pub fn author_key(&self) -> Option<&str> {
		self.key.as_deref()
	}

	pub fn flags(&self) -> NodeFlags {
		self.flags
	}

	pub fn is_boundary(&self) -> bool {
		self.flags.contains(NodeFlags::BOUNDARY)
	}

	pub fn is_synthesized(&self) -> bool {
		self.flags.contains(NodeFlags::SYNTHESIZED)
	}

	/// Returns true if the node's token is exempt from collision checks.
	pub fn is_unchecked(&self) -> bool {
		self.flags.contains(NodeFlags::UNCHECKED)
	}

	/// Statically authored children.
	pub fn children(&self) -> &[Arc<Node>] {
		&self.children
	}

	/// Returns true if the sub-tree is produced at walk time.
	pub fn is_composite(&self) -> bool {
		self.composer.is_some()
	}

	/// Where the node was authored.
	pub fn source(&self) -> &'static Location<'static> {
		self.source
	}

	/// Global keys exist only on resolved output; an authored node never has one.
	pub fn global_key(&self) -> Option<&str> {
		None
	}

	/// Children as seen by a walk: static children followed by composed ones.
	pub(crate) fn expand(&self) -> Vec<Arc<Node>> {
		let mut out = self.children.clone();
		if let Some(composer) = &self.composer {
			out.extend(composer.compose());
		}
		out
	}
}

impl fmt::Debug for Node {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Node")
			.field("kind", &self.kind)
			.field("key", &self.key)
			.field("flags", &self.flags)
			.field("composite", &self.is_composite())
			.field("children", &self.children)
			.finish()
	}
}

/// Builder returned by the [`Node`] constructors.
#[must_use]
pub struct NodeBuilder {
	kind: ComponentKind,
	key: Option<String>,
	flags: NodeFlags,
	children: Vec<Arc<Node>>,
	composer: Option<Arc<dyn Compose>>,
	source: &'static Location<'static>,
}

impl NodeBuilder {
	/// Sets the author key.
	pub fn key(mut self, key: impl Into<String>) -> Self {
		let key = key.into();
		self.key = (!key.is_empty()).then_some(key);
		self
	}

	/// Replaces the role flags.
	pub fn flags(mut self, flags: NodeFlags) -> Self {
		self.flags = flags;
		self
	}

	/// Exempts this node from duplicate-sibling checks; see [`NodeFlags::UNCHECKED`].
	pub fn unchecked(mut self) -> Self {
		self.flags |= NodeFlags::UNCHECKED;
		self
	}

	/// Appends one child.
	pub fn child(mut self, child: impl Into<Arc<Node>>) -> Self {
		self.children.push(child.into());
		self
	}

	/// Appends several children.
	pub fn children<I>(mut self, children: I) -> Self
	where
		I: IntoIterator,
		I::Item: Into<Arc<Node>>,
	{
		self.children.extend(children.into_iter().map(Into::into));
		self
	}

	pub fn build(self) -> Arc<Node> {
		Arc::new(Node {
			kind: self.kind,
			key: self.key,
			flags: self.flags,
			children: self.children,
			composer: self.composer,
			source: self.source,
		})
	}
}

impl From<NodeBuilder> for Arc<Node> {
	fn from(builder: NodeBuilder) -> Self {
		builder.build()
	}
}
