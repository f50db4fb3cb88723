//! Stable global keys for declarative component trees.
//!
//! Two independently built trees that describe the same UI must be matchable
//! node for node. [`KeyResolver`] walks an authored [`Node`] tree and returns an
//! [`OutputNode`] tree in which every node carries a global key derived purely
//! from tree shape and author intent: the local tokens of its enclosing
//! composition boundaries followed by its own token, where a token is the
//! bracketed author key or the decimal id of the node's kind.
//!
//! ```
//! use loom_identity::{ComponentKind, KindRegistry};
//! use loom_keys::{KeyResolver, Node};
//!
//! let kinds = KindRegistry::new();
//! let feed = Node::boundary(ComponentKind::named("Feed"))
//! 	.child(Node::primitive(ComponentKind::named("Text")).key("title"))
//! 	.child(Node::primitive(ComponentKind::named("Image")))
//! 	.build();
//!
//! let resolved = KeyResolver::new(&kinds).resolve(&feed).unwrap();
//! assert_eq!(resolved.root.keys(), ["1", "1[title]", "13"]);
//! assert!(resolved.collisions.is_empty());
//! ```
//!
//! Sibling nodes that end up with the same token are not an error. They are
//! collected into a [`CollisionReport`] and, when a [`CollisionReporter`] is
//! attached, logged through a [`ComponentsLogger`](loom_diagnostics::ComponentsLogger).

mod collision;
mod config;
mod error;
mod node;
mod output;
mod report;
mod scope;
mod token;
mod walk;

pub use collision::{BoundaryFrame, CollisionRecord, CollisionReport};
pub use config::KeysConfig;
pub use error::{ResolveError, Result};
pub use node::{Compose, Node, NodeBuilder, NodeFlags};
pub use output::{Iter, OutputNode};
pub use report::{CollisionReporter, message_for};
pub use scope::ScopeTracker;
pub use token::{bracket, local_token};
pub use walk::{KeyResolver, Resolution, ResolveOptions, resolve};
