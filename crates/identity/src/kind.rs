use std::any::TypeId;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

/// Dense integer identity of a registered [`ComponentKind`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct KindId(pub u32);

impl KindId {
	/// Returns the raw integer.
	#[inline]
	pub const fn get(self) -> u32 {
		self.0
	}
}

impl fmt::Display for KindId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}", self.0)
	}
}

impl From<KindId> for u32 {
	fn from(id: KindId) -> Self {
		id.0
	}
}

/// What a kind is identified by inside the registry.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub(crate) enum KindKey {
	/// A Rust type.
	Type(TypeId),
	/// A kind declared at runtime under a unique name.
	Named(Arc<str>),
}

/// A declared component type.
///
/// Kinds compare by identity only: two kinds built from the same Rust type, or
/// from the same runtime name, are the same kind. The display name is carried
/// for diagnostics and plays no part in equality.
#[derive(Clone)]
pub struct ComponentKind {
	key: KindKey,
	name: Arc<str>,
}

impl ComponentKind {
	/// Kind identified by the Rust type `T`.
	pub fn of<T: ?Sized + 'static>() -> Self {
		let full = std::any::type_name::<T>();
		Self {
			key: KindKey::Type(TypeId::of::<T>()),
			name: Arc::from(short_type_name(full)),
		}
	}

	/// Kind identified by a runtime name.
	///
	/// Used for components that have no dedicated Rust type, such as inline
	/// composites assembled from closures.
	pub fn named(name: impl Into<Arc<str>>) -> Self {
		let name = name.into();
		Self {
			key: KindKey::Named(Arc::clone(&name)),
			name,
		}
	}

	/// Human-readable name.
	pub fn name(&self) -> &str {
		&self.name
	}

	pub(crate) fn key(&self) -> &KindKey {
		&self.key
	}

	pub(crate) fn name_arc(&self) -> Arc<str> {
		Arc::clone(&self.name)
	}
}

impl PartialEq for ComponentKind {
	fn eq(&self, other: &Self) -> bool {
		self.key == other.key
	}
}

impl Eq for ComponentKind {}

impl Hash for ComponentKind {
	fn hash<H: Hasher>(&self, state: &mut H) {
		self.key.hash(state);
	}
}

impl fmt::Debug for ComponentKind {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_tuple("ComponentKind").field(&self.name).finish()
	}
}

impl fmt::Display for ComponentKind {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.name)
	}
}

/// Strips module paths from a type name, keeping generic arguments intact.
///
/// `loom::widget::Text` becomes `Text`, `a::Wrap<b::Inner>` becomes
/// `Wrap<b::Inner>`.
fn short_type_name(full: &str) -> &str {
	let head = full.split('<').next().unwrap_or(full);
	match head.rfind("::") {
		Some(pos) => &full[pos + 2..],
		None => full,
	}
}
