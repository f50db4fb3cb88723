//! The kind registry.
//!
//! # Invariants
//!
//! - Ids are allocated in order of first use, starting at the registry base.
//! - An id, once handed out, always maps to the same kind and is never reused.
//! - Check-then-insert runs under a single lock, so concurrent first uses of
//!   one kind observe the same id.

use std::sync::{Arc, LazyLock};

use parking_lot::Mutex;
use rustc_hash::FxHashMap;

use crate::kind::KindKey;
use crate::{ComponentKind, IdentityError, KindId};

static GLOBAL: LazyLock<KindRegistry> = LazyLock::new(KindRegistry::new);

/// Default first id handed out by [`KindRegistry::new`].
pub const DEFAULT_BASE: u32 = 1;

struct State {
	ids: FxHashMap<KindKey, KindId>,
	/// Display names indexed by `id - base`.
	names: Vec<Arc<str>>,
	next: Option<u32>,
}

/// Append-only map from component kinds to dense ids.
pub struct KindRegistry {
	base: u32,
	state: Mutex<State>,
}

impl KindRegistry {
	/// Creates an empty registry that starts numbering at 1.
	pub fn new() -> Self {
		Self::with_base(DEFAULT_BASE)
	}

	/// Creates an empty registry that starts numbering at `base`.
	pub fn with_base(base: u32) -> Self {
		Self {
			base,
			state: Mutex::new(State {
				ids: FxHashMap::default(),
				names: Vec::new(),
				next: Some(base),
			}),
		}
	}

	/// The process-wide registry.
	///
	/// Lives for the rest of the process and is never reset.
	pub fn global() -> &'static KindRegistry {
		&GLOBAL
	}

	/// Returns the id of `kind`, registering it on first use.
	pub fn id_of(&self, kind: &ComponentKind) -> Result<KindId, IdentityError> {
		let mut state = self.state.lock();
		if let Some(&id) = state.ids.get(kind.key()) {
			return Ok(id);
		}

		let raw = state.next.ok_or(IdentityError::Exhausted { base: self.base })?;
		state.next = raw.checked_add(1);

		let id = KindId(raw);
		state.ids.insert(kind.key().clone(), id);
		state.names.push(kind.name_arc());
		tracing::trace!(kind = %kind, id = raw, "registered component kind");
		Ok(id)
	}

	/// Returns the id of `kind` without registering it.
	pub fn get(&self, kind: &ComponentKind) -> Option<KindId> {
		self.state.lock().ids.get(kind.key()).copied()
	}

	/// Returns the display name of a registered id.
	pub fn name_of(&self, id: KindId) -> Option<Arc<str>> {
		let index = id.0.checked_sub(self.base)? as usize;
		self.state.lock().names.get(index).cloned()
	}

	/// First id this registry hands out.
	pub fn base(&self) -> u32 {
		self.base
	}

	/// Number of registered kinds.
	pub fn len(&self) -> usize {
		self.state.lock().names.len()
	}

	/// Returns true if no kind has been registered yet.
	pub fn is_empty(&self) -> bool {
		self.len() == 0
	}
}

impl Default for KindRegistry {
	fn default() -> Self {
		Self::new()
	}
}

impl std::fmt::Debug for KindRegistry {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("KindRegistry")
			.field("base", &self.base)
			.field("len", &self.len())
			.finish()
	}
}
