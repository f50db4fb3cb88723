//! Stable integer identities for component kinds.
//!
//! Every declared component type is assigned a small integer the first time it
//! is seen. Ids are handed out from one monotonically increasing counter per
//! [`KindRegistry`], are never reused and never renumbered. The process-wide
//! instance is [`KindRegistry::global`]; tests and embedders that need
//! isolated numbering construct their own registry and inject it.

mod error;
mod kind;
mod registry;

pub use error::IdentityError;
pub use kind::{ComponentKind, KindId};
pub use registry::{DEFAULT_BASE, KindRegistry};
