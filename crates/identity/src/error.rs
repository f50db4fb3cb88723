/// Kind registration failures.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IdentityError {
	/// Every id representable above `base` has been handed out.
	#[error("kind id space exhausted (base {base})")]
	Exhausted { base: u32 },
}
