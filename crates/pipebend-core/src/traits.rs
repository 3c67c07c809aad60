use crate::error::Result;

/// Validate structural integrity of a fabricated pipe or one of its members.
pub trait Validate {
    fn validate(&self) -> Result<()>;
}
