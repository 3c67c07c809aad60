pub mod error;
pub mod tolerance;
pub mod traits;

pub use error::{DegenerateReason, GeometryError, PipeError, Result};
pub use tolerance::Tolerance;
pub use traits::Validate;
