mod error;

pub use error::Error;
pub use error::ReferenceKind;
pub use error::Result;
