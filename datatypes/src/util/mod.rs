mod identifiers;
mod result;

pub use self::identifiers::{IdAllocator, LocalIdentifier};
pub use result::Result;
