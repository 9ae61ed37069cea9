pub mod icons;
pub mod number;
mod result;
pub mod string_token;

pub use result::Result;
