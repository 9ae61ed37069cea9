pub mod colors;
pub mod error;
pub mod primitives;
pub mod projection;
pub mod provenance;
pub mod spatial_reference;
pub mod util;
