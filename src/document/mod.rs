pub mod artifact;
pub mod model;
pub mod serializer;

pub use model::*;
pub use serializer::*;
