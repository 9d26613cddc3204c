pub mod material;
pub mod transform;

pub use material::*;
pub use transform::*;
