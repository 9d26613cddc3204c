pub mod icosahedron;

pub use icosahedron::*;
