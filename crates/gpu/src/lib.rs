pub mod lighting;
pub mod mesh_batch;
pub mod renderer;

pub use lighting::*;
pub use mesh_batch::*;
pub use renderer::*;
