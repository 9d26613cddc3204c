pub mod error;
pub mod gltf_import;
pub mod loader;
pub mod model_format;
pub mod obj;
pub mod progress;
pub mod resources;

pub use error::*;
pub use gltf_import::*;
pub use loader::*;
pub use model_format::*;
pub use obj::*;
pub use progress::*;
pub use resources::*;
