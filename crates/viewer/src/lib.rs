pub mod config;
pub mod scroll;
pub mod status;
pub mod viewer;
pub mod viewport;

pub use config::*;
pub use scroll::*;
pub use status::*;
pub use viewer::*;
pub use viewport::*;
