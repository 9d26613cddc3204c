pub mod card;
pub mod config;
pub mod parallax;
pub mod project;
pub mod scroll;
pub mod sections;
pub mod state;

pub use card::*;
pub use config::*;
pub use parallax::*;
pub use project::*;
pub use scroll::*;
pub use sections::*;
pub use state::*;
