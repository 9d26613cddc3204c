pub mod camera;
pub mod components;
pub mod controls;
pub mod lights;
pub mod mesh;
pub mod model;
pub mod normalize;
pub mod prefabs;
pub mod world;

pub use camera::*;
pub use controls::*;
pub use lights::*;
pub use mesh::*;
pub use model::*;
pub use normalize::*;
pub use world::*;
