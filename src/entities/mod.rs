pub mod balloon;
pub mod building;
pub mod firework;
pub mod flower;
pub mod sky;
pub mod tree;

pub use balloon::Balloon;
pub use building::Building;
pub use firework::{Firework, FireworkParams};
pub use flower::Flower;
pub use sky::{Sky, SkyParams};
pub use tree::Tree;
