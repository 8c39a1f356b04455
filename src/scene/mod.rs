pub mod director;
pub mod phase;
pub mod snapshot;

pub use director::SceneDirector;
pub use phase::ScenePhase;
pub use snapshot::SceneSnapshot;
