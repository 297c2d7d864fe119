pub mod events;
pub mod graph;
pub mod playback;
pub mod ports;
pub mod solver;

pub use events::*;
pub use graph::*;
pub use playback::*;
pub use ports::*;
pub use solver::*;
