pub mod aggregate;
pub mod events;
pub mod roster;
pub mod snapshot;
pub mod types;

pub use aggregate::*;
pub use events::*;
pub use roster::*;
pub use snapshot::*;
pub use types::*;
