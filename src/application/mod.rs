pub mod pass_route_service;
pub mod playback_driver;

pub use pass_route_service::*;
pub use playback_driver::*;
