pub mod camera;
pub mod controller;
pub mod pointer;
pub mod snapshot;
pub mod state;

pub use camera::*;
pub use controller::*;
pub use pointer::*;
pub use snapshot::*;
pub use state::*;
