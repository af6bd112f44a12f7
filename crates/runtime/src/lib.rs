pub mod easing;
pub mod flight;
pub mod frame;

pub use easing::*;
pub use flight::*;
pub use frame::*;
