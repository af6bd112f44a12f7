pub mod arena;
pub mod math;
pub mod time;

// Foundation crate: small, well-tested primitives only.
pub use arena::*;
pub use time::*;
