pub mod plan;
pub mod route;

pub use plan::*;
pub use route::*;
