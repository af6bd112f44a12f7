pub mod city;
pub mod markers;
pub mod picking;
pub mod query;
pub mod regions;
pub mod world;

pub use city::*;
pub use regions::{Region, RegionId};
pub use world::*;
