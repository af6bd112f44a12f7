use compute::TripMetrics;
use foundation::math::Vec3;
use runtime::{CameraPose, Frame};
use scene::CityId;
use scene::markers::MarkerStyle;

use crate::state::HitTarget;

/// One marker ready for the rendering layer, in world space.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct MarkerView {
    pub city: CityId,
    pub world: Vec3,
    pub style: MarkerStyle,
    /// Pop-in scale factor; settles at 1.0 once the spawn window ends.
    pub scale: f64,
}

/// Immutable per-tick view handed across the UI boundary.
///
/// Everything a renderer or panel needs for this frame is copied out
/// here, so readers never reach into live interaction state.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameSnapshot {
    pub frame: Frame,
    pub camera: CameraPose,
    /// False while a flight owns the camera.
    pub manual_control: bool,
    pub markers: Vec<MarkerView>,
    pub hovered: Option<HitTarget>,
    pub trip: TripMetrics,
}
