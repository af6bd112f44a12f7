use compute::{RouteConfig, TripMetrics, plan_metrics};
use foundation::Millis;
use foundation::math::{Vec2, Vec3, geo_to_unit, sphere_to_geo};
use runtime::{CameraPose, Easing, FlightDriver, FlightTick, Frame, pop_in_scale};
use scene::markers::{MarkerConfig, MarkerPlacement, MarkerStyle, declutter};
use scene::picking::{globe_hit_point, nearest_marker_hit};
use scene::query::{CityFilter, visible_cities};
use scene::{CityId, RegionId, World, WorldNotLoadedError};

use crate::camera::Camera;
use crate::pointer::{PointerConfig, PointerTracker};
use crate::snapshot::{FrameSnapshot, MarkerView};
use crate::state::{HitTarget, InteractionState};

/// Every tunable the interaction layer exposes, in one place.
#[derive(Debug, Clone, PartialEq)]
pub struct InteractionConfig {
    pub marker: MarkerConfig,
    pub pointer: PointerConfig,
    pub route: RouteConfig,
    /// Camera flight length.
    pub flight_duration_ms: f64,
    /// Marker pop-in window.
    pub marker_pop_ms: f64,
    /// City arrivals zoom to this fraction of the current camera radius.
    pub city_zoom_factor: f64,
    /// Globe surface radius in world units.
    pub sphere_radius: f64,
    /// The renderer's fixed rotation of the globe about Y; picking
    /// inverts it before the geographic conversion.
    pub sphere_yaw_rad: f64,
    /// Where `reset` flies back to.
    pub home_pose: CameraPose,
}

impl Default for InteractionConfig {
    fn default() -> Self {
        Self {
            marker: MarkerConfig::default(),
            pointer: PointerConfig::default(),
            route: RouteConfig::default(),
            flight_duration_ms: 1200.0,
            marker_pop_ms: 350.0,
            city_zoom_factor: 0.5,
            sphere_radius: 1.0,
            sphere_yaw_rad: 0.0,
            home_pose: CameraPose::new(Vec3::new(0.0, 0.0, 2.8), Vec3::ZERO),
        }
    }
}

/// Owns the interaction state machine and orchestrates per-event and
/// per-frame work: pointer events resolve to hit targets, country
/// activation recomputes marker placements, camera flights start and
/// finish, and each tick emits an immutable snapshot.
///
/// Single-threaded by design: everything here runs on the frame loop,
/// and the snapshot is the only thing other layers read.
#[derive(Debug, Clone)]
pub struct InteractionController {
    config: InteractionConfig,
    world: World,
    state: InteractionState,
    camera: Camera,
    flight: FlightDriver,
    pointer: PointerTracker,
    placements: Vec<MarkerPlacement>,
    placements_at: Option<Millis>,
    frame: Option<Frame>,
}

impl InteractionController {
    /// Builds the controller over fully loaded datasets. Called once at
    /// startup; an unloaded world is a bootstrap bug and is refused.
    pub fn init(world: World, config: InteractionConfig) -> Result<Self, WorldNotLoadedError> {
        world.validate_loaded()?;
        let camera = Camera::new(config.home_pose);
        let pointer = PointerTracker::new(config.pointer);
        Ok(Self {
            config,
            world,
            state: InteractionState::new(),
            camera,
            flight: FlightDriver::new(),
            pointer,
            placements: Vec::new(),
            placements_at: None,
            frame: None,
        })
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn state(&self) -> &InteractionState {
        &self.state
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn placements(&self) -> &[MarkerPlacement] {
        &self.placements
    }

    pub fn set_viewport(&mut self, width_px: f64, height_px: f64) {
        self.camera.set_viewport(width_px, height_px);
    }

    /// Manual camera control is enabled exactly while no flight runs.
    pub fn manual_control_enabled(&self) -> bool {
        !self.flight.is_in_flight()
    }

    /// A press grabs the globe: any flight in progress is cancelled and
    /// the camera freezes where the interpolation left it.
    pub fn on_pointer_down(&mut self, pos_px: Vec2, now: Millis) {
        self.pointer.on_pointer_down(pos_px);
        if let Some(frozen) = self.flight.cancel(now) {
            self.camera.pose = frozen;
        }
    }

    pub fn on_pointer_up(&mut self, pos_px: Vec2, now: Millis) {
        self.pointer.on_pointer_up(pos_px, now);
    }

    /// Hover feedback: resolves with the same priority as clicks but
    /// only updates `hovered`, never selection.
    pub fn on_hover(&mut self, pos_px: Vec2) -> Option<HitTarget> {
        let target = self.resolve(pos_px);
        self.state.hovered = target;
        target
    }

    /// Resolves a click and applies its semantic action. Returns what
    /// was hit, or `None` for misses and drag-suppressed clicks.
    pub fn on_click(&mut self, pos_px: Vec2, now: Millis) -> Option<HitTarget> {
        if !self.pointer.click_allowed(now) {
            return None;
        }
        let target = self.resolve(pos_px)?;
        match target {
            HitTarget::City(city) => {
                self.state.selected_city = Some(city);
                self.fly_to_city(city, now);
            }
            HitTarget::Country(region) => self.activate_country(region, now),
        }
        Some(target)
    }

    /// Jump to a city picked outside the globe (search, trip tray).
    pub fn select_city(&mut self, city: CityId, now: Millis) {
        if self.world.city(city).is_none() {
            return;
        }
        self.state.selected_city = Some(city);
        self.fly_to_city(city, now);
    }

    pub fn toggle_favorite(&mut self, city: CityId) -> bool {
        let favorite = if self.state.favorites.remove(&city) {
            false
        } else {
            self.state.favorites.insert(city);
            true
        };
        for placement in &mut self.placements {
            if placement.city == city {
                placement.style = if favorite {
                    MarkerStyle::Favorite
                } else {
                    MarkerStyle::Normal
                };
            }
        }
        favorite
    }

    /// Returns whether the city is in the trip afterwards.
    pub fn toggle_trip_stop(&mut self, city: CityId) -> bool {
        self.state.trip.toggle(city)
    }

    pub fn trip_metrics(&self) -> TripMetrics {
        plan_metrics(&self.world, &self.state.trip, &self.config.route)
    }

    /// Content filter change: the visible set may shrink or grow, so
    /// placements recompute, but unchanged sets keep their exact layout
    /// (decluttering is deterministic) and markers do not re-pop.
    pub fn set_tag_filter(&mut self, tag: Option<String>, now: Millis) {
        self.state.filter.tag = tag;
        self.recompute_placements(false, now);
    }

    /// Panel close: clears the selection context and flies home with the
    /// return-home curve. Favorites and the trip survive; they are user
    /// data, not view state.
    pub fn reset(&mut self, now: Millis) {
        self.state.active_country = None;
        self.state.selected_city = None;
        self.state.hovered = None;
        self.state.filter = CityFilter::default();
        self.placements.clear();
        self.placements_at = None;
        self.flight.begin(
            self.camera.pose,
            self.config.home_pose,
            now,
            self.config.flight_duration_ms,
            Easing::OutCubic,
        );
    }

    /// Advances one frame: drives the flight, applies the pose, and
    /// copies out the immutable snapshot for this frame.
    pub fn tick(&mut self, now: Millis) -> FrameSnapshot {
        let frame = match self.frame {
            Some(f) => f.next(now),
            None => Frame::first(now),
        };
        self.frame = Some(frame);

        match self.flight.tick(now) {
            FlightTick::Idle => {}
            FlightTick::Moving(pose) | FlightTick::Completed(pose) => self.camera.pose = pose,
        }

        let markers = self
            .placements
            .iter()
            .map(|p| MarkerView {
                city: p.city,
                world: p.world.rotated_y(self.config.sphere_yaw_rad),
                style: p.style,
                scale: match self.placements_at {
                    Some(at) => pop_in_scale(now.since(at), self.config.marker_pop_ms),
                    None => 1.0,
                },
            })
            .collect();

        FrameSnapshot {
            frame,
            camera: self.camera.pose,
            manual_control: !self.flight.is_in_flight(),
            markers,
            hovered: self.state.hovered,
            trip: self.trip_metrics(),
        }
    }

    /// Shared target resolution. City hit-volumes are only consulted
    /// while a country context is active; everything else falls through
    /// to the sphere + region layer. A degenerate pick (exactly the
    /// sphere center) resolves to "no target" rather than an error.
    fn resolve(&self, pos_px: Vec2) -> Option<HitTarget> {
        let ray = self.camera.screen_ray(pos_px)?;

        if self.state.active_country.is_some() {
            let markers: Vec<(CityId, Vec3)> = self
                .placements
                .iter()
                .map(|p| (p.city, p.world.rotated_y(self.config.sphere_yaw_rad)))
                .collect();
            if let Some(hit) = nearest_marker_hit(&markers, ray, self.config.marker.marker_radius) {
                return Some(HitTarget::City(hit.city));
            }
        }

        let point = globe_hit_point(ray, self.config.sphere_radius)?;
        let local = point.rotated_y(-self.config.sphere_yaw_rad);
        let geo = sphere_to_geo(local).ok()?;
        // Regions were validated non-empty at init, so the error arm of
        // locate is unreachable here.
        let region = self.world.locate(geo).ok().flatten()?;
        Some(HitTarget::Country(region))
    }

    fn activate_country(&mut self, region: RegionId, now: Millis) {
        self.state.active_country = Some(region);
        self.state.selected_city = None;
        self.recompute_placements(true, now);

        let Some(anchor) = self.world.region(region).and_then(|r| r.anchor()) else {
            return;
        };
        let dir = geo_to_unit(anchor).rotated_y(self.config.sphere_yaw_rad);
        // Keep the current orbit radius: browsing countries should not
        // churn the zoom level.
        let radius = self.camera.pose.eye.length().max(self.config.sphere_radius);
        self.flight.begin(
            self.camera.pose,
            CameraPose::new(dir * radius, Vec3::ZERO),
            now,
            self.config.flight_duration_ms,
            Easing::InOutCubic,
        );
    }

    fn fly_to_city(&mut self, city: CityId, now: Millis) {
        let Some(record) = self.world.city(city) else {
            return;
        };
        let dir = geo_to_unit(record.position).rotated_y(self.config.sphere_yaw_rad);
        let radius = (self.camera.pose.eye.length() * self.config.city_zoom_factor)
            .max(self.config.sphere_radius);
        self.flight.begin(
            self.camera.pose,
            CameraPose::new(dir * radius, Vec3::ZERO),
            now,
            self.config.flight_duration_ms,
            Easing::InOutCubic,
        );
    }

    fn recompute_placements(&mut self, reset_pop: bool, now: Millis) {
        let Some(region) = self
            .state
            .active_country
            .and_then(|id| self.world.region(id))
        else {
            self.placements.clear();
            self.placements_at = None;
            return;
        };

        let filter = CityFilter {
            country: Some(region.name.clone()),
            tag: self.state.filter.tag.clone(),
        };
        let visible = visible_cities(&self.world, &filter);
        if visible.is_empty() {
            // Everything filtered out: a valid state, not a bootstrap bug.
            self.placements.clear();
            return;
        }

        let mut placements =
            declutter(&self.world, &visible, &self.config.marker).unwrap_or_default();
        for placement in &mut placements {
            if self.state.favorites.contains(&placement.city) {
                placement.style = MarkerStyle::Favorite;
            }
        }
        self.placements = placements;
        if reset_pop || self.placements_at.is_none() {
            self.placements_at = Some(now);
        }
    }
}
