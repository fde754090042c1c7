/// Solar System: sun, eight orbiting planets, asteroid belt, guide lines,
/// starfield and nebulae.
///
/// Orbits advance once per running step; spins, the corona and the animated
/// camera follow the pausable animation clock.

use glam::Vec3;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use orrery_engine::api::game::GameConfig;
use orrery_engine::input::queue::{InputEvent, InputQueue};
use orrery_engine::*;

use crate::asteroid_belt::{spawn_asteroid_belt, MIN_ROCKS, EXTRA_ROCKS};
use crate::bodies::{MARS, PLANETS, PLANET_COUNT};
use crate::config::{CameraMode, SolarConfig};
use crate::controls::{Command, ControlPanel, EVENT_PAUSED, EVENT_SPEED};
use crate::ecliptic::spawn_ecliptic;
use crate::nebula::spawn_nebula;
use crate::orbit::OrbitState;
use crate::planet::spawn_planet;
use crate::starfield::spawn_starfield;
use crate::sun::spawn_sun;

const FIXED_DT: f32 = 1.0 / 60.0;
/// Sun, planets, rings and moon.
const BODY_MESHES: usize = 32;
const CAMERA_START: Vec3 = Vec3::new(0.0, 3.5, 4.5);

// ── Ambient light ────────────────────────────────────────────────────

const SKY_LIGHT_COLOR: u32 = 0x0099ff;
const SKY_LIGHT_INTENSITY: f32 = 1.0;
const SKY_LIGHT_POSITION: Vec3 = Vec3::new(0.0, 1.0, 0.0);

fn orbits_for(distance_scale: f32) -> Vec<OrbitState> {
    PLANETS
        .iter()
        .map(|spec| OrbitState::new(spec.name, spec.speed, spec.distance(distance_scale)))
        .collect()
}

fn rig_for(mode: CameraMode) -> CameraRig {
    match mode {
        CameraMode::Animated => CameraRig::animated(),
        CameraMode::Orbit => CameraRig::orbit(),
    }
}

pub struct SolarSystem {
    config: SolarConfig,
    clock: AnimationClock,
    orbits: Vec<OrbitState>,
    /// Planet entities, in `PLANETS` order.
    planet_ids: Vec<EntityId>,
    root_id: Option<EntityId>,
    /// Belt layers spawned at init, one per object in the rock meshes.
    rock_layers: usize,
    rig: CameraRig,
    camera_mode: CameraMode,
}

impl SolarSystem {
    pub fn new() -> Self {
        Self::with_config(SolarConfig::default())
    }

    pub fn with_config(config: SolarConfig) -> Self {
        Self {
            orbits: orbits_for(config.distance_scale),
            planet_ids: Vec::with_capacity(PLANET_COUNT),
            root_id: None,
            rock_layers: 0,
            rig: rig_for(config.camera_mode),
            camera_mode: config.camera_mode,
            clock: AnimationClock::new(),
            config,
        }
    }

    pub fn is_paused(&self) -> bool {
        self.clock.is_paused()
    }

    pub fn orbits(&self) -> &[OrbitState] {
        &self.orbits
    }

    pub fn planet_ids(&self) -> &[EntityId] {
        &self.planet_ids
    }

    pub fn camera_mode(&self) -> CameraMode {
        self.camera_mode
    }

    /// The group holding the sun, planets, belt and guide lines.
    pub fn root_id(&self) -> Option<EntityId> {
        self.root_id
    }

    // ── Input ──────────────────────────────────────────────────────

    fn handle_input(&mut self, ctx: &mut EngineContext, input: &InputQueue) {
        let viewport_height = ctx.camera.viewport.y;
        for event in input.iter() {
            match event {
                InputEvent::Custom { kind, a, b, .. } => {
                    match Command::from_custom(*kind, *a, *b, self.orbits.len()) {
                        Some(command) => self.apply(command, ctx),
                        None => log::warn!("ignoring custom event {} (a = {})", kind, a),
                    }
                }
                InputEvent::PointerDown { x, y } => {
                    if let Some(controls) = self.rig.controls_mut() {
                        controls.pointer_down(*x, *y);
                    }
                }
                InputEvent::PointerMove { x, y } => {
                    if let Some(controls) = self.rig.controls_mut() {
                        controls.pointer_move(*x, *y, viewport_height);
                    }
                }
                InputEvent::PointerUp { .. } => {
                    if let Some(controls) = self.rig.controls_mut() {
                        controls.pointer_up();
                    }
                }
                InputEvent::Wheel { delta } => {
                    if let Some(controls) = self.rig.controls_mut() {
                        controls.dolly(*delta);
                    }
                }
                _ => {}
            }
        }
    }

    fn apply(&mut self, command: Command, ctx: &mut EngineContext) {
        match command {
            Command::TogglePause => {
                let paused = self.clock.toggle();
                log::info!("animation {}", if paused { "paused" } else { "resumed" });
            }
            Command::SetSpeed { planet, speed } => {
                if let Some(orbit) = self.orbits.get_mut(planet) {
                    let applied = orbit.set_speed(speed);
                    log::debug!("{}", orbit.speed_label());
                    if applied != speed {
                        log::debug!("speed {} adjusted to {}", speed, applied);
                    }
                }
            }
            Command::SetCameraMode(mode) => {
                if mode != self.camera_mode {
                    self.camera_mode = mode;
                    self.rig = rig_for(mode);
                    self.rig.update(&mut ctx.camera, self.clock.animation_time());
                    log::info!("camera mode {:?}", mode);
                }
            }
        }
    }

    // ── Events ─────────────────────────────────────────────────────

    /// Report pause state and every planet's speed. Replaces the state
    /// events of earlier steps in the same frame.
    fn emit_state(&self, ctx: &mut EngineContext) {
        ctx.events
            .retain(|e| e.kind != EVENT_PAUSED && e.kind != EVENT_SPEED);
        let paused = if self.clock.is_paused() { 1.0 } else { 0.0 };
        ctx.emit_event(GameEvent::new(EVENT_PAUSED, paused, 0.0, 0.0));
        for (index, orbit) in self.orbits.iter().enumerate() {
            ctx.emit_event(GameEvent::new(EVENT_SPEED, index as f32, orbit.speed, 0.0));
        }
    }

    /// One layer per rock file until init has counted the loaded objects.
    fn belt_layers(&self) -> usize {
        self.rock_layers.max(self.config.rocks.len())
    }

    /// Geometry ids of every object in the configured rock meshes, in config order.
    fn rock_geometries(&self, ctx: &EngineContext) -> Vec<GeometryId> {
        self.config
            .rocks
            .iter()
            .filter_map(|name| ctx.meshes.get(name))
            .flat_map(|ids| ids.iter().copied())
            .collect()
    }
}

impl Default for SolarSystem {
    fn default() -> Self {
        Self::new()
    }
}

impl Game for SolarSystem {
    fn config(&self) -> GameConfig {
        let defaults = GameConfig::default();
        GameConfig {
            fixed_dt: FIXED_DT,
            max_mesh_instances: defaults
                .max_mesh_instances
                .max(BODY_MESHES + self.belt_layers() * (MIN_ROCKS + EXTRA_ROCKS)),
            max_point_vertices: defaults.max_point_vertices.max(self.config.num_stars),
            max_sprites: defaults.max_sprites.max(self.config.sprite_count()),
            max_events: 16,
            required_meshes: self.config.rocks.clone(),
            noise_seed: self.config.seed as u32,
            ..defaults
        }
    }

    fn configure(&mut self, json: &str) -> Result<(), ConfigError> {
        let config = SolarConfig::from_json(json)?;
        log::info!(
            "configured: seed {}, {} stars, {} rock meshes",
            config.seed,
            config.num_stars,
            config.rocks.len()
        );
        *self = Self::with_config(config);
        Ok(())
    }

    fn init(&mut self, ctx: &mut EngineContext) {
        let mut rng = ChaCha8Rng::seed_from_u64(self.config.seed);

        ctx.camera.position = CAMERA_START;
        ctx.camera.look_at(Vec3::ZERO);

        // ── Solar system group ───────────────────────────────────────
        let root = ctx.next_id();
        ctx.spawn(Entity::new(root).with_tag("solar-system"), LocalTransform::new());
        self.root_id = Some(root);

        spawn_sun(ctx, root, self.config.sun_detail);

        let rocks = self.rock_geometries(ctx);
        self.rock_layers = rocks.len();
        self.planet_ids.clear();
        for (index, (spec, orbit)) in PLANETS.iter().zip(&self.orbits).enumerate() {
            let id = spawn_planet(ctx, root, spec, orbit.distance, self.config.planet_detail);
            ctx.graph.set_local(id, LocalTransform::from_translation(orbit.position()));
            self.planet_ids.push(id);

            if index == MARS {
                spawn_asteroid_belt(ctx, root, &rocks, &mut rng);
            }
        }

        spawn_ecliptic(ctx, root, &mut rng);

        // ── Backdrop ─────────────────────────────────────────────────
        spawn_starfield(ctx, &mut rng, self.config.num_stars, self.config.star_size);

        let sky = ctx.next_id();
        ctx.spawn(
            Entity::new(sky)
                .with_tag("sky-light")
                .with_light(LightComponent::directional(SKY_LIGHT_COLOR, SKY_LIGHT_INTENSITY)),
            LocalTransform::from_translation(SKY_LIGHT_POSITION),
        );

        for layer in &self.config.nebulae {
            spawn_nebula(ctx, &mut rng, layer);
        }

        self.rig.update(&mut ctx.camera, self.clock.animation_time());
        log::info!(
            "solar system built: {} planets, {} rock objects, {} entities",
            self.planet_ids.len(),
            rocks.len(),
            ctx.scene.len()
        );
    }

    fn update(&mut self, ctx: &mut EngineContext, input: &InputQueue) {
        self.handle_input(ctx, input);

        // ── Advance time ─────────────────────────────────────────────
        if self.clock.advance(FIXED_DT) {
            let t = self.clock.animation_time();
            for (orbit, &id) in self.orbits.iter_mut().zip(&self.planet_ids) {
                orbit.advance();
                if let Some(local) = ctx.graph.get_local_mut(id) {
                    local.translation = orbit.position();
                }
            }
            ctx.update_motions(t);
            if self.rig.is_animated() {
                self.rig.update(&mut ctx.camera, t);
            }
        }

        // Orbit controls stay responsive while paused.
        if !self.rig.is_animated() {
            self.rig.update(&mut ctx.camera, self.clock.animation_time());
        }

        self.emit_state(ctx);
    }

    fn ui_json(&self) -> Option<String> {
        match ControlPanel::new(self.is_paused(), self.camera_mode, &self.orbits).to_json() {
            Ok(json) => Some(json),
            Err(e) => {
                log::error!("failed to serialize control panel: {}", e);
                None
            }
        }
    }
}
