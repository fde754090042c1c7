use orrery_engine::{
    build_render_frame, AssetError, AssetManifest, CameraUniform, ConfigError, EngineContext,
    FixedTimestep, FrameStats, Game, GameConfig, GameEvent, GeometryId, InputEvent, InputQueue,
    MotionSystem, ProtocolLayout, RenderContext, RenderFrame, TextureRegistry,
};
use orrery_engine::bridge::protocol::HEADER_FLOATS;

/// Generic game runner that wires up the engine loop.
///
/// Each concrete game creates a `thread_local!` GameRunner through
/// `export_game!` and exports free functions via `#[wasm_bindgen]`, because
/// wasm-bindgen cannot export generic structs directly.
///
/// Lifecycle: optional `configure`, optional `load_manifest`, one `load_mesh`
/// per required mesh, then `init` (which only succeeds once every required
/// mesh is present), then `tick` every display frame.
pub struct GameRunner<G: Game> {
    game: G,
    ctx: EngineContext,
    input: InputQueue,
    frame: RenderFrame,
    timestep: FixedTimestep,
    config: GameConfig,
    layout: ProtocolLayout,
    header: [f32; HEADER_FLOATS],
    camera_uniform: CameraUniform,
    frame_counter: u32,
    initialized: bool,
}

impl<G: Game> GameRunner<G> {
    pub fn new(game: G) -> Self {
        let config = game.config();
        let ctx = EngineContext::from_config(&config);
        let camera_uniform = ctx.camera.uniform();

        Self {
            game,
            ctx,
            input: InputQueue::new(),
            frame: RenderFrame::new(config.frame_capacity()),
            timestep: FixedTimestep::new(config.fixed_dt),
            layout: ProtocolLayout::from_config(&config),
            config,
            header: [0.0; HEADER_FLOATS],
            camera_uniform,
            frame_counter: 0,
            initialized: false,
        }
    }

    /// Hand a JSON configuration document to the game. Only valid before init.
    pub fn configure(&mut self, json: &str) -> Result<(), ConfigError> {
        if self.initialized {
            return Err(ConfigError::AlreadyInitialized);
        }
        self.game.configure(json)?;
        self.apply_config();
        Ok(())
    }

    fn apply_config(&mut self) {
        self.config = self.game.config();
        self.layout = ProtocolLayout::from_config(&self.config);
        self.timestep = FixedTimestep::new(self.config.fixed_dt);
        self.frame = RenderFrame::new(self.config.frame_capacity());

        let camera = &mut self.ctx.camera;
        camera.fov_y_deg = self.config.fov_y_deg;
        camera.near = self.config.near;
        camera.far = self.config.far;
        self.ctx.motions = MotionSystem::new(self.config.noise_seed);
    }

    /// Re-read capacities once init has seen the loaded assets and resize
    /// the frame if they changed.
    fn refresh_capacity(&mut self) {
        let config = self.game.config();
        let layout = ProtocolLayout::from_config(&config);
        if layout == self.layout {
            return;
        }
        log::info!(
            "buffer capacity resized after init: {} -> {} mesh instances",
            self.layout.max_mesh_instances,
            layout.max_mesh_instances
        );
        self.frame = RenderFrame::new(config.frame_capacity());
        self.layout = layout;
        self.config = config;
    }

    pub fn load_manifest(&mut self, json: &str) -> Result<(), AssetError> {
        let manifest = AssetManifest::from_json(json)?;
        self.ctx.textures = TextureRegistry::from_manifest(&manifest);
        log::info!(
            "manifest loaded: {} textures, {} meshes",
            manifest.textures.len(),
            manifest.meshes.len()
        );
        Ok(())
    }

    /// Parse OBJ text for one of the game's required meshes.
    /// Returns the number of objects the file contained.
    pub fn load_mesh(&mut self, name: &str, obj_text: &str) -> Result<usize, AssetError> {
        if !self.config.required_meshes.iter().any(|m| m == name) {
            return Err(AssetError::UnknownMesh(name.to_string()));
        }
        let ids = self.ctx.load_obj(name, obj_text)?;
        Ok(ids.len())
    }

    /// Required meshes not loaded yet.
    pub fn missing_meshes(&self) -> Vec<&str> {
        self.config
            .required_meshes
            .iter()
            .map(String::as_str)
            .filter(|name| !self.ctx.meshes.contains(name))
            .collect()
    }

    pub fn is_ready(&self) -> bool {
        self.missing_meshes().is_empty()
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Build the scene once every required mesh is loaded.
    /// Returns whether the game is initialized. Calling again is a no-op.
    pub fn init(&mut self) -> bool {
        if self.initialized {
            return true;
        }
        let missing = self.missing_meshes();
        if !missing.is_empty() {
            log::info!("init deferred, waiting for meshes: {:?}", missing);
            return false;
        }

        self.apply_config();
        self.game.init(&mut self.ctx);
        self.refresh_capacity();
        self.initialized = true;
        log::info!(
            "scene initialized: {} entities, {} geometries",
            self.ctx.scene.len(),
            self.ctx.geometries.len()
        );
        self.publish();
        true
    }

    /// Push an input event into the queue.
    pub fn push_input(&mut self, event: InputEvent) {
        self.input.push(event);
    }

    /// Run one display frame: fixed steps of the game, then rebuild buffers.
    pub fn tick(&mut self, dt: f32) {
        if !self.initialized {
            // Nothing reacts to pointer or key input yet; keep only what
            // still applies once the scene exists.
            self.input.retain_deferred();
            return;
        }

        // Clear per-frame transient data
        self.ctx.clear_frame_data();

        if let Some((width, height)) = self.input.last_resize() {
            self.ctx.camera.resize(width, height);
        }

        // Input is delivered to the first step only so one press acts once.
        let steps = self.timestep.accumulate(dt);
        if steps > 0 {
            let input = std::mem::take(&mut self.input);
            let idle = InputQueue::new();
            for step in 0..steps {
                let queue = if step == 0 { &input } else { &idle };
                self.game.update(&mut self.ctx, queue);
            }
        }

        self.publish();
    }

    /// Propagate transforms and rebuild every buffer the host reads.
    fn publish(&mut self) {
        self.ctx.graph.propagate(&mut self.ctx.scene);
        self.ctx.geometries.sync();

        build_render_frame(&self.ctx.scene, &mut self.frame);
        {
            let mut render_ctx = RenderContext {
                frame: &mut self.frame,
            };
            self.game.render(&mut render_ctx);
        }

        if self.ctx.events.len() > self.config.max_events {
            log::warn!(
                "dropping {} game events over capacity {}",
                self.ctx.events.len() - self.config.max_events,
                self.config.max_events
            );
            self.ctx.events.truncate(self.config.max_events);
        }

        self.camera_uniform = self.ctx.camera.uniform();
        self.frame_counter = self.frame_counter.wrapping_add(1);
        let stats = FrameStats {
            frame_counter: self.frame_counter,
            event_count: self.ctx.events.len(),
            geometry_revision: self.ctx.geometries.revision(),
        };
        self.layout.write_header(&mut self.header, &self.frame, stats);
    }

    pub fn game(&self) -> &G {
        &self.game
    }

    pub fn context(&self) -> &EngineContext {
        &self.ctx
    }

    pub fn frame(&self) -> &RenderFrame {
        &self.frame
    }

    pub fn ui_json(&self) -> Option<String> {
        self.game.ui_json()
    }

    pub fn clear_color(&self) -> [f32; 3] {
        self.config.clear_color.to_array()
    }

    // ---- Pointer accessors for host reads out of WASM memory ----

    pub fn header_ptr(&self) -> *const f32 {
        self.header.as_ptr()
    }

    pub fn camera_ptr(&self) -> *const f32 {
        &self.camera_uniform as *const CameraUniform as *const f32
    }

    pub fn meshes_ptr(&self) -> *const f32 {
        self.frame.meshes_ptr()
    }

    pub fn mesh_count(&self) -> u32 {
        self.frame.mesh_count()
    }

    pub fn lines_ptr(&self) -> *const f32 {
        self.frame.lines_ptr()
    }

    pub fn line_vertex_count(&self) -> u32 {
        self.frame.line_vertex_count()
    }

    pub fn points_ptr(&self) -> *const f32 {
        self.frame.points_ptr()
    }

    pub fn point_count(&self) -> u32 {
        self.frame.point_count()
    }

    pub fn sprites_ptr(&self) -> *const f32 {
        self.frame.sprites_ptr()
    }

    pub fn sprite_count(&self) -> u32 {
        self.frame.sprite_count()
    }

    pub fn lights_ptr(&self) -> *const f32 {
        self.frame.lights_ptr()
    }

    pub fn light_count(&self) -> u32 {
        self.frame.light_count()
    }

    pub fn game_events_ptr(&self) -> *const f32 {
        self.ctx.events.as_ptr() as *const f32
    }

    pub fn game_events_len(&self) -> u32 {
        self.ctx.events.len() as u32
    }

    pub fn game_events(&self) -> &[GameEvent] {
        &self.ctx.events
    }

    // ---- Geometry accessors ----

    pub fn geometry_count(&self) -> u32 {
        self.ctx.geometries.len() as u32
    }

    pub fn geometry_vertices_ptr(&self, id: u32) -> *const f32 {
        self.ctx
            .geometries
            .get(GeometryId(id))
            .map_or(std::ptr::null(), |g| g.vertices_ptr())
    }

    pub fn geometry_vertex_count(&self, id: u32) -> u32 {
        self.ctx
            .geometries
            .get(GeometryId(id))
            .map_or(0, |g| g.vertex_count() as u32)
    }

    pub fn geometry_indices_ptr(&self, id: u32) -> *const u32 {
        self.ctx
            .geometries
            .get(GeometryId(id))
            .map_or(std::ptr::null(), |g| g.indices_ptr())
    }

    pub fn geometry_index_count(&self, id: u32) -> u32 {
        self.ctx
            .geometries
            .get(GeometryId(id))
            .map_or(0, |g| g.indices.len() as u32)
    }

    pub fn geometry_version(&self, id: u32) -> u32 {
        self.ctx.geometries.get(GeometryId(id)).map_or(0, |g| g.version())
    }

    // ---- Capacity accessors (read by the host via wasm_bindgen exports) ----

    pub fn max_mesh_instances(&self) -> u32 {
        self.layout.max_mesh_instances as u32
    }

    pub fn max_line_vertices(&self) -> u32 {
        self.layout.max_line_vertices as u32
    }

    pub fn max_point_vertices(&self) -> u32 {
        self.layout.max_point_vertices as u32
    }

    pub fn max_sprites(&self) -> u32 {
        self.layout.max_sprites as u32
    }

    pub fn max_lights(&self) -> u32 {
        self.layout.max_lights as u32
    }

    pub fn max_events(&self) -> u32 {
        self.layout.max_events as u32
    }

    pub fn buffer_total_floats(&self) -> u32 {
        self.layout.buffer_total_floats as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use orrery_engine::bridge::protocol::{
        HEADER_FRAME_COUNTER, HEADER_MAX_MESH_INSTANCES, HEADER_MESH_INSTANCE_COUNT, HEADER_READY,
    };
    use orrery_engine::{
        icosphere, Entity, EntityId, LocalTransform, Material, MeshComponent, Motion,
    };

    const TRI: &str = "v 0 0 0\nv 1 0 0\nv 0 1 0\nf 1 2 3\n";

    /// Spins one sphere and counts updates and clicks.
    #[derive(Default)]
    struct Spinner {
        needs_rock: bool,
        /// Asks for more mesh capacity once the scene exists.
        grows: bool,
        built: bool,
        updates: u32,
        clicks: u32,
        sphere: Option<EntityId>,
    }

    impl Game for Spinner {
        fn config(&self) -> GameConfig {
            GameConfig {
                required_meshes: if self.needs_rock { vec!["Rock1".into()] } else { Vec::new() },
                max_mesh_instances: if self.grows && self.built { 1024 } else { 512 },
                ..GameConfig::default()
            }
        }

        fn configure(&mut self, json: &str) -> Result<(), ConfigError> {
            let value: serde_json::Value = serde_json::from_str(json)?;
            self.needs_rock = value["rock"].as_bool().unwrap_or(false);
            Ok(())
        }

        fn init(&mut self, ctx: &mut EngineContext) {
            let geometry = ctx.geometries.insert(icosphere(1.0, 1));
            let id = ctx.next_id();
            ctx.spawn(
                Entity::new(id)
                    .with_mesh(MeshComponent::new(geometry, Material::standard()))
                    .with_motion(Motion::spin_y(1.0)),
                LocalTransform::new(),
            );
            self.sphere = Some(id);
            self.built = true;
        }

        fn update(&mut self, ctx: &mut EngineContext, input: &InputQueue) {
            self.updates += 1;
            self.clicks += input
                .iter()
                .filter(|e| matches!(e, InputEvent::PointerDown { .. }))
                .count() as u32;
            ctx.update_motions(self.updates as f32);
            ctx.emit_event(GameEvent::new(1.0, self.updates as f32, 0.0, 0.0));
        }
    }

    #[test]
    fn tick_before_init_does_nothing() {
        let mut runner = GameRunner::new(Spinner::default());
        runner.tick(1.0 / 60.0);
        assert_eq!(runner.game().updates, 0);
        assert_eq!(runner.mesh_count(), 0);
    }

    #[test]
    fn init_builds_first_frame() {
        let mut runner = GameRunner::new(Spinner::default());
        assert_eq!(runner.header[HEADER_READY], 0.0);
        assert!(runner.init());
        assert_eq!(runner.header[HEADER_READY], 1.0);
        assert_eq!(runner.mesh_count(), 1);
        assert_eq!(runner.header[HEADER_MESH_INSTANCE_COUNT], 1.0);
        assert_eq!(runner.header[HEADER_FRAME_COUNTER], 1.0);
        // Idempotent: later calls return early.
        assert!(runner.init());
        assert!(runner.init());
        assert_eq!(runner.context().scene.len(), 1);
        assert_eq!(runner.header[HEADER_FRAME_COUNTER], 1.0);
    }

    #[test]
    fn init_waits_for_required_meshes() {
        let mut runner = GameRunner::new(Spinner::default());
        runner.configure(r#"{ "rock": true }"#).unwrap();
        assert!(!runner.is_ready());
        assert!(!runner.init());

        assert!(matches!(runner.load_mesh("Rock9", TRI), Err(AssetError::UnknownMesh(_))));
        assert!(runner.load_mesh("Rock1", "f 1 2 3").is_err());
        assert_eq!(runner.load_mesh("Rock1", TRI).unwrap(), 1);

        assert!(runner.is_ready());
        assert!(runner.init());
    }

    #[test]
    fn capacity_follows_config_after_init() {
        let mut runner = GameRunner::new(Spinner { grows: true, ..Spinner::default() });
        assert_eq!(runner.max_mesh_instances(), 512);
        runner.init();
        assert_eq!(runner.max_mesh_instances(), 1024);
        assert_eq!(runner.header[HEADER_MAX_MESH_INSTANCES], 1024.0);
        assert_eq!(runner.buffer_total_floats(), runner.layout.buffer_total_floats as u32);
    }

    #[test]
    fn pointer_input_before_init_is_dropped() {
        let mut runner = GameRunner::new(Spinner::default());
        for i in 0..100 {
            runner.push_input(InputEvent::PointerDown { x: i as f32, y: 0.0 });
        }
        runner.push_input(InputEvent::Custom { kind: 1, a: 0.0, b: 0.0, c: 0.0 });
        runner.push_input(InputEvent::Resize { width: 1600.0, height: 800.0 });
        runner.tick(1.0 / 60.0);
        assert_eq!(runner.input.len(), 2);

        runner.init();
        runner.tick(1.0 / 60.0 + 1e-4);
        assert_eq!(runner.game().clicks, 0);
        assert!((runner.context().camera.aspect - 2.0).abs() < 1e-6);
    }

    #[test]
    fn configure_after_init_is_rejected() {
        let mut runner = GameRunner::new(Spinner::default());
        runner.init();
        assert!(matches!(runner.configure("{}"), Err(ConfigError::AlreadyInitialized)));
        assert!(matches!(
            GameRunner::new(Spinner::default()).configure("not json"),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn input_reaches_only_the_first_step() {
        let mut runner = GameRunner::new(Spinner::default());
        runner.init();
        runner.push_input(InputEvent::PointerDown { x: 1.0, y: 1.0 });
        runner.tick(3.0 / 60.0 + 1e-4);

        assert_eq!(runner.game().updates, 3);
        assert_eq!(runner.game().clicks, 1);
        runner.tick(1.0 / 60.0);
        assert_eq!(runner.game().clicks, 1);
    }

    #[test]
    fn input_waits_for_a_step() {
        let mut runner = GameRunner::new(Spinner::default());
        runner.init();
        runner.push_input(InputEvent::PointerDown { x: 0.0, y: 0.0 });
        runner.tick(0.001);
        assert_eq!(runner.game().clicks, 0);
        runner.tick(1.0 / 60.0);
        assert_eq!(runner.game().clicks, 1);
    }

    #[test]
    fn resize_updates_camera_aspect() {
        let mut runner = GameRunner::new(Spinner::default());
        runner.init();
        runner.push_input(InputEvent::Resize { width: 1600.0, height: 800.0 });
        runner.tick(0.0);
        assert!((runner.context().camera.aspect - 2.0).abs() < 1e-6);
    }

    #[test]
    fn events_are_per_frame() {
        let mut runner = GameRunner::new(Spinner::default());
        runner.init();
        runner.tick(1.0 / 60.0 + 1e-4);
        assert_eq!(runner.game_events_len(), 1);
        runner.tick(0.0);
        assert_eq!(runner.game_events_len(), 0);
    }

    #[test]
    fn motions_move_the_published_transform() {
        let mut runner = GameRunner::new(Spinner::default());
        runner.init();
        let before = runner.frame().meshes[0].model;
        runner.tick(1.0 / 60.0 + 1e-4);
        assert_ne!(runner.frame().meshes[0].model, before);
    }

    #[test]
    fn geometry_accessors() {
        let mut runner = GameRunner::new(Spinner::default());
        runner.init();
        assert_eq!(runner.geometry_count(), 1);
        assert_eq!(runner.geometry_vertex_count(0), 20 * 4 * 3);
        assert_eq!(runner.geometry_version(0), 1);
        assert!(runner.geometry_vertices_ptr(5).is_null());
    }
}
