/// Nebula layers: large, faint, camera-facing sprites arranged in a disc.

use std::f32::consts::TAU;

use glam::Vec3;
use rand::Rng;
use serde::{Deserialize, Serialize};
use orrery_engine::{Color, EngineContext, Entity, EntityId, LocalTransform, SpriteComponent, TextureId};

pub const MAX_SPRITES_PER_LAYER: usize = 256;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NebulaParams {
    pub hue: f32,
    pub num_sprites: usize,
    pub opacity: f32,
    /// Disc radius the sprites are scattered over.
    pub radius: f32,
    /// Lightness of the base color.
    pub sat: f32,
    pub size: f32,
    /// Depth of the layer.
    pub z: f32,
}

impl Default for NebulaParams {
    fn default() -> Self {
        Self {
            hue: 0.0,
            num_sprites: 10,
            opacity: 1.0,
            radius: 1.0,
            sat: 0.5,
            size: 1.0,
            z: 0.0,
        }
    }
}

impl NebulaParams {
    /// A backdrop layer of ten wide, faint sprites at depth `z`.
    pub fn layer(hue: f32, z: f32) -> Self {
        Self {
            hue,
            opacity: 0.2,
            radius: 40.0,
            size: 50.0,
            z,
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<(), String> {
        if !(0.0..=1.0).contains(&self.opacity) {
            return Err(format!("opacity {} outside [0, 1]", self.opacity));
        }
        if !self.radius.is_finite() || self.radius < 0.0 {
            return Err(format!("radius {} must be non-negative", self.radius));
        }
        if !self.size.is_finite() || self.size <= 0.0 {
            return Err(format!("size {} must be positive", self.size));
        }
        if self.num_sprites > MAX_SPRITES_PER_LAYER {
            return Err(format!(
                "{} sprites exceeds {}",
                self.num_sprites, MAX_SPRITES_PER_LAYER
            ));
        }
        if !self.hue.is_finite() || !self.sat.is_finite() || !self.z.is_finite() {
            return Err("hue, sat and z must be finite".into());
        }
        Ok(())
    }
}

/// Positions and sprite data for one layer.
pub fn nebula_sprites<R: Rng>(
    rng: &mut R,
    params: &NebulaParams,
    texture: Option<TextureId>,
) -> Vec<(Vec3, SpriteComponent)> {
    let n = params.num_sprites;
    (0..n)
        .map(|i| {
            let angle = i as f32 / n as f32 * TAU;
            let x = angle.cos() * rng.random::<f32>() * params.radius;
            let y = angle.sin() * rng.random::<f32>() * params.radius;
            let z = params.z + rng.random::<f32>();

            let color = Color::from_hsl(params.hue, 1.0, params.sat)
                .offset_hsl(0.0, 0.0, rng.random::<f32>() * 0.2 - 0.1);
            let size = params.size + rng.random::<f32>() - 0.5;

            let sprite = SpriteComponent {
                color,
                opacity: params.opacity,
                texture,
                size,
                rotation: 0.0,
            };
            (Vec3::new(x, -y, z), sprite)
        })
        .collect()
}

/// Spawn a layer at the scene root. Returns the layer group.
pub fn spawn_nebula<R: Rng>(ctx: &mut EngineContext, rng: &mut R, params: &NebulaParams) -> EntityId {
    let texture = ctx.textures.get("rad-grad");
    let group = ctx.next_id();
    ctx.spawn(Entity::new(group).with_tag("nebula"), LocalTransform::new());

    for (position, sprite) in nebula_sprites(rng, params, texture) {
        let id = ctx.next_id();
        ctx.spawn_child(
            Entity::new(id).with_tag("nebula-sprite").with_sprite(sprite),
            group,
            LocalTransform::from_translation(position),
        );
    }
    group
}
