use std::f32::consts::{FRAC_PI_2, TAU};

use glam::{Quat, Vec3};
use rand::Rng;
use orrery_engine::{Color, EngineContext, Entity, EntityId, LineComponent, LocalTransform};

pub const RING_COUNT: usize = 20;
/// Segments per ring; the first vertex is repeated to close the loop.
pub const RING_SEGMENTS: usize = 128;
pub const RADIAL_COUNT: usize = 40;
pub const RADIAL_POINTS: usize = 10;
pub const INNER_RADIUS: f32 = 1.1;

/// Closed circle of `radius` in the XY plane.
pub fn ring_points(radius: f32) -> Vec<Vec3> {
    (0..=RING_SEGMENTS)
        .map(|i| {
            let angle = i as f32 / RING_SEGMENTS as f32 * TAU;
            Vec3::new(radius * angle.cos(), radius * angle.sin(), 0.0)
        })
        .collect()
}

/// Guide ring `index`: greener and brighter inside, fading to dark blue outside.
pub fn ring<R: Rng>(rng: &mut R, index: usize) -> LineComponent {
    let gap = 0.075 + rng.random::<f32>() * 0.005;
    let f = index as f32 / RING_COUNT as f32;
    let hue = 0.25 - f * 0.27;
    let lightness = 0.5 - f * 0.5;
    let width = 0.5 + rng.random::<f32>();
    LineComponent::solid(
        ring_points(INNER_RADIUS + index as f32 * gap),
        Color::from_hsl(hue, 1.0, lightness),
        width,
    )
}

/// A short spoke pointing away from the sun with a hue gradient along it.
pub fn radial_line<R: Rng>(rng: &mut R) -> LineComponent {
    let width = 0.5 + rng.random::<f32>();
    let min_radius = INNER_RADIUS + rng.random::<f32>() * 0.1;
    let angle = rng.random::<f32>() * TAU;
    let (sin, cos) = angle.sin_cos();

    let mut points = Vec::with_capacity(RADIAL_POINTS);
    let mut colors = Vec::with_capacity(RADIAL_POINTS);
    for i in 0..RADIAL_POINTS {
        let hue = 0.25 - i as f32 / RADIAL_POINTS as f32 * 0.27;
        colors.push(Color::from_hsl(hue, 1.0, 0.5));
        let radius = min_radius + i as f32 / 8.0;
        points.push(Vec3::new(cos * radius, 0.0, sin * radius));
    }
    LineComponent::gradient(points, colors, width)
}

/// Spawn the guide-line group under `parent`.
pub fn spawn_ecliptic<R: Rng>(ctx: &mut EngineContext, parent: EntityId, rng: &mut R) -> EntityId {
    let group = ctx.next_id();
    ctx.spawn_child(Entity::new(group).with_tag("ecliptic"), parent, LocalTransform::new());

    // Rings are drawn in XY and laid flat into the orbital plane.
    let flat = Quat::from_rotation_x(FRAC_PI_2);
    for index in 0..RING_COUNT {
        let line = ring(rng, index);
        let id = ctx.next_id();
        ctx.spawn_child(
            Entity::new(id).with_tag("ecliptic-ring").with_line(line),
            group,
            LocalTransform::new().with_rotation(flat),
        );
    }
    for _ in 0..RADIAL_COUNT {
        let line = radial_line(rng);
        let id = ctx.next_id();
        ctx.spawn_child(
            Entity::new(id).with_tag("ecliptic-radial").with_line(line),
            group,
            LocalTransform::new(),
        );
    }
    group
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn ring_is_closed() {
        let points = ring_points(2.0);
        assert_eq!(points.len(), 129);
        assert!((points[0] - points[128]).length() < 1e-5);
        assert!(points.iter().all(|p| (p.length() - 2.0).abs() < 1e-5 && p.z == 0.0));
    }

    #[test]
    fn rings_spread_outwards_and_darken() {
        let mut rng = ChaCha8Rng::seed_from_u64(9);
        let first = ring(&mut rng, 0);
        let last = ring(&mut rng, RING_COUNT - 1);
        assert!((first.points[0].length() - 1.1).abs() < 1e-5);
        let r = last.points[0].length();
        assert!(r > 1.1 + 19.0 * 0.075 - 1e-4 && r < 1.1 + 19.0 * 0.08 + 1e-4);

        let (_, _, l0) = first.colors[0].to_hsl();
        let (_, _, l19) = last.colors[0].to_hsl();
        assert!((l0 - 0.5).abs() < 1e-4);
        assert!(l19 < l0);
        assert!((0.5..1.5).contains(&first.width));
    }

    #[test]
    fn radial_line_points_outwards() {
        let mut rng = ChaCha8Rng::seed_from_u64(4);
        let line = radial_line(&mut rng);
        assert_eq!(line.points.len(), RADIAL_POINTS);
        assert_eq!(line.colors.len(), RADIAL_POINTS);
        let inner = line.points[0].length();
        assert!((1.1..1.2).contains(&inner));
        let outer = line.points[RADIAL_POINTS - 1].length();
        assert!((outer - inner - 9.0 / 8.0).abs() < 1e-4);
        assert!(line.points.iter().all(|p| p.y == 0.0));
    }

    #[test]
    fn group_holds_every_line() {
        let mut ctx = EngineContext::new();
        let root = ctx.next_id();
        ctx.spawn(Entity::new(root), LocalTransform::new());
        let group = spawn_ecliptic(&mut ctx, root, &mut ChaCha8Rng::seed_from_u64(2));

        assert_eq!(ctx.graph.get_children(group).unwrap().len(), RING_COUNT + RADIAL_COUNT);
        assert_eq!(ctx.scene.find_all_by_tag("ecliptic-ring").len(), RING_COUNT);

        // Flattened rings end up in the XZ plane.
        ctx.graph.propagate(&mut ctx.scene);
        let ring = ctx.scene.find_by_tag("ecliptic-ring").unwrap();
        let p = ring.line.as_ref().unwrap().points[32];
        let world = ring.world.transform_point3(p);
        assert!(world.y.abs() < 1e-5);
        assert!((world.length() - p.length()).abs() < 1e-5);
    }
}
