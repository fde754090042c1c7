use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Vec3};

/// Texture slot value meaning "no texture".
pub const NO_TEXTURE: f32 = -1.0;

/// One mesh draw: a geometry drawn with a material at a world transform.
/// Must match the host protocol: 32 floats = 128 bytes stride.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct MeshInstance {
    /// Column-major world matrix.
    pub model: [f32; 16],
    /// Base color (Standard/Basic) or rim color (Fresnel), rgba.
    pub color: [f32; 4],
    /// Emissive color (Standard) or facing color (Fresnel).
    pub emissive: [f32; 3],
    /// `Material::kind_code`.
    pub material: f32,
    pub geometry: f32,
    /// Texture id or [`NO_TEXTURE`].
    pub texture: f32,
    /// `Side::code`.
    pub side: f32,
    /// 0 = opaque, 1 = additive transparent.
    pub blend: f32,
    /// Fresnel bias, scale, power; zero for other materials.
    pub params: [f32; 4],
}

impl MeshInstance {
    pub const FLOATS: usize = 32;
    pub const STRIDE_BYTES: usize = Self::FLOATS * 4;

    pub fn model_matrix(&self) -> Mat4 {
        Mat4::from_cols_array(&self.model)
    }
}

/// Fat-line vertex. Consecutive vertices sharing a `strip` index form one polyline.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct LineVertex {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub r: f32,
    pub g: f32,
    pub b: f32,
    /// Line width in pixels.
    pub width: f32,
    pub strip: f32,
}

impl LineVertex {
    pub const FLOATS: usize = 8;

    pub fn position(&self) -> Vec3 {
        Vec3::new(self.x, self.y, self.z)
    }
}

/// Point-cloud vertex, drawn as a textured square of `size` world units.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct PointVertex {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub size: f32,
    pub texture: f32,
}

impl PointVertex {
    pub const FLOATS: usize = 8;
}

/// Camera-facing quad.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct SpriteInstance {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub size: f32,
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub opacity: f32,
    /// Screen-space rotation in radians.
    pub rotation: f32,
    pub texture: f32,
    pub _pad: [f32; 2],
}

impl SpriteInstance {
    pub const FLOATS: usize = 12;
}

/// Light source in world space.
/// Wire format (8 floats): `[x, y, z, kind, r, g, b, intensity]`.
/// For directional lights the position is the direction the light comes from.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct LightRecord {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub kind: f32,
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub intensity: f32,
}

impl LightRecord {
    pub const FLOATS: usize = 8;
}

/// Per-section record limits of a [`RenderFrame`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameCapacity {
    pub meshes: usize,
    pub lines: usize,
    pub points: usize,
    pub sprites: usize,
    pub lights: usize,
}

impl Default for FrameCapacity {
    fn default() -> Self {
        Self {
            meshes: 512,
            lines: 8192,
            points: 4096,
            sprites: 64,
            lights: 8,
        }
    }
}

/// Everything the host draws in one frame, rebuilt from the scene each tick.
///
/// Pushes beyond a section's capacity are dropped and flag the frame as
/// overflowed.
pub struct RenderFrame {
    pub meshes: Vec<MeshInstance>,
    pub lines: Vec<LineVertex>,
    pub points: Vec<PointVertex>,
    pub sprites: Vec<SpriteInstance>,
    pub lights: Vec<LightRecord>,
    capacity: FrameCapacity,
    next_strip: u32,
    overflowed: bool,
}

impl RenderFrame {
    pub fn new(capacity: FrameCapacity) -> Self {
        Self {
            meshes: Vec::with_capacity(capacity.meshes),
            lines: Vec::with_capacity(capacity.lines),
            points: Vec::with_capacity(capacity.points),
            sprites: Vec::with_capacity(capacity.sprites),
            lights: Vec::with_capacity(capacity.lights),
            capacity,
            next_strip: 0,
            overflowed: false,
        }
    }

    pub fn capacity(&self) -> FrameCapacity {
        self.capacity
    }

    pub fn clear(&mut self) {
        self.meshes.clear();
        self.lines.clear();
        self.points.clear();
        self.sprites.clear();
        self.lights.clear();
        self.next_strip = 0;
        self.overflowed = false;
    }

    /// True if any push was dropped since the last `clear`.
    pub fn overflowed(&self) -> bool {
        self.overflowed
    }

    pub fn push_mesh(&mut self, instance: MeshInstance) -> bool {
        push_bounded(&mut self.meshes, self.capacity.meshes, instance, &mut self.overflowed)
    }

    /// Append a whole polyline. Dropped entirely if it does not fit.
    pub fn push_line_strip(&mut self, vertices: impl ExactSizeIterator<Item = LineVertex>) -> bool {
        if self.lines.len() + vertices.len() > self.capacity.lines {
            self.overflowed = true;
            return false;
        }
        let strip = self.next_strip as f32;
        self.lines.extend(vertices.map(|v| LineVertex { strip, ..v }));
        self.next_strip += 1;
        true
    }

    pub fn push_point(&mut self, vertex: PointVertex) -> bool {
        push_bounded(&mut self.points, self.capacity.points, vertex, &mut self.overflowed)
    }

    pub fn push_sprite(&mut self, sprite: SpriteInstance) -> bool {
        push_bounded(&mut self.sprites, self.capacity.sprites, sprite, &mut self.overflowed)
    }

    pub fn push_light(&mut self, light: LightRecord) -> bool {
        push_bounded(&mut self.lights, self.capacity.lights, light, &mut self.overflowed)
    }

    pub fn mesh_count(&self) -> u32 {
        self.meshes.len() as u32
    }

    pub fn line_vertex_count(&self) -> u32 {
        self.lines.len() as u32
    }

    pub fn point_count(&self) -> u32 {
        self.points.len() as u32
    }

    pub fn sprite_count(&self) -> u32 {
        self.sprites.len() as u32
    }

    pub fn light_count(&self) -> u32 {
        self.lights.len() as u32
    }

    // Raw pointers for host reads out of WASM memory.

    pub fn meshes_ptr(&self) -> *const f32 {
        self.meshes.as_ptr() as *const f32
    }

    pub fn lines_ptr(&self) -> *const f32 {
        self.lines.as_ptr() as *const f32
    }

    pub fn points_ptr(&self) -> *const f32 {
        self.points.as_ptr() as *const f32
    }

    pub fn sprites_ptr(&self) -> *const f32 {
        self.sprites.as_ptr() as *const f32
    }

    pub fn lights_ptr(&self) -> *const f32 {
        self.lights.as_ptr() as *const f32
    }
}

impl Default for RenderFrame {
    fn default() -> Self {
        Self::new(FrameCapacity::default())
    }
}

fn push_bounded<T>(buf: &mut Vec<T>, cap: usize, item: T, overflowed: &mut bool) -> bool {
    if buf.len() >= cap {
        *overflowed = true;
        return false;
    }
    buf.push(item);
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_sizes_match_float_counts() {
        assert_eq!(std::mem::size_of::<MeshInstance>(), MeshInstance::FLOATS * 4);
        assert_eq!(std::mem::size_of::<LineVertex>(), LineVertex::FLOATS * 4);
        assert_eq!(std::mem::size_of::<PointVertex>(), PointVertex::FLOATS * 4);
        assert_eq!(std::mem::size_of::<SpriteInstance>(), SpriteInstance::FLOATS * 4);
        assert_eq!(std::mem::size_of::<LightRecord>(), LightRecord::FLOATS * 4);
    }

    #[test]
    fn pushes_beyond_capacity_are_dropped() {
        let mut frame = RenderFrame::new(FrameCapacity {
            sprites: 2,
            ..FrameCapacity::default()
        });
        assert!(frame.push_sprite(SpriteInstance::default()));
        assert!(frame.push_sprite(SpriteInstance::default()));
        assert!(!frame.overflowed());
        assert!(!frame.push_sprite(SpriteInstance::default()));
        assert_eq!(frame.sprite_count(), 2);
        assert!(frame.overflowed());

        frame.clear();
        assert_eq!(frame.sprite_count(), 0);
        assert!(!frame.overflowed());
    }

    #[test]
    fn line_strips_are_numbered_in_order() {
        let mut frame = RenderFrame::default();
        frame.push_line_strip(vec![LineVertex::default(); 3].into_iter());
        frame.push_line_strip(vec![LineVertex::default(); 2].into_iter());

        let strips: Vec<f32> = frame.lines.iter().map(|v| v.strip).collect();
        assert_eq!(strips, vec![0.0, 0.0, 0.0, 1.0, 1.0]);
    }

    #[test]
    fn oversized_strip_is_dropped_whole() {
        let mut frame = RenderFrame::new(FrameCapacity {
            lines: 4,
            ..FrameCapacity::default()
        });
        assert!(!frame.push_line_strip(vec![LineVertex::default(); 5].into_iter()));
        assert_eq!(frame.line_vertex_count(), 0);
        assert!(frame.overflowed());
    }
}
