use glam::Vec3;
use crate::components::color::Color;

/// Rim-glow material parameters.
///
/// The reflection factor `bias + scale * (1 + dot(I, N))^power` blends from
/// `facing` (looking straight at the surface) to `rim` (grazing angles).
/// Rendered transparent with additive blending.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FresnelParams {
    pub rim: Color,
    pub facing: Color,
    pub bias: f32,
    pub scale: f32,
    pub power: f32,
}

impl Default for FresnelParams {
    fn default() -> Self {
        Self {
            rim: Color::from_hex(0x0088ff),
            facing: Color::BLACK,
            bias: 0.2,
            scale: 1.5,
            power: 4.0,
        }
    }
}

impl FresnelParams {
    pub fn new(rim_hex: u32, facing_hex: u32) -> Self {
        Self {
            rim: Color::from_hex(rim_hex),
            facing: Color::from_hex(facing_hex),
            ..Self::default()
        }
    }

    /// Unclamped reflection factor for a view ray `view_dir` (camera to
    /// surface) hitting a surface with normal `normal`.
    pub fn reflection_factor(&self, view_dir: Vec3, normal: Vec3) -> f32 {
        let i = view_dir.normalize_or_zero();
        let n = normal.normalize_or_zero();
        self.bias + self.scale * (1.0 + i.dot(n)).max(0.0).powf(self.power)
    }

    /// Fragment color and alpha for a given reflection factor, matching
    /// `fs_main` in [`FRESNEL_WGSL`].
    pub fn shade(&self, factor: f32) -> [f32; 4] {
        let f = factor.clamp(0.0, 1.0);
        let c = self.facing.lerp(self.rim, f);
        [c.r, c.g, c.b, f]
    }
}

/// WGSL for the Fresnel mesh material. Instance attributes follow the
/// `MeshInstance` layout: rim color in `color`, facing color in
/// `emissive`, bias/scale/power in `params`.
pub const FRESNEL_WGSL: &str = r#"
struct Camera {
    view_proj: mat4x4<f32>,
    position: vec4<f32>,
};

@group(0) @binding(0)
var<uniform> camera: Camera;

struct VertexInput {
    @location(0) position: vec3<f32>,
    @location(1) normal: vec3<f32>,
};

struct InstanceInput {
    @location(2) model_0: vec4<f32>,
    @location(3) model_1: vec4<f32>,
    @location(4) model_2: vec4<f32>,
    @location(5) model_3: vec4<f32>,
    @location(6) color: vec4<f32>,
    @location(7) emissive: vec4<f32>,
    @location(8) ids: vec4<f32>,
    @location(9) params: vec4<f32>,
};

struct VertexOutput {
    @builtin(position) clip_position: vec4<f32>,
    @location(0) reflection: f32,
    @location(1) rim: vec3<f32>,
    @location(2) facing: vec3<f32>,
};

@vertex
fn vs_main(vertex: VertexInput, inst: InstanceInput) -> VertexOutput {
    let model = mat4x4<f32>(inst.model_0, inst.model_1, inst.model_2, inst.model_3);
    let world_position = model * vec4<f32>(vertex.position, 1.0);
    let world_normal = normalize(mat3x3<f32>(model[0].xyz, model[1].xyz, model[2].xyz) * vertex.normal);
    let i = normalize(world_position.xyz - camera.position.xyz);

    var out: VertexOutput;
    out.clip_position = camera.view_proj * world_position;
    out.reflection = inst.params.x + inst.params.y * pow(max(1.0 + dot(i, world_normal), 0.0), inst.params.z);
    out.rim = inst.color.rgb;
    out.facing = inst.emissive.rgb;
    return out;
}

@fragment
fn fs_main(in: VertexOutput) -> @location(0) vec4<f32> {
    let f = clamp(in.reflection, 0.0, 1.0);
    return vec4<f32>(mix(in.facing, in.rim, vec3<f32>(f)), f);
}
"#;
