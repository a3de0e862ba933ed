//! WGSL sources for the network renderer.
//!
//! Both shaders share the [`Uniforms`](super::Uniforms) block at
//! `@group(0) @binding(0)`.

/// Points, drawn as camera-facing discs (6 vertices per instance).
pub const NODE_SHADER: &str = r#"
struct Uniforms {
    view: mat4x4<f32>,
    proj: mat4x4<f32>,
    line_color: vec3<f32>,
    node_radius: f32,
};

@group(0) @binding(0) var<uniform> uniforms: Uniforms;

struct VertexOutput {
    @builtin(position) clip_position: vec4<f32>,
    @location(0) color: vec3<f32>,
    @location(1) uv: vec2<f32>,
};

@vertex
fn vs_main(
    @builtin(vertex_index) vertex_index: u32,
    @location(0) node: vec4<f32>,
    @location(1) color: vec3<f32>,
) -> VertexOutput {
    var quad_vertices = array<vec2<f32>, 6>(
        vec2<f32>(-1.0, -1.0),
        vec2<f32>( 1.0, -1.0),
        vec2<f32>(-1.0,  1.0),
        vec2<f32>(-1.0,  1.0),
        vec2<f32>( 1.0, -1.0),
        vec2<f32>( 1.0,  1.0),
    );

    let quad_pos = quad_vertices[vertex_index];
    let radius = uniforms.node_radius * node.w;

    let view_pos = uniforms.view * vec4<f32>(node.xyz, 1.0);
    let corner = vec4<f32>(view_pos.xy + quad_pos * radius, view_pos.z, view_pos.w);

    var out: VertexOutput;
    out.clip_position = uniforms.proj * corner;
    out.color = color;
    out.uv = quad_pos;
    return out;
}

@fragment
fn fs_main(in: VertexOutput) -> @location(0) vec4<f32> {
    let dist = length(in.uv);
    if dist > 1.0 {
        discard;
    }
    let alpha = 1.0 - smoothstep(0.8, 1.0, dist);
    return vec4<f32>(in.color, alpha);
}
"#;

/// Links, drawn as a line list: one instance per link, two vertices each.
/// The storage buffer holds `vec4` pairs `(a.xyz, opacity), (b.xyz, 0)`.
pub const LINK_SHADER: &str = r#"
struct Uniforms {
    view: mat4x4<f32>,
    proj: mat4x4<f32>,
    line_color: vec3<f32>,
    node_radius: f32,
};

@group(0) @binding(0) var<uniform> uniforms: Uniforms;
@group(0) @binding(1) var<storage, read> links: array<vec4<f32>>;

struct VertexOutput {
    @builtin(position) clip_position: vec4<f32>,
    @location(0) alpha: f32,
};

@vertex
fn vs_main(
    @builtin(vertex_index) vertex_index: u32,
    @builtin(instance_index) instance_index: u32,
) -> VertexOutput {
    let a = links[instance_index * 2u];
    let b = links[instance_index * 2u + 1u];

    var pos = a.xyz;
    if vertex_index == 1u {
        pos = b.xyz;
    }

    var out: VertexOutput;
    out.clip_position = uniforms.proj * uniforms.view * vec4<f32>(pos, 1.0);
    out.alpha = a.w;
    return out;
}

@fragment
fn fs_main(in: VertexOutput) -> @location(0) vec4<f32> {
    return vec4<f32>(uniforms.line_color, in.alpha);
}
"#;

#[cfg(test)]
mod tests {
    use super::*;

    /// Validates WGSL code using naga.
    fn validate_wgsl(code: &str) -> Result<(), String> {
        let module = naga::front::wgsl::parse_str(code)
            .map_err(|e| format!("WGSL parse error: {:?}", e))?;

        let mut validator = naga::valid::Validator::new(
            naga::valid::ValidationFlags::all(),
            naga::valid::Capabilities::all(),
        );
        validator
            .validate(&module)
            .map_err(|e| format!("WGSL validation error: {:?}", e))?;

        Ok(())
    }

    #[test]
    fn test_node_shader_valid() {
        validate_wgsl(NODE_SHADER).expect("node shader should be valid");
    }

    #[test]
    fn test_link_shader_valid() {
        validate_wgsl(LINK_SHADER).expect("link shader should be valid");
    }

    #[test]
    fn test_shaders_share_uniform_layout() {
        let block = |src: &str| {
            let start = src.find("struct Uniforms").unwrap();
            let end = start + src[start..].find("};").unwrap();
            src[start..end].to_string()
        };
        assert_eq!(block(NODE_SHADER), block(LINK_SHADER));
    }
}
