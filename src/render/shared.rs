pub(crate) const SHADER: &str = r#"
struct GlobalUniform {
    view_proj: mat4x4<f32>,
    camera_position: vec4<f32>,
    light_direction: vec4<f32>,
    light_color: vec4<f32>,
    ambient: vec4<f32>,
}

struct ObjectConstants {
    model: mat4x4<f32>,
    normal: mat3x4<f32>,
    base_color: vec4<f32>,
    // roughness, metalness, vertex color switch, unused
    material: vec4<f32>,
}

@group(0) @binding(0)
var<uniform> globals: GlobalUniform;

@group(1) @binding(0)
var<uniform> object: ObjectConstants;

struct VertexInput {
    @location(0) position: vec3<f32>,
    @location(1) normal: vec3<f32>,
    @location(2) color: vec3<f32>,
}

struct VertexOutput {
    @builtin(position) position: vec4<f32>,
    @location(0) world_pos: vec3<f32>,
    @location(1) normal: vec3<f32>,
    @location(2) albedo: vec3<f32>,
}

@vertex
fn vs_main(input: VertexInput) -> VertexOutput {
    var out: VertexOutput;
    let world_position = object.model * vec4<f32>(input.position, 1.0);
    out.position = globals.view_proj * world_position;
    out.world_pos = world_position.xyz;

    let world_normal = mat3x3<f32>(
        object.normal[0].xyz,
        object.normal[1].xyz,
        object.normal[2].xyz
    ) * input.normal;
    out.normal = normalize(world_normal);

    out.albedo = mix(object.base_color.rgb, input.color, object.material.z);
    return out;
}

@fragment
fn fs_main(input: VertexOutput) -> @location(0) vec4<f32> {
    let roughness = clamp(object.material.x, 0.04, 1.0);
    let metalness = clamp(object.material.y, 0.0, 1.0);

    let normal = normalize(input.normal);
    let light_dir = normalize(globals.light_direction.xyz);
    let view_dir = normalize(globals.camera_position.xyz - input.world_pos);
    let half_dir = normalize(light_dir + view_dir);

    let n_dot_l = max(dot(normal, light_dir), 0.0);
    let n_dot_h = max(dot(normal, half_dir), 0.0);

    // Blinn-Phong lobe matched to a GGX roughness of the same value.
    let alpha = roughness * roughness;
    let shininess = max(2.0 / (alpha * alpha) - 2.0, 1.0);
    let lobe = pow(n_dot_h, shininess) * (shininess + 8.0) / 25.132741;

    let f0 = mix(vec3<f32>(0.04), input.albedo, metalness);
    let radiance = globals.light_color.rgb * globals.light_color.w;

    let diffuse = input.albedo * (1.0 - metalness * 0.5) * n_dot_l;
    let specular = f0 * lobe * n_dot_l;
    let ambient = input.albedo * globals.ambient.rgb;

    let lit = ambient + (diffuse + specular) * radiance;
    return vec4<f32>(min(lit, vec3<f32>(1.0)), 1.0);
}
"#;
