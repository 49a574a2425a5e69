pub(crate) const SHADER: &str = r#"
struct Light {
    position: vec4<f32>,
    direction: vec4<f32>,
    ambient: vec4<f32>,
    diffuse: vec4<f32>,
    specular: vec4<f32>,
    // constant, linear, quadratic, cutoff cosine
    attenuation: vec4<f32>,
}

struct GlobalUniform {
    projection: mat4x4<f32>,
    view: mat4x4<f32>,
    eye_position: vec4<f32>,
    material_ambient: vec4<f32>,
    material_diffuse: vec4<f32>,
    material_specular: vec4<f32>,
    directional: Light,
    points: array<Light, 2>,
    spot: Light,
}

struct ObjectConstants {
    model: mat4x4<f32>,
    normal: mat3x4<f32>,
    color: vec4<f32>,
}

@group(0) @binding(0)
var<uniform> globals: GlobalUniform;

@group(1) @binding(0)
var<uniform> object: ObjectConstants;

struct VertexInput {
    @location(0) position: vec3<f32>,
    @location(1) normal: vec3<f32>,
}

struct VertexOutput {
    @builtin(position) position: vec4<f32>,
    @location(0) world_pos: vec3<f32>,
    @location(1) normal: vec3<f32>,
}

@vertex
fn vs_main(input: VertexInput) -> VertexOutput {
    var out: VertexOutput;
    let world_position = object.model * vec4<f32>(input.position, 1.0);
    out.position = globals.projection * globals.view * world_position;
    out.world_pos = world_position.xyz;

    let world_normal = mat3x3<f32>(
        object.normal[0].xyz,
        object.normal[1].xyz,
        object.normal[2].xyz
    ) * input.normal;

    out.normal = normalize(world_normal);
    return out;
}

fn phong(light: Light, light_dir: vec3<f32>, normal: vec3<f32>, view_dir: vec3<f32>) -> vec3<f32> {
    let diff = max(dot(normal, light_dir), 0.0);
    let reflect_dir = reflect(-light_dir, normal);
    let shininess = globals.material_specular.w;
    let spec = pow(max(dot(view_dir, reflect_dir), 0.0), shininess);

    let ambient = light.ambient.rgb * globals.material_ambient.rgb;
    let diffuse = light.diffuse.rgb * diff * globals.material_diffuse.rgb;
    let specular = light.specular.rgb * spec * globals.material_specular.rgb;
    return ambient + diffuse + specular;
}

fn attenuate(light: Light, world_pos: vec3<f32>) -> f32 {
    let dist = length(light.position.xyz - world_pos);
    let terms = light.attenuation;
    return 1.0 / (terms.x + terms.y * dist + terms.z * dist * dist);
}

fn directional_light(light: Light, normal: vec3<f32>, view_dir: vec3<f32>) -> vec3<f32> {
    return phong(light, normalize(-light.direction.xyz), normal, view_dir);
}

fn point_light(light: Light, normal: vec3<f32>, world_pos: vec3<f32>, view_dir: vec3<f32>) -> vec3<f32> {
    let light_dir = normalize(light.position.xyz - world_pos);
    return phong(light, light_dir, normal, view_dir) * attenuate(light, world_pos);
}

fn spot_light(light: Light, normal: vec3<f32>, world_pos: vec3<f32>, view_dir: vec3<f32>) -> vec3<f32> {
    let light_dir = normalize(light.position.xyz - world_pos);
    let theta = dot(light_dir, normalize(-light.direction.xyz));
    if theta > light.attenuation.w {
        return phong(light, light_dir, normal, view_dir) * attenuate(light, world_pos);
    }
    // Outside the cone only the ambient term remains.
    return light.ambient.rgb * globals.material_ambient.rgb;
}

@fragment
fn fs_lit(input: VertexOutput) -> @location(0) vec4<f32> {
    let normal = normalize(input.normal);
    let view_dir = normalize(globals.eye_position.xyz - input.world_pos);

    var color = directional_light(globals.directional, normal, view_dir);
    for (var i = 0u; i < 2u; i = i + 1u) {
        color = color + point_light(globals.points[i], normal, input.world_pos, view_dir);
    }
    color = color + spot_light(globals.spot, normal, input.world_pos, view_dir);
    return vec4<f32>(color * object.color.rgb, 1.0);
}

@fragment
fn fs_unlit(input: VertexOutput) -> @location(0) vec4<f32> {
    return object.color;
}
"#;
