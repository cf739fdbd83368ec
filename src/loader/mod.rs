use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use anyhow::{bail, Context, Result};

use crate::camera::Camera;
use crate::core::color::Color;
use crate::core::scene::{Background, Scene};
use crate::material::{Dielectric, DiffuseLight, Isotropic, Lambert, Material, Metal};
use crate::primitive::{
    AaRect, BoxShape, BvhAccel, ConstantMedium, FlipFace, Group, MovingSphere, Primitive, RectAxis,
    RotateY, Sphere, Translate,
};
use crate::renderer::{RenderParams, Renderer};
use crate::texture::{CheckerTex, ImageTex, NoiseTex, SolidColor, Texture};

/// Loads a scene description file and returns everything a render needs.
///
/// The file is a single JSON object with `render`, `camera`, optional
/// `background`, and the named resource arrays `textures`, `materials`,
/// `objects` plus a `lights` name list. Resources refer to each other by
/// name; a duplicate or unknown name is an error.
pub fn load<P: AsRef<Path>>(path: P) -> Result<(Scene, Camera, Renderer)> {
    let path = path.as_ref();
    let json_file = std::fs::File::open(path)
        .context(format!("scene: can't open scene file '{}'", path.display()))?;
    let json_reader = std::io::BufReader::new(json_file);
    let scene_value: serde_json::Value = serde_json::from_reader(json_reader)
        .context(format!("scene: '{}' is not valid JSON", path.display()))?;
    let base_dir = path.parent().unwrap_or_else(|| Path::new("."));

    let params = RenderParams::load(
        scene_value
            .get("render")
            .context("scene: no 'render' field")?,
    )?;
    let camera = Camera::load(
        scene_value
            .get("camera")
            .context("scene: no 'camera' field")?,
        params.aspect(),
    )?;
    let (shutter_time0, shutter_time1) = {
        let camera_value = scene_value.get("camera").context("scene: no 'camera' field")?;
        (
            get_float_field_or_default(camera_value, "camera", "time0", 0.0)?,
            get_float_field_or_default(camera_value, "camera", "time1", 0.0)?,
        )
    };
    let background = load_background(&scene_value)?;

    let textures = load_textures(&scene_value, base_dir)?;
    let materials = load_materials(&scene_value, &textures)?;
    let objects = load_objects(&scene_value, &materials, &textures)?;
    let lights = load_lights(&scene_value, &objects)?;

    let aggregate = BvhAccel::new(
        objects.iter().map(|(_, object)| object.clone()).collect(),
        shutter_time0,
        shutter_time1,
    )?;

    let scene = Scene::new(Arc::new(Primitive::from(aggregate)), lights, background);
    Ok((scene, camera, Renderer::new(params)))
}

fn load_background(value: &serde_json::Value) -> Result<Background> {
    let background_value = match value.get("background") {
        Some(background_value) => background_value,
        None => {
            return Ok(Background::Gradient {
                horizon: Color::WHITE,
                zenith: Color::new(0.5, 0.7, 1.0),
            })
        }
    };

    let env = "background";
    match get_str_field(background_value, env, "type")? {
        "solid" => {
            let color = get_float_array3_field(background_value, env, "color")?;
            Ok(Background::Solid(Color::new(color[0], color[1], color[2])))
        }
        "gradient" => {
            let horizon = get_float_array3_field(background_value, env, "horizon")?;
            let zenith = get_float_array3_field(background_value, env, "zenith")?;
            Ok(Background::Gradient {
                horizon: Color::new(horizon[0], horizon[1], horizon[2]),
                zenith: Color::new(zenith[0], zenith[1], zenith[2]),
            })
        }
        unknown => bail!("background: unknown type '{}'", unknown),
    }
}

fn load_textures(
    value: &serde_json::Value,
    base_dir: &Path,
) -> Result<HashMap<String, Arc<Texture>>> {
    let mut textures = HashMap::new();
    let texture_values = match value.get("textures") {
        Some(texture_values) => texture_values
            .as_array()
            .context("scene: 'textures' should be an array")?,
        None => return Ok(textures),
    };

    for texture_value in texture_values {
        let env = "texture";
        let name = get_str_field(texture_value, env, "name")?;
        let env = format!("texture '{}'", name);

        let texture = match get_str_field(texture_value, &env, "type")? {
            "solid_color" => {
                let color = get_float_array3_field(texture_value, &env, "color")?;
                Texture::from(SolidColor::new(Color::new(color[0], color[1], color[2])))
            }
            "checker" => {
                let even = get_str_field(texture_value, &env, "even")?;
                let odd = get_str_field(texture_value, &env, "odd")?;
                Texture::from(CheckerTex::new(
                    get_texture(&textures, &env, even)?,
                    get_texture(&textures, &env, odd)?,
                ))
            }
            "noise" => {
                let scale = get_float_field_or_default(texture_value, &env, "scale", 1.0)?;
                Texture::from(NoiseTex::new(scale))
            }
            "image" => {
                let file = get_str_field(texture_value, &env, "file")?;
                Texture::from(ImageTex::load(base_dir.join(file))?)
            }
            unknown => bail!("{}: unknown type '{}'", env, unknown),
        };

        if textures
            .insert(name.to_string(), Arc::new(texture))
            .is_some()
        {
            bail!("texture: duplicated name '{}'", name);
        }
    }
    Ok(textures)
}

fn load_materials(
    value: &serde_json::Value,
    textures: &HashMap<String, Arc<Texture>>,
) -> Result<HashMap<String, Arc<Material>>> {
    let mut materials = HashMap::new();
    let material_values = match value.get("materials") {
        Some(material_values) => material_values
            .as_array()
            .context("scene: 'materials' should be an array")?,
        None => return Ok(materials),
    };

    for material_value in material_values {
        let env = "material";
        let name = get_str_field(material_value, env, "name")?;
        let env = format!("material '{}'", name);

        let material = match get_str_field(material_value, &env, "type")? {
            "lambertian" => {
                let texture = get_str_field(material_value, &env, "texture")?;
                Material::from(Lambert::new(get_texture(textures, &env, texture)?))
            }
            "metal" => {
                let color = get_float_array3_field(material_value, &env, "color")?;
                let fuzz = get_float_field_or_default(material_value, &env, "fuzz", 0.0)?;
                Material::from(Metal::new(Color::new(color[0], color[1], color[2]), fuzz))
            }
            "dielectric" => {
                let refraction_index =
                    get_float_field(material_value, &env, "refraction_index")?;
                Material::from(Dielectric::new(refraction_index))
            }
            "diffuse_light" => {
                let texture = get_str_field(material_value, &env, "texture")?;
                Material::from(DiffuseLight::new(get_texture(textures, &env, texture)?))
            }
            "isotropic" => {
                let texture = get_str_field(material_value, &env, "texture")?;
                Material::from(Isotropic::new(get_texture(textures, &env, texture)?))
            }
            unknown => bail!("{}: unknown type '{}'", env, unknown),
        };

        if materials
            .insert(name.to_string(), Arc::new(material))
            .is_some()
        {
            bail!("material: duplicated name '{}'", name);
        }
    }
    Ok(materials)
}

fn load_objects(
    value: &serde_json::Value,
    materials: &HashMap<String, Arc<Material>>,
    textures: &HashMap<String, Arc<Texture>>,
) -> Result<Vec<(String, Arc<Primitive>)>> {
    let mut objects = Vec::new();
    let object_values = match value.get("objects") {
        Some(object_values) => object_values
            .as_array()
            .context("scene: 'objects' should be an array")?,
        None => return Ok(objects),
    };

    for object_value in object_values {
        let name = get_str_field(object_value, "object", "name")?;
        if objects.iter().any(|(existing, _)| existing == name) {
            bail!("object: duplicated name '{}'", name);
        }
        let env = format!("object '{}'", name);
        let object = load_object(object_value, &env, materials, textures)?;
        objects.push((name.to_string(), object));
    }
    Ok(objects)
}

/// Loads one object. Combinators (`translate`, `rotate_y`, `flip_face`,
/// `constant_medium`) nest their operand inline under an `object` field,
/// so wrapped shapes never appear in the aggregate on their own.
fn load_object(
    value: &serde_json::Value,
    env: &str,
    materials: &HashMap<String, Arc<Material>>,
    textures: &HashMap<String, Arc<Texture>>,
) -> Result<Arc<Primitive>> {
    let primitive = match get_str_field(value, env, "type")? {
        "sphere" => {
            let center = get_float_array3_field(value, env, "center")?;
            let radius = get_float_field(value, env, "radius")?;
            let material = get_material(materials, env, get_str_field(value, env, "material")?)?;
            Primitive::from(Sphere::new(center.into(), radius, material))
        }
        "moving_sphere" => {
            let center0 = get_float_array3_field(value, env, "center0")?;
            let center1 = get_float_array3_field(value, env, "center1")?;
            let time0 = get_float_field(value, env, "time0")?;
            let time1 = get_float_field(value, env, "time1")?;
            let radius = get_float_field(value, env, "radius")?;
            let material = get_material(materials, env, get_str_field(value, env, "material")?)?;
            Primitive::from(MovingSphere::new(
                center0.into(),
                center1.into(),
                time0,
                time1,
                radius,
                material,
            ))
        }
        "rect" => {
            let axis = match get_str_field(value, env, "axis")? {
                "xy" => RectAxis::Xy,
                "xz" => RectAxis::Xz,
                "yz" => RectAxis::Yz,
                unknown => bail!("{}: unknown axis '{}'", env, unknown),
            };
            let a0 = get_float_field(value, env, "a0")?;
            let a1 = get_float_field(value, env, "a1")?;
            let b0 = get_float_field(value, env, "b0")?;
            let b1 = get_float_field(value, env, "b1")?;
            let k = get_float_field(value, env, "k")?;
            let material = get_material(materials, env, get_str_field(value, env, "material")?)?;
            Primitive::from(AaRect::new(axis, a0, a1, b0, b1, k, material))
        }
        "box" => {
            let min = get_float_array3_field(value, env, "min")?;
            let max = get_float_array3_field(value, env, "max")?;
            let material = get_material(materials, env, get_str_field(value, env, "material")?)?;
            Primitive::from(BoxShape::new(min.into(), max.into(), material))
        }
        "translate" => {
            let offset = get_float_array3_field(value, env, "offset")?;
            let inner = load_inner_object(value, env, materials, textures)?;
            Primitive::from(Translate::new(inner, offset.into()))
        }
        "rotate_y" => {
            let angle = get_float_field(value, env, "angle")?;
            let inner = load_inner_object(value, env, materials, textures)?;
            Primitive::from(RotateY::new(inner, angle))
        }
        "flip_face" => {
            let inner = load_inner_object(value, env, materials, textures)?;
            Primitive::from(FlipFace::new(inner))
        }
        "constant_medium" => {
            let density = get_float_field(value, env, "density")?;
            let texture = get_texture(textures, env, get_str_field(value, env, "texture")?)?;
            let boundary = load_inner_object(value, env, materials, textures)?;
            Primitive::from(ConstantMedium::new(boundary, density, texture))
        }
        unknown => bail!("{}: unknown type '{}'", env, unknown),
    };
    Ok(Arc::new(primitive))
}

fn load_inner_object(
    value: &serde_json::Value,
    env: &str,
    materials: &HashMap<String, Arc<Material>>,
    textures: &HashMap<String, Arc<Texture>>,
) -> Result<Arc<Primitive>> {
    let inner_value = value
        .get("object")
        .context(format!("{}: no 'object' field", env))?;
    load_object(inner_value, env, materials, textures)
}

fn load_lights(
    value: &serde_json::Value,
    objects: &[(String, Arc<Primitive>)],
) -> Result<Option<Arc<Primitive>>> {
    let light_values = match value.get("lights") {
        Some(light_values) => light_values
            .as_array()
            .context("scene: 'lights' should be an array")?,
        None => return Ok(None),
    };
    if light_values.is_empty() {
        return Ok(None);
    }

    let mut lights = Vec::with_capacity(light_values.len());
    for light_value in light_values {
        let name = light_value
            .as_str()
            .context("lights: entries should be object names")?;
        let object = objects
            .iter()
            .find(|(existing, _)| existing == name)
            .map(|(_, object)| object.clone())
            .context(format!("lights: unknown object name '{}'", name))?;
        lights.push(object);
    }
    Ok(Some(Arc::new(Primitive::from(Group::new(lights)))))
}

fn get_texture(
    textures: &HashMap<String, Arc<Texture>>,
    env: &str,
    name: &str,
) -> Result<Arc<Texture>> {
    textures
        .get(name)
        .cloned()
        .context(format!("{}: unknown texture name '{}'", env, name))
}

fn get_material(
    materials: &HashMap<String, Arc<Material>>,
    env: &str,
    name: &str,
) -> Result<Arc<Material>> {
    materials
        .get(name)
        .cloned()
        .context(format!("{}: unknown material name '{}'", env, name))
}

pub fn get_str_field<'a>(value: &'a serde_json::Value, env: &str, field: &str) -> Result<&'a str> {
    let field_value = value
        .get(field)
        .context(format!("{}: no '{}' field", env, field))?;
    field_value
        .as_str()
        .context(format!("{}: '{}' should be a string", env, field))
}

pub fn get_float_field(value: &serde_json::Value, env: &str, field: &str) -> Result<f32> {
    let field_value = value
        .get(field)
        .context(format!("{}: no '{}' field", env, field))?;
    field_value
        .as_f64()
        .map(|f| f as f32)
        .context(format!("{}: '{}' should be a float", env, field))
}

pub fn get_float_field_or_default(
    value: &serde_json::Value,
    env: &str,
    field: &str,
    default: f32,
) -> Result<f32> {
    if let Some(field_value) = value.get(field) {
        field_value
            .as_f64()
            .map(|f| f as f32)
            .context(format!("{}: '{}' should be a float", env, field))
    } else {
        Ok(default)
    }
}

pub fn get_int_field(value: &serde_json::Value, env: &str, field: &str) -> Result<u32> {
    let field_value = value
        .get(field)
        .context(format!("{}: no '{}' field", env, field))?;
    field_value
        .as_u64()
        .map(|i| i as u32)
        .context(format!("{}: '{}' should be an int", env, field))
}

pub fn get_int_field_option(
    value: &serde_json::Value,
    env: &str,
    field: &str,
) -> Result<Option<u32>> {
    if let Some(field_value) = value.get(field) {
        field_value
            .as_u64()
            .map(|i| Some(i as u32))
            .context(format!("{}: '{}' should be an int", env, field))
    } else {
        Ok(None)
    }
}

pub fn get_float_array3_field(
    value: &serde_json::Value,
    env: &str,
    field: &str,
) -> Result<[f32; 3]> {
    let field_value = value
        .get(field)
        .context(format!("{}: no '{}' field", env, field))?;
    let error_info = format!("{}: '{}' should be an array with 3 floats", env, field);
    let arr = field_value.as_array().context(error_info.clone())?;
    if arr.len() == 3 {
        let arr0 = arr[0].as_f64().context(error_info.clone())? as f32;
        let arr1 = arr[1].as_f64().context(error_info.clone())? as f32;
        let arr2 = arr[2].as_f64().context(error_info)? as f32;
        Ok([arr0, arr1, arr2])
    } else {
        bail!(error_info)
    }
}
