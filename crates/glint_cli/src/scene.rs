//! JSON scene descriptions and built-in presets.
//!
//! A description owns plain data only. Building it produces the objects the
//! caller keeps alive while a borrowing [`Scene`](glint_renderer::Scene)
//! renders them.

use glint_renderer::{
    Camera, Hittable, Material, Plane, RenderConfig, SceneError, SceneResult, Sphere, Vec3,
};
use serde::{Deserialize, Serialize};

/// Built-in scenes: name and one-line summary.
pub const PRESETS: &[(&str, &str)] = &[
    (
        "reflection",
        "blue sphere inside a half-mirrored sphere around the camera",
    ),
    (
        "mirrors",
        "two facing perfect mirrors, bounded by the bounce limit",
    ),
];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneDescription {
    #[serde(default)]
    pub camera: CameraDescription,
    #[serde(default)]
    pub render: RenderDescription,
    pub objects: Vec<ObjectDescription>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraDescription {
    pub width: u32,
    pub height: u32,
    pub look_from: [f32; 3],
    pub look_at: [f32; 3],
    pub up: [f32; 3],
    /// Vertical field of view in degrees
    pub vfov: f32,
}

impl Default for CameraDescription {
    fn default() -> Self {
        Self {
            width: 100,
            height: 100,
            look_from: [0.0, 0.0, 0.0],
            look_at: [0.0, 0.0, 1.0],
            up: [0.0, 1.0, 0.0],
            vfov: 90.0,
        }
    }
}

/// Overrides for [`RenderConfig`]; missing fields keep the defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderDescription {
    pub max_depth: Option<u32>,
    pub background: Option<[f32; 3]>,
    pub ambient: Option<f32>,
    pub light_position: Option<[f32; 3]>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ObjectDescription {
    Sphere {
        center: [f32; 3],
        radius: f32,
        material: MaterialDescription,
    },
    Plane {
        point: [f32; 3],
        normal: [f32; 3],
        material: MaterialDescription,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaterialDescription {
    /// RGB on the 0-255 scale
    pub color: [f32; 3],
    #[serde(default)]
    pub reflectance: f32,
}

impl MaterialDescription {
    fn build(&self) -> Material {
        Material::from_color(Vec3::from_array(self.color), self.reflectance)
    }
}

impl SceneDescription {
    /// Parse a JSON scene description.
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    /// Look up a built-in scene by name.
    pub fn preset(name: &str) -> Option<Self> {
        match name {
            "reflection" => Some(Self {
                camera: CameraDescription::default(),
                render: RenderDescription::default(),
                objects: vec![
                    ObjectDescription::Sphere {
                        center: [4.0, 0.0, 5.0],
                        radius: 2.0,
                        material: MaterialDescription {
                            color: [0.0, 0.0, 255.0],
                            reflectance: 0.0,
                        },
                    },
                    ObjectDescription::Sphere {
                        center: [0.0, 0.0, 0.0],
                        radius: 5.0,
                        material: MaterialDescription {
                            color: [255.0, 255.0, 255.0],
                            reflectance: 0.5,
                        },
                    },
                ],
            }),
            "mirrors" => {
                let mirror = MaterialDescription {
                    color: [255.0, 255.0, 255.0],
                    reflectance: 1.0,
                };
                Some(Self {
                    camera: CameraDescription::default(),
                    render: RenderDescription::default(),
                    objects: vec![
                        ObjectDescription::Plane {
                            point: [0.0, 0.0, 20.0],
                            normal: [0.0, 0.0, -1.0],
                            material: mirror.clone(),
                        },
                        ObjectDescription::Plane {
                            point: [0.0, 0.0, -20.0],
                            normal: [0.0, 0.0, 1.0],
                            material: mirror,
                        },
                    ],
                })
            }
            _ => None,
        }
    }

    /// Build the camera. Invalid settings are rejected here.
    pub fn build_camera(&self) -> SceneResult<Camera> {
        let c = &self.camera;
        Camera::new(c.width, c.height)?
            .with_position(
                Vec3::from_array(c.look_from),
                Vec3::from_array(c.look_at),
                Vec3::from_array(c.up),
            )?
            .with_fov(c.vfov)
    }

    /// Build every object, failing on the first invalid one so a bad scene
    /// never starts rendering.
    pub fn build_objects(&self) -> SceneResult<Vec<Box<dyn Hittable>>> {
        self.objects
            .iter()
            .map(|object| {
                let built: Box<dyn Hittable> = match object {
                    ObjectDescription::Sphere {
                        center,
                        radius,
                        material,
                    } => Box::new(Sphere::new(
                        Vec3::from_array(*center),
                        *radius,
                        material.build(),
                    )?),
                    ObjectDescription::Plane {
                        point,
                        normal,
                        material,
                    } => Box::new(Plane::new(
                        Vec3::from_array(*point),
                        Vec3::from_array(*normal),
                        material.build(),
                    )?),
                };
                Ok::<_, SceneError>(built)
            })
            .collect()
    }

    /// Render settings with this description's overrides applied.
    pub fn render_config(&self) -> RenderConfig {
        let defaults = RenderConfig::default();
        let r = &self.render;
        RenderConfig {
            max_depth: r.max_depth.unwrap_or(defaults.max_depth),
            background: r.background.map_or(defaults.background, Vec3::from_array),
            ambient: r.ambient.unwrap_or(defaults.ambient),
            light_position: r.light_position.map_or(defaults.light_position, Vec3::from_array),
            ..defaults
        }
    }
}
