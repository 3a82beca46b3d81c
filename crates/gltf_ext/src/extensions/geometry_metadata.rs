use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::codec;
use crate::error::ValidationError;
use crate::extensions::{ExtensionType, Extensions, Extras};
use crate::registry::Parent;

/// Axis-aligned bounds of a scene, in scene space.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SceneBounds {
    #[serde(default, serialize_with = "codec::serialize_canonical_f32_seq")]
    pub min: Vec<f32>,
    #[serde(default, serialize_with = "codec::serialize_canonical_f32_seq")]
    pub max: Vec<f32>,
}

impl SceneBounds {
    pub fn new(min: Vec3, max: Vec3) -> Self {
        Self {
            min: min.to_array().to_vec(),
            max: max.to_array().to_vec(),
        }
    }

    pub fn min_point(&self) -> Option<Vec3> {
        point(&self.min)
    }

    pub fn max_point(&self) -> Option<Vec3> {
        point(&self.max)
    }

    pub fn center(&self) -> Option<Vec3> {
        Some((self.min_point()? + self.max_point()?) * 0.5)
    }

    pub fn size(&self) -> Option<Vec3> {
        Some(self.max_point()? - self.min_point()?)
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.min.len() != self.max.len() {
            return Err(ValidationError::new(
                "sceneBounds",
                format!("min/max length mismatch ({} != {})", self.min.len(), self.max.len()),
            ));
        }
        if self.min.len() != 3 {
            return Err(ValidationError::new(
                "sceneBounds",
                format!("min/max must have 3 components, found {}", self.min.len()),
            ));
        }
        if !self.min.iter().chain(&self.max).all(|value| value.is_finite()) {
            return Err(ValidationError::new("sceneBounds", "min/max components must be finite"));
        }
        Ok(())
    }
}

fn point(components: &[f32]) -> Option<Vec3> {
    match components {
        [x, y, z] => Some(Vec3::new(*x, *y, *z)),
        _ => None,
    }
}

/// `FB_geometry_metadata`
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeometryMetadata {
    /// Vertices referenced by the scene, counting instanced meshes once per
    /// instance.
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        serialize_with = "codec::serialize_canonical_f64_opt"
    )]
    pub vertex_count: Option<f64>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        serialize_with = "codec::serialize_canonical_f64_opt"
    )]
    pub primitive_count: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scene_bounds: Option<SceneBounds>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extensions: Option<Extensions>,
    #[serde(default, deserialize_with = "codec::present", skip_serializing_if = "Option::is_none")]
    pub extras: Option<Extras>,
}

impl ExtensionType for GeometryMetadata {
    const NAME: &'static str = "FB_geometry_metadata";
    const PARENT: Parent = Parent::Scene;

    fn validate(&self) -> Result<(), ValidationError> {
        match &self.scene_bounds {
            Some(bounds) => bounds.validate(),
            None => Ok(()),
        }
    }
}
