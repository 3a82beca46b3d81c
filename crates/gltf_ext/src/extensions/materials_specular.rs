use glam::Vec3;
use serde::{Deserialize, Serialize, Serializer};

use crate::codec::{self, defaulted_f32};
use crate::error::{check_range, ValidationError};
use crate::extensions::{ExtensionType, Extensions, Extras, TextureInfo};
use crate::registry::Parent;

defaulted_f32! {
    /// Strength of the specular reflection, in `[0, 1]`.
    pub struct SpecularFactor = 1.0;
}

/// F0 color of the specular reflection, linear RGB.
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
#[serde(transparent)]
pub struct SpecularColorFactor(pub Vec3);

impl Default for SpecularColorFactor {
    fn default() -> Self {
        Self(Vec3::ONE)
    }
}

impl Serialize for SpecularColorFactor {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        codec::serialize_canonical_f32_seq(&self.0.to_array(), serializer)
    }
}

/// `KHR_materials_specular`
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MaterialsSpecular {
    #[serde(default, skip_serializing_if = "codec::is_default")]
    pub specular_factor: SpecularFactor,
    /// Strength is read from the alpha channel.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub specular_texture: Option<TextureInfo>,
    #[serde(default, skip_serializing_if = "codec::is_default")]
    pub specular_color_factor: SpecularColorFactor,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub specular_color_texture: Option<TextureInfo>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extensions: Option<Extensions>,
    #[serde(default, deserialize_with = "codec::present", skip_serializing_if = "Option::is_none")]
    pub extras: Option<Extras>,
}

impl MaterialsSpecular {
    pub fn factor(&self) -> f32 {
        self.specular_factor.0
    }

    pub fn set_factor(&mut self, factor: f32) -> &mut Self {
        self.specular_factor = factor.into();
        self
    }

    pub fn color(&self) -> Vec3 {
        self.specular_color_factor.0
    }

    pub fn set_color(&mut self, color: Vec3) -> &mut Self {
        self.specular_color_factor = SpecularColorFactor(color);
        self
    }
}

impl ExtensionType for MaterialsSpecular {
    const NAME: &'static str = "KHR_materials_specular";
    const PARENT: Parent = Parent::Material;

    fn validate(&self) -> Result<(), ValidationError> {
        check_range("specularFactor", self.factor(), 0.0, 1.0)?;
        if !self.color().is_finite() {
            return Err(ValidationError::new(
                "specularColorFactor",
                format!("{} has a non-finite component", self.color()),
            ));
        }
        if self.color().min_element() < 0.0 {
            return Err(ValidationError::new(
                "specularColorFactor",
                format!("{} has a negative component", self.color()),
            ));
        }
        Ok(())
    }
}
