use serde::{Deserialize, Serialize};

use crate::codec::{self, defaulted_f32};
use crate::error::{check_finite, check_range, ValidationError};
use crate::extensions::{ExtensionType, Extensions, Extras, TextureInfo};
use crate::registry::Parent;

defaulted_f32! {
    /// Strength of the anisotropy, in `[0, 1]`.
    pub struct AnisotropyStrength = 0.0;
}

defaulted_f32! {
    /// Rotation of the anisotropy direction in tangent space, in radians.
    pub struct AnisotropyRotation = 0.0;
}

/// `KHR_materials_anisotropy`
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MaterialsAnisotropy {
    #[serde(default, skip_serializing_if = "codec::is_default")]
    pub anisotropy_strength: AnisotropyStrength,
    #[serde(default, skip_serializing_if = "codec::is_default")]
    pub anisotropy_rotation: AnisotropyRotation,
    /// Red and green hold the direction, blue the strength.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub anisotropy_texture: Option<TextureInfo>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extensions: Option<Extensions>,
    #[serde(default, deserialize_with = "codec::present", skip_serializing_if = "Option::is_none")]
    pub extras: Option<Extras>,
}

impl MaterialsAnisotropy {
    pub fn strength(&self) -> f32 {
        self.anisotropy_strength.0
    }

    pub fn set_strength(&mut self, strength: f32) -> &mut Self {
        self.anisotropy_strength = strength.into();
        self
    }

    pub fn rotation(&self) -> f32 {
        self.anisotropy_rotation.0
    }

    pub fn set_rotation(&mut self, rotation: f32) -> &mut Self {
        self.anisotropy_rotation = rotation.into();
        self
    }

    pub fn texture(&self) -> Option<&TextureInfo> {
        self.anisotropy_texture.as_ref()
    }

    pub fn set_texture(&mut self, texture: Option<TextureInfo>) -> &mut Self {
        self.anisotropy_texture = texture;
        self
    }
}

impl ExtensionType for MaterialsAnisotropy {
    const NAME: &'static str = "KHR_materials_anisotropy";
    const PARENT: Parent = Parent::Material;

    fn validate(&self) -> Result<(), ValidationError> {
        check_range("anisotropyStrength", self.strength(), 0.0, 1.0)?;
        check_finite("anisotropyRotation", self.rotation())
    }
}
