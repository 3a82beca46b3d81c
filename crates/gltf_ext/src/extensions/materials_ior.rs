use serde::{Deserialize, Serialize};

use crate::codec::{self, defaulted_f32};
use crate::error::{check_finite, ValidationError};
use crate::extensions::{ExtensionType, Extensions, Extras};
use crate::registry::Parent;

defaulted_f32! {
    /// Index of refraction of the material's dielectric component.
    pub struct IndexOfRefraction = 1.5;
}

/// `KHR_materials_ior`
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MaterialsIor {
    #[serde(default, skip_serializing_if = "codec::is_default")]
    pub ior: IndexOfRefraction,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extensions: Option<Extensions>,
    #[serde(default, deserialize_with = "codec::present", skip_serializing_if = "Option::is_none")]
    pub extras: Option<Extras>,
}

impl MaterialsIor {
    pub fn new(ior: f32) -> Self {
        Self {
            ior: ior.into(),
            ..Default::default()
        }
    }

    pub fn ior(&self) -> f32 {
        self.ior.0
    }

    pub fn set_ior(&mut self, ior: f32) -> &mut Self {
        self.ior = ior.into();
        self
    }
}

impl ExtensionType for MaterialsIor {
    const NAME: &'static str = "KHR_materials_ior";
    const PARENT: Parent = Parent::Material;

    fn validate(&self) -> Result<(), ValidationError> {
        // Zero is the special "infinite" IOR used for fully metallic materials.
        let ior = self.ior();
        check_finite("ior", ior)?;
        if ior == 0.0 || ior >= 1.0 {
            Ok(())
        } else {
            Err(ValidationError::new("ior", format!("{ior} must be 0 or at least 1")))
        }
    }
}
