use serde::{Deserialize, Serialize};

use crate::codec::{self, defaulted_f32};
use crate::error::{check_non_negative, ValidationError};
use crate::extensions::{ExtensionType, Extensions, Extras};
use crate::registry::Parent;

defaulted_f32! {
    /// Multiplier applied to the material's emissive color.
    pub struct EmissiveStrength = 1.0;
}

/// `KHR_materials_emissive_strength`
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MaterialsEmissiveStrength {
    #[serde(default, skip_serializing_if = "codec::is_default")]
    pub emissive_strength: EmissiveStrength,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extensions: Option<Extensions>,
    #[serde(default, deserialize_with = "codec::present", skip_serializing_if = "Option::is_none")]
    pub extras: Option<Extras>,
}

impl MaterialsEmissiveStrength {
    pub fn new(emissive_strength: f32) -> Self {
        Self {
            emissive_strength: emissive_strength.into(),
            ..Default::default()
        }
    }

    pub fn emissive_strength(&self) -> f32 {
        self.emissive_strength.0
    }

    pub fn set_emissive_strength(&mut self, emissive_strength: f32) -> &mut Self {
        self.emissive_strength = emissive_strength.into();
        self
    }
}

impl ExtensionType for MaterialsEmissiveStrength {
    const NAME: &'static str = "KHR_materials_emissive_strength";
    const PARENT: Parent = Parent::Material;

    fn validate(&self) -> Result<(), ValidationError> {
        check_non_negative("emissiveStrength", self.emissive_strength())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_object_decodes_to_default() {
        let strength = MaterialsEmissiveStrength::decode(b"{}").unwrap();
        assert_eq!(strength.emissive_strength(), 1.0);
        assert_eq!(strength.encode().unwrap(), b"{}");
    }

    #[test]
    fn integral_strength_renders_without_fraction() {
        let strength = MaterialsEmissiveStrength::decode(br#"{"emissiveStrength":5.0}"#).unwrap();
        assert_eq!(strength.emissive_strength(), 5.0);
        assert_eq!(
            String::from_utf8(strength.encode().unwrap()).unwrap(),
            r#"{"emissiveStrength":5}"#,
        );
    }

    #[test]
    fn explicit_default_is_elided() {
        let strength = MaterialsEmissiveStrength::new(1.0);
        assert_eq!(strength.encode().unwrap(), b"{}");
    }

    #[test]
    fn negative_strength_is_rejected() {
        let err = MaterialsEmissiveStrength::decode(br#"{"emissiveStrength":-1}"#).unwrap_err();
        assert!(err.is_validation());
        assert_eq!(err.extension(), "KHR_materials_emissive_strength");
    }

    #[test]
    fn out_of_range_strength_is_rejected() {
        let err = MaterialsEmissiveStrength::decode(br#"{"emissiveStrength":1e39}"#).unwrap_err();
        assert!(err.is_validation());
        assert!(err.to_string().contains("emissiveStrength: inf is not a finite number"));
    }
}
