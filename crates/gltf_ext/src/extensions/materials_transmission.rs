use serde::{Deserialize, Serialize};

use crate::codec::{self, defaulted_f32};
use crate::error::{check_range, ValidationError};
use crate::extensions::{ExtensionType, Extensions, Extras, TextureInfo};
use crate::registry::Parent;

defaulted_f32! {
    /// Fraction of light transmitted through the surface, in `[0, 1]`.
    pub struct TransmissionFactor = 0.0;
}

/// `KHR_materials_transmission`
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MaterialsTransmission {
    #[serde(default, skip_serializing_if = "codec::is_default")]
    pub transmission_factor: TransmissionFactor,
    /// Transmission is read from the red channel.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transmission_texture: Option<TextureInfo>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extensions: Option<Extensions>,
    #[serde(default, deserialize_with = "codec::present", skip_serializing_if = "Option::is_none")]
    pub extras: Option<Extras>,
}

impl MaterialsTransmission {
    pub fn factor(&self) -> f32 {
        self.transmission_factor.0
    }

    pub fn set_factor(&mut self, factor: f32) -> &mut Self {
        self.transmission_factor = factor.into();
        self
    }
}

impl ExtensionType for MaterialsTransmission {
    const NAME: &'static str = "KHR_materials_transmission";
    const PARENT: Parent = Parent::Material;

    fn validate(&self) -> Result<(), ValidationError> {
        check_range("transmissionFactor", self.factor(), 0.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_transmission_renders_as_integer() {
        let mut transmission = MaterialsTransmission::default();
        transmission.set_factor(1.0);
        assert_eq!(
            String::from_utf8(transmission.encode().unwrap()).unwrap(),
            r#"{"transmissionFactor":1}"#,
        );
        assert_eq!(MaterialsTransmission::decode(&transmission.encode().unwrap()).unwrap(), transmission);
    }

    #[test]
    fn zero_factor_is_elided() {
        let transmission = MaterialsTransmission::decode(br#"{"transmissionFactor":0}"#).unwrap();
        assert_eq!(transmission.encode().unwrap(), b"{}");
    }

    #[test]
    fn factor_above_one_is_rejected() {
        assert!(MaterialsTransmission::decode(br#"{"transmissionFactor":2}"#).unwrap_err().is_validation());
    }
}
