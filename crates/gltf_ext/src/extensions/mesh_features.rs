use serde::{Deserialize, Serialize};

use crate::codec;
use crate::error::ValidationError;
use crate::extensions::{ExtensionType, Extensions, Extras};
use crate::registry::Parent;

fn default_channels() -> Vec<u32> {
    vec![0]
}

fn is_default_channels(channels: &[u32]) -> bool {
    channels == [0]
}

/// Texture holding feature IDs, packed into one or more channels.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeatureIdTexture {
    pub index: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tex_coord: Option<u32>,
    /// Channels read in order, least significant byte first.
    #[serde(default = "default_channels", skip_serializing_if = "is_default_channels")]
    pub channels: Vec<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extensions: Option<Extensions>,
    #[serde(default, deserialize_with = "codec::present", skip_serializing_if = "Option::is_none")]
    pub extras: Option<Extras>,
}

impl Default for FeatureIdTexture {
    fn default() -> Self {
        Self {
            index: 0,
            tex_coord: None,
            channels: default_channels(),
            extensions: None,
            extras: None,
        }
    }
}

impl FeatureIdTexture {
    pub fn new(index: u32) -> Self {
        Self {
            index,
            ..Default::default()
        }
    }

    pub fn has_default_channels(&self) -> bool {
        is_default_channels(&self.channels)
    }
}

/// One set of feature IDs on a primitive.
///
/// IDs come from `texture`, from the `_FEATURE_ID_<attribute>` vertex
/// attribute, or, when neither is set, from the vertex index.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeatureId {
    pub feature_count: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub null_feature_id: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attribute: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub texture: Option<FeatureIdTexture>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub property_table: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extensions: Option<Extensions>,
    #[serde(default, deserialize_with = "codec::present", skip_serializing_if = "Option::is_none")]
    pub extras: Option<Extras>,
}

impl FeatureId {
    pub fn new(feature_count: u32) -> Self {
        Self {
            feature_count,
            ..Default::default()
        }
    }

    pub fn with_null_feature_id(mut self, null_feature_id: u32) -> Self {
        self.null_feature_id = Some(null_feature_id);
        self
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn with_attribute(mut self, attribute: u32) -> Self {
        self.attribute = Some(attribute);
        self
    }

    pub fn with_texture(mut self, texture: FeatureIdTexture) -> Self {
        self.texture = Some(texture);
        self
    }

    pub fn with_property_table(mut self, property_table: u32) -> Self {
        self.property_table = Some(property_table);
        self
    }

    fn validate(&self, position: usize) -> Result<(), ValidationError> {
        if self.feature_count == 0 {
            return Err(ValidationError::new(
                format!("featureIds[{position}].featureCount"),
                "must be at least 1",
            ));
        }
        if let Some(label) = &self.label {
            if !is_identifier(label) {
                return Err(ValidationError::new(
                    format!("featureIds[{position}].label"),
                    format!("{label:?} is not an identifier"),
                ));
            }
        }
        if let Some(texture) = &self.texture {
            if texture.channels.is_empty() {
                return Err(ValidationError::new(
                    format!("featureIds[{position}].texture.channels"),
                    "must not be empty",
                ));
            }
        }
        Ok(())
    }
}

/// `^[a-zA-Z_][a-zA-Z0-9_]*$`
fn is_identifier(label: &str) -> bool {
    let mut chars = label.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() || first == '_' => {
            chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        }
        _ => false,
    }
}

/// `EXT_mesh_features`
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MeshFeatures {
    pub feature_ids: Vec<FeatureId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extensions: Option<Extensions>,
    #[serde(default, deserialize_with = "codec::present", skip_serializing_if = "Option::is_none")]
    pub extras: Option<Extras>,
}

impl MeshFeatures {
    pub fn push(&mut self, feature_id: FeatureId) -> &mut Self {
        self.feature_ids.push(feature_id);
        self
    }

    pub fn by_label(&self, label: &str) -> Option<&FeatureId> {
        self.feature_ids
            .iter()
            .find(|feature_id| feature_id.label.as_deref() == Some(label))
    }
}

impl ExtensionType for MeshFeatures {
    const NAME: &'static str = "EXT_mesh_features";
    const PARENT: Parent = Parent::Primitive;

    fn validate(&self) -> Result<(), ValidationError> {
        if self.feature_ids.is_empty() {
            return Err(ValidationError::new("featureIds", "must not be empty"));
        }
        for (position, feature_id) in self.feature_ids.iter().enumerate() {
            feature_id.validate(position)?;
        }
        Ok(())
    }
}
