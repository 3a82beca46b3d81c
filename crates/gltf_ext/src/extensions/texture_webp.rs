use serde::{Deserialize, Serialize};

use crate::codec;
use crate::extensions::{ExtensionType, Extensions, Extras};
use crate::registry::Parent;

/// `EXT_texture_webp`
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct TextureWebp {
    /// Index of the WebP image replacing the texture's core `source`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extensions: Option<Extensions>,
    #[serde(default, deserialize_with = "codec::present", skip_serializing_if = "Option::is_none")]
    pub extras: Option<Extras>,
}

impl TextureWebp {
    pub fn new(source: u32) -> Self {
        Self {
            source: Some(source),
            ..Default::default()
        }
    }
}

impl ExtensionType for TextureWebp {
    const NAME: &'static str = "EXT_texture_webp";
    const PARENT: Parent = Parent::Texture;
}
