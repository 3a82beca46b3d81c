use serde::{Deserialize, Serialize};

use crate::codec;
use crate::extensions::{ExtensionType, Extensions, Extras};
use crate::registry::Parent;

/// `KHR_texture_basisu`
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct TextureBasisu {
    /// Index of the KTX2 image with Basis Universal supercompression.
    pub source: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extensions: Option<Extensions>,
    #[serde(default, deserialize_with = "codec::present", skip_serializing_if = "Option::is_none")]
    pub extras: Option<Extras>,
}

impl TextureBasisu {
    pub fn new(source: u32) -> Self {
        Self {
            source,
            ..Default::default()
        }
    }
}

impl ExtensionType for TextureBasisu {
    const NAME: &'static str = "KHR_texture_basisu";
    const PARENT: Parent = Parent::Texture;
}
