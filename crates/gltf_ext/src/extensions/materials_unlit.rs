use serde::{Deserialize, Serialize};

use crate::codec;
use crate::extensions::{ExtensionType, Extensions, Extras};
use crate::registry::Parent;

/// `KHR_materials_unlit`. The presence of the extension is the whole payload.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct MaterialsUnlit {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extensions: Option<Extensions>,
    #[serde(default, deserialize_with = "codec::present", skip_serializing_if = "Option::is_none")]
    pub extras: Option<Extras>,
}

impl ExtensionType for MaterialsUnlit {
    const NAME: &'static str = "KHR_materials_unlit";
    const PARENT: Parent = Parent::Material;
}
