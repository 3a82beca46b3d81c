use std::borrow::Cow;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::codec;
use crate::error::{Error, ValidationError};
use crate::registry::{Parent, Registry};

pub mod bim_data;
pub mod geometry_metadata;
pub mod materials_anisotropy;
pub mod materials_emissive_strength;
pub mod materials_ior;
pub mod materials_specular;
pub mod materials_transmission;
pub mod materials_unlit;
pub mod mesh_features;
pub mod texture_basisu;
pub mod texture_webp;

/// Nested extensions of an extension payload, kept as raw JSON.
pub type Extensions = serde_json::Map<String, Value>;

/// Application-specific data attached to an extension payload.
pub type Extras = Value;

/// Reference to a texture, with the texture coordinate set it samples.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextureInfo {
    pub index: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tex_coord: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extensions: Option<Extensions>,
    #[serde(default, deserialize_with = "codec::present", skip_serializing_if = "Option::is_none")]
    pub extras: Option<Extras>,
}

impl TextureInfo {
    pub fn new(index: u32) -> Self {
        Self {
            index,
            ..Default::default()
        }
    }

    pub fn with_tex_coord(mut self, tex_coord: u32) -> Self {
        self.tex_coord = Some(tex_coord);
        self
    }
}

/// A typed extension payload.
///
/// `decode` fills defaults and validates before returning, so a value that
/// comes out of it always satisfies [`ExtensionType::validate`]. `encode`
/// omits every defaulted field equal to its default.
pub trait ExtensionType: Serialize + DeserializeOwned + Variant {
    const NAME: &'static str;
    const PARENT: Parent;

    fn validate(&self) -> Result<(), ValidationError> {
        Ok(())
    }

    fn decode(bytes: &[u8]) -> Result<Self, Error> {
        let value: Self = serde_json::from_slice(bytes).map_err(|source| Error::Parse {
            extension: Cow::Borrowed(Self::NAME),
            source,
        })?;
        value.validate().map_err(|source| Error::Validation {
            extension: Cow::Borrowed(Self::NAME),
            source,
        })?;
        Ok(value)
    }

    fn encode(&self) -> Result<Vec<u8>, Error> {
        serde_json::to_vec(self).map_err(|source| Error::Encode {
            extension: Cow::Borrowed(Self::NAME),
            source,
        })
    }

    fn to_value(&self) -> Result<Value, Error> {
        serde_json::to_value(self).map_err(|source| Error::Encode {
            extension: Cow::Borrowed(Self::NAME),
            source,
        })
    }
}

/// Access to the [`Extension`] variant holding a given payload type.
pub trait Variant: Sized {
    fn from_extension(extension: &Extension) -> Option<&Self>;
    fn from_extension_mut(extension: &mut Extension) -> Option<&mut Self>;
    fn into_extension(self) -> Extension;
}

/// The [`Decoder`](crate::registry::Decoder) of a typed extension.
pub fn decoder<E: ExtensionType>(bytes: &[u8]) -> Result<Extension, Error> {
    E::decode(bytes).map(Variant::into_extension)
}

macro_rules! extension_variants {
    ($($variant:ident($ty:ty)),* $(,)?) => {
        /// A decoded extension payload, tagged by its type.
        #[derive(Clone, Debug, PartialEq)]
        pub enum Extension {
            $($variant($ty),)*
            /// Payload produced by a decoder registered outside this crate.
            Opaque {
                name: Cow<'static, str>,
                parent: Parent,
                value: Value,
            },
        }

        impl Extension {
            pub fn name(&self) -> &str {
                match self {
                    $(Extension::$variant(_) => <$ty as ExtensionType>::NAME,)*
                    Extension::Opaque { name, .. } => name.as_ref(),
                }
            }

            pub fn parent(&self) -> Parent {
                match self {
                    $(Extension::$variant(_) => <$ty as ExtensionType>::PARENT,)*
                    Extension::Opaque { parent, .. } => *parent,
                }
            }

            pub fn encode(&self) -> Result<Vec<u8>, Error> {
                match self {
                    $(Extension::$variant(value) => value.encode(),)*
                    Extension::Opaque { name, value, .. } => serde_json::to_vec(value)
                        .map_err(|source| Error::Encode { extension: name.clone(), source }),
                }
            }

            pub fn to_value(&self) -> Result<Value, Error> {
                match self {
                    $(Extension::$variant(value) => value.to_value(),)*
                    Extension::Opaque { value, .. } => Ok(value.clone()),
                }
            }
        }

        $(
            impl Variant for $ty {
                fn from_extension(extension: &Extension) -> Option<&Self> {
                    match extension {
                        Extension::$variant(value) => Some(value),
                        _ => None,
                    }
                }

                fn from_extension_mut(extension: &mut Extension) -> Option<&mut Self> {
                    match extension {
                        Extension::$variant(value) => Some(value),
                        _ => None,
                    }
                }

                fn into_extension(self) -> Extension {
                    Extension::$variant(self)
                }
            }

            impl From<$ty> for Extension {
                fn from(value: $ty) -> Self {
                    Extension::$variant(value)
                }
            }
        )*

        pub(crate) fn register_builtins(registry: &Registry) {
            $(registry.register_extension::<$ty>();)*
        }
    };
}

extension_variants! {
    MaterialsIor(materials_ior::MaterialsIor),
    MaterialsEmissiveStrength(materials_emissive_strength::MaterialsEmissiveStrength),
    MaterialsAnisotropy(materials_anisotropy::MaterialsAnisotropy),
    MaterialsSpecular(materials_specular::MaterialsSpecular),
    MaterialsTransmission(materials_transmission::MaterialsTransmission),
    MaterialsUnlit(materials_unlit::MaterialsUnlit),
    TextureWebp(texture_webp::TextureWebp),
    TextureBasisu(texture_basisu::TextureBasisu),
    GeometryMetadata(geometry_metadata::GeometryMetadata),
    BimNode(bim_data::BimNode),
    BimDocument(bim_data::BimDocument),
    MeshFeatures(mesh_features::MeshFeatures),
}

impl Extension {
    pub fn as_type<E: ExtensionType>(&self) -> Option<&E> {
        E::from_extension(self)
    }

    pub fn as_type_mut<E: ExtensionType>(&mut self) -> Option<&mut E> {
        E::from_extension_mut(self)
    }
}
