//! Typed codecs for companion glTF 2.0 extensions.
//!
//! Every extension is a serde record implementing [`ExtensionType`]: decoding
//! fills the defaults its schema prescribes and validates the result, encoding
//! omits every field still equal to its default, so a default-valued record
//! encodes to `{}`. A [`Registry`] maps `(name, parent)` to the decoder of a
//! type; [`host`] wires it into the extension maps of `gltf::json`.
//!
//! ```
//! use gltf_ext::extensions::materials_ior::MaterialsIor;
//! use gltf_ext::{ExtensionType, Parent, Registry};
//!
//! let extension = Registry::global()
//!     .decode("KHR_materials_ior", Parent::Material, b"{}")
//!     .unwrap();
//! let ior = extension.as_type::<MaterialsIor>().unwrap();
//! assert_eq!(ior.ior(), 1.5);
//! assert_eq!(ior.encode().unwrap(), b"{}");
//! ```

pub mod codec;
mod error;
pub mod extensions;
pub mod host;
pub mod registry;

pub use error::{Error, ValidationError};
pub use extensions::{Extension, ExtensionType, TextureInfo};
pub use host::{DocumentExtensions, ExtensionMap, HostPolicy};
pub use registry::{Decoder, ExtensionKey, Parent, Registry};
