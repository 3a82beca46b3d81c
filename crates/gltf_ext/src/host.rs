//! Glue between the registry and the unknown-extension maps of `gltf::json`.
//!
//! `gltf::json` keeps every extension it does not model itself in an
//! `others` map on the parent's extension struct. [`ExtensionMap::decode`]
//! turns such a map into typed values, [`ExtensionMap::encode`] turns it back.
//! Names without a registered decoder are carried as raw JSON so that
//! encoding is lossless.

use std::collections::BTreeMap;

use gltf::json;
use serde_json::{Map, Value};
use tracing::{trace, warn};

use crate::error::Error;
use crate::extensions::{Extension, ExtensionType, Variant};
use crate::registry::{Parent, Registry};

/// What to do when a registered decoder rejects its payload.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DecodeErrorPolicy {
    /// Fail the whole decode with the decoder's error.
    #[default]
    Fail,
    /// Log the error and keep the payload as raw JSON.
    KeepRaw,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct HostPolicy {
    pub on_decode_error: DecodeErrorPolicy,
}

impl HostPolicy {
    pub fn lenient() -> Self {
        Self {
            on_decode_error: DecodeErrorPolicy::KeepRaw,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum ExtensionSlot {
    Decoded(Extension),
    Raw(Value),
}

impl ExtensionSlot {
    pub fn as_decoded(&self) -> Option<&Extension> {
        match self {
            ExtensionSlot::Decoded(extension) => Some(extension),
            ExtensionSlot::Raw(_) => None,
        }
    }

    fn to_value(&self) -> Result<Value, Error> {
        match self {
            ExtensionSlot::Decoded(extension) => extension.to_value(),
            ExtensionSlot::Raw(value) => Ok(value.clone()),
        }
    }
}

/// The extensions of one parent object, keyed by extension name.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ExtensionMap {
    entries: BTreeMap<String, ExtensionSlot>,
}

impl ExtensionMap {
    pub fn decode(
        registry: &Registry,
        parent: Parent,
        map: &Map<String, Value>,
        policy: HostPolicy,
    ) -> Result<Self, Error> {
        let mut entries = BTreeMap::new();
        for (name, value) in map {
            let slot = match registry.lookup(name, parent) {
                Some(decoder) => {
                    let bytes = serde_json::to_vec(value).map_err(|source| Error::Parse {
                        extension: name.clone().into(),
                        source,
                    })?;
                    match decoder(&bytes) {
                        Ok(extension) => ExtensionSlot::Decoded(extension),
                        Err(err) => match policy.on_decode_error {
                            DecodeErrorPolicy::Fail => return Err(err),
                            DecodeErrorPolicy::KeepRaw => {
                                warn!(extension = %name, %parent, "keeping raw extension: {err}");
                                ExtensionSlot::Raw(value.clone())
                            }
                        },
                    }
                }
                None => {
                    trace!(extension = %name, %parent, "no decoder, keeping raw extension");
                    ExtensionSlot::Raw(value.clone())
                }
            };
            entries.insert(name.clone(), slot);
        }
        Ok(Self { entries })
    }

    pub fn encode(&self) -> Result<Map<String, Value>, Error> {
        self.entries
            .iter()
            .map(|(name, slot)| Ok((name.clone(), slot.to_value()?)))
            .collect()
    }

    pub fn get<E: ExtensionType>(&self) -> Option<&E> {
        self.entries.get(E::NAME)?.as_decoded()?.as_type()
    }

    pub fn get_mut<E: ExtensionType>(&mut self) -> Option<&mut E> {
        match self.entries.get_mut(E::NAME)? {
            ExtensionSlot::Decoded(extension) => extension.as_type_mut(),
            ExtensionSlot::Raw(_) => None,
        }
    }

    /// Inserts a typed value under its extension name.
    pub fn insert<E: ExtensionType>(&mut self, value: E) -> Option<ExtensionSlot> {
        self.entries.insert(E::NAME.to_owned(), ExtensionSlot::Decoded(value.into_extension()))
    }

    pub fn insert_raw(&mut self, name: impl Into<String>, value: Value) -> Option<ExtensionSlot> {
        self.entries.insert(name.into(), ExtensionSlot::Raw(value))
    }

    pub fn slot(&self, name: &str) -> Option<&ExtensionSlot> {
        self.entries.get(name)
    }

    pub fn remove(&mut self, name: &str) -> Option<ExtensionSlot> {
        self.entries.remove(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ExtensionSlot)> {
        self.entries.iter().map(|(name, slot)| (name.as_str(), slot))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Gives uniform access to the `others` map of the `gltf::json` extension
/// structs.
trait OtherExtensions: Default {
    fn others(&self) -> &Map<String, Value>;
    fn others_mut(&mut self) -> &mut Map<String, Value>;
}

macro_rules! impl_other_extensions {
    ($($ty:ty),* $(,)?) => {
        $(
            impl OtherExtensions for $ty {
                fn others(&self) -> &Map<String, Value> {
                    &self.others
                }

                fn others_mut(&mut self) -> &mut Map<String, Value> {
                    &mut self.others
                }
            }
        )*
    };
}

impl_other_extensions!(
    json::extensions::root::Root,
    json::extensions::scene::Scene,
    json::extensions::scene::Node,
    json::extensions::material::Material,
    json::extensions::texture::Texture,
    json::extensions::mesh::Primitive,
);

fn decode_slot<T: OtherExtensions>(
    registry: &Registry,
    parent: Parent,
    slot: &Option<T>,
    policy: HostPolicy,
) -> Result<ExtensionMap, Error> {
    match slot {
        Some(extensions) => ExtensionMap::decode(registry, parent, extensions.others(), policy),
        None => Ok(ExtensionMap::default()),
    }
}

fn splice<T: OtherExtensions>(slot: &mut Option<T>, map: &ExtensionMap) -> Result<(), Error> {
    if map.is_empty() {
        *slot = None;
        return Ok(());
    }
    *slot.get_or_insert_with(T::default).others_mut() = map.encode()?;
    Ok(())
}

/// Decoded extensions of every parent in a document, indexed like the
/// document's own arrays.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DocumentExtensions {
    pub root: ExtensionMap,
    pub scenes: Vec<ExtensionMap>,
    pub nodes: Vec<ExtensionMap>,
    pub materials: Vec<ExtensionMap>,
    pub textures: Vec<ExtensionMap>,
    /// Indexed by mesh, then by primitive.
    pub primitives: Vec<Vec<ExtensionMap>>,
}

impl DocumentExtensions {
    pub fn decode(
        registry: &Registry,
        root: &json::Root,
        policy: HostPolicy,
    ) -> Result<Self, Error> {
        Ok(Self {
            root: decode_slot(registry, Parent::Document, &root.extensions, policy)?,
            scenes: root
                .scenes
                .iter()
                .map(|scene| decode_slot(registry, Parent::Scene, &scene.extensions, policy))
                .collect::<Result<_, _>>()?,
            nodes: root
                .nodes
                .iter()
                .map(|node| decode_slot(registry, Parent::Node, &node.extensions, policy))
                .collect::<Result<_, _>>()?,
            materials: root
                .materials
                .iter()
                .map(|material| {
                    decode_slot(registry, Parent::Material, &material.extensions, policy)
                })
                .collect::<Result<_, _>>()?,
            textures: root
                .textures
                .iter()
                .map(|texture| decode_slot(registry, Parent::Texture, &texture.extensions, policy))
                .collect::<Result<_, _>>()?,
            primitives: root
                .meshes
                .iter()
                .map(|mesh| {
                    mesh.primitives
                        .iter()
                        .map(|primitive| {
                            decode_slot(registry, Parent::Primitive, &primitive.extensions, policy)
                        })
                        .collect::<Result<Vec<_>, _>>()
                })
                .collect::<Result<_, _>>()?,
        })
    }

    /// Writes every map back into the document's extension structs and lists
    /// any new names in `extensionsUsed`.
    ///
    /// Objects without a counterpart in `self` are left untouched.
    pub fn apply(&self, root: &mut json::Root) -> Result<(), Error> {
        splice(&mut root.extensions, &self.root)?;
        for (scene, map) in root.scenes.iter_mut().zip(&self.scenes) {
            splice(&mut scene.extensions, map)?;
        }
        for (node, map) in root.nodes.iter_mut().zip(&self.nodes) {
            splice(&mut node.extensions, map)?;
        }
        for (material, map) in root.materials.iter_mut().zip(&self.materials) {
            splice(&mut material.extensions, map)?;
        }
        for (texture, map) in root.textures.iter_mut().zip(&self.textures) {
            splice(&mut texture.extensions, map)?;
        }
        for (mesh, maps) in root.meshes.iter_mut().zip(&self.primitives) {
            for (primitive, map) in mesh.primitives.iter_mut().zip(maps) {
                splice(&mut primitive.extensions, map)?;
            }
        }

        for name in self.names() {
            if !root.extensions_used.iter().any(|used| used == name) {
                root.extensions_used.push(name.to_owned());
            }
        }
        Ok(())
    }

    fn maps(&self) -> impl Iterator<Item = &ExtensionMap> {
        std::iter::once(&self.root)
            .chain(&self.scenes)
            .chain(&self.nodes)
            .chain(&self.materials)
            .chain(&self.textures)
            .chain(self.primitives.iter().flatten())
    }

    /// Every extension name present on any parent, sorted and deduplicated.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<_> = self.maps().flat_map(ExtensionMap::names).collect();
        names.sort_unstable();
        names.dedup();
        names
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::extensions::materials_ior::MaterialsIor;
    use crate::extensions::texture_webp::TextureWebp;

    fn decode_map(parent: Parent, map: &Value, policy: HostPolicy) -> Result<ExtensionMap, Error> {
        let registry = Registry::with_builtins();
        ExtensionMap::decode(&registry, parent, map.as_object().unwrap(), policy)
    }

    #[test]
    fn unknown_names_are_kept_raw() {
        let map = json!({
            "KHR_materials_ior": { "ior": 1.25 },
            "VENDOR_unknown": { "anything": [1, 2] },
        });

        let decoded = decode_map(Parent::Material, &map, HostPolicy::default()).unwrap();
        assert_eq!(decoded.get::<MaterialsIor>().map(MaterialsIor::ior), Some(1.25));
        assert_eq!(
            decoded.slot("VENDOR_unknown"),
            Some(&ExtensionSlot::Raw(json!({ "anything": [1, 2] })))
        );
        assert_eq!(Value::Object(decoded.encode().unwrap()), map);
    }

    #[test]
    fn wrong_parent_is_kept_raw() {
        let map = json!({ "KHR_materials_ior": { "ior": 1.25 } });
        let decoded = decode_map(Parent::Texture, &map, HostPolicy::default()).unwrap();
        assert!(decoded.get::<MaterialsIor>().is_none());
        assert!(matches!(decoded.slot("KHR_materials_ior"), Some(ExtensionSlot::Raw(_))));
    }

    #[test]
    fn decode_errors_follow_policy() {
        let map = json!({ "KHR_materials_ior": { "ior": 0.5 } });

        let err = decode_map(Parent::Material, &map, HostPolicy::default()).unwrap_err();
        assert!(err.is_validation());

        let kept = decode_map(Parent::Material, &map, HostPolicy::lenient()).unwrap();
        assert_eq!(
            kept.slot("KHR_materials_ior"),
            Some(&ExtensionSlot::Raw(json!({ "ior": 0.5 })))
        );
    }

    #[test]
    fn typed_values_can_be_edited_in_place() {
        let mut map = ExtensionMap::default();
        map.insert(MaterialsIor::default());
        map.get_mut::<MaterialsIor>().unwrap().set_ior(2.0);
        assert_eq!(
            Value::Object(map.encode().unwrap()),
            json!({ "KHR_materials_ior": { "ior": 2 } })
        );

        assert!(map.remove("KHR_materials_ior").is_some());
        assert!(map.is_empty());
    }

    fn document() -> json::Root {
        serde_json::from_value(json!({
            "asset": { "version": "2.0" },
            "extensionsUsed": ["KHR_materials_ior", "EXT_texture_webp"],
            "images": [{ "uri": "a.png" }, { "uri": "a.webp" }],
            "textures": [{
                "source": 0,
                "extensions": { "EXT_texture_webp": { "source": 1 } },
            }],
            "materials": [
                { "extensions": { "KHR_materials_ior": {} } },
                {},
            ],
        }))
        .unwrap()
    }

    #[test]
    fn document_round_trip() {
        let registry = Registry::with_builtins();
        let mut root = document();
        let mut extensions =
            DocumentExtensions::decode(&registry, &root, HostPolicy::default()).unwrap();

        let ior = extensions.materials[0].get::<MaterialsIor>();
        assert_eq!(ior.map(MaterialsIor::ior), Some(1.5));
        assert!(extensions.materials[1].is_empty());
        assert_eq!(extensions.textures[0].get::<TextureWebp>(), Some(&TextureWebp::new(1)));
        assert_eq!(extensions.names(), ["EXT_texture_webp", "KHR_materials_ior"]);

        extensions.materials[1].insert(MaterialsIor::new(1.25));
        extensions.apply(&mut root).unwrap();

        let value = serde_json::to_value(&root).unwrap();
        assert_eq!(value["materials"][0]["extensions"], json!({ "KHR_materials_ior": {} }));
        assert_eq!(
            value["materials"][1]["extensions"],
            json!({ "KHR_materials_ior": { "ior": 1.25 } })
        );
        assert_eq!(
            value["textures"][0]["extensions"],
            json!({ "EXT_texture_webp": { "source": 1 } })
        );
        assert_eq!(root.extensions_used, ["KHR_materials_ior", "EXT_texture_webp"]);
    }

    #[test]
    fn emptied_map_drops_the_extensions_member() {
        let registry = Registry::with_builtins();
        let mut root = document();
        let mut extensions =
            DocumentExtensions::decode(&registry, &root, HostPolicy::default()).unwrap();

        assert!(extensions.materials[0].remove("KHR_materials_ior").is_some());
        extensions.apply(&mut root).unwrap();

        assert!(root.materials[0].extensions.is_none());
        let value = serde_json::to_value(&root).unwrap();
        assert!(value["materials"][0].get("extensions").is_none());
        assert_eq!(
            value["textures"][0]["extensions"],
            json!({ "EXT_texture_webp": { "source": 1 } })
        );
    }
}
