//! Mapping from extension name and parent object to a typed decoder.
//!
//! The same name may attach to several parents (`GRIFFEL_bim_data` lives on
//! both nodes and the document root), so entries are keyed by the pair.
//! A [`Registry`] can be passed explicitly to host code, or the process-wide
//! instance returned by [`Registry::global`] can be used.

use std::borrow::Cow;
use std::collections::HashMap;
use std::fmt;
use std::sync::OnceLock;

use parking_lot::RwLock;
use tracing::{debug, trace};

use crate::error::Error;
use crate::extensions::{self, Extension, ExtensionType};

/// The kind of host object whose `extensions` map holds a payload.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub enum Parent {
    Document,
    Scene,
    Node,
    Primitive,
    Material,
    Texture,
}

impl Parent {
    pub fn as_str(self) -> &'static str {
        match self {
            Parent::Document => "document",
            Parent::Scene => "scene",
            Parent::Node => "node",
            Parent::Primitive => "mesh primitive",
            Parent::Material => "material",
            Parent::Texture => "texture",
        }
    }
}

impl fmt::Display for Parent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Turns a raw JSON fragment into a typed extension value.
///
/// Decoders must not touch the registry and must not keep the input.
pub type Decoder = fn(&[u8]) -> Result<Extension, Error>;

/// Orders by parent first, then by name.
#[derive(Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct ExtensionKey {
    pub parent: Parent,
    pub name: Cow<'static, str>,
}

#[derive(Debug, Default)]
pub struct Registry {
    decoders: RwLock<HashMap<Parent, HashMap<Cow<'static, str>, Decoder>>>,
}

impl Registry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry holding a decoder for every extension this crate defines.
    pub fn with_builtins() -> Self {
        let registry = Self::new();
        extensions::register_builtins(&registry);
        registry
    }

    /// The process-wide registry, populated with the built-in catalog on
    /// first use.
    pub fn global() -> &'static Registry {
        static GLOBAL: OnceLock<Registry> = OnceLock::new();
        GLOBAL.get_or_init(Registry::with_builtins)
    }

    /// Inserts or overwrites the decoder for `name` on `parent`, returning
    /// the decoder it replaced.
    ///
    /// A replaced decoder stays callable by anyone holding it.
    pub fn register(
        &self,
        name: impl Into<Cow<'static, str>>,
        parent: Parent,
        decoder: Decoder,
    ) -> Option<Decoder> {
        let name = name.into();
        let previous = self
            .decoders
            .write()
            .entry(parent)
            .or_default()
            .insert(name.clone(), decoder);
        if previous.is_some() {
            debug!(extension = %name, %parent, "replaced extension decoder");
        } else {
            debug!(extension = %name, %parent, "registered extension decoder");
        }
        previous
    }

    /// Registers the typed decoder of `E` under its own name and parent.
    pub fn register_extension<E: ExtensionType>(&self) -> Option<Decoder> {
        self.register(E::NAME, E::PARENT, extensions::decoder::<E>)
    }

    pub fn lookup(&self, name: &str, parent: Parent) -> Option<Decoder> {
        self.decoders
            .read()
            .get(&parent)
            .and_then(|decoders| decoders.get(name))
            .copied()
    }

    pub fn contains(&self, name: &str, parent: Parent) -> bool {
        self.lookup(name, parent).is_some()
    }

    /// Looks up and invokes the decoder for `name` on `parent`.
    ///
    /// The lock is released before the decoder runs.
    pub fn decode(&self, name: &str, parent: Parent, bytes: &[u8]) -> Result<Extension, Error> {
        let Some(decoder) = self.lookup(name, parent) else {
            return Err(Error::UnknownExtension {
                name: name.to_owned(),
                parent,
            });
        };
        trace!(extension = name, %parent, len = bytes.len(), "decoding extension");
        decoder(bytes)
    }

    /// Every registered key, sorted by parent and then name.
    pub fn keys(&self) -> Vec<ExtensionKey> {
        let mut keys: Vec<_> = self
            .decoders
            .read()
            .iter()
            .flat_map(|(parent, decoders)| {
                decoders.keys().map(move |name| ExtensionKey {
                    parent: *parent,
                    name: name.clone(),
                })
            })
            .collect();
        keys.sort();
        keys
    }
}
