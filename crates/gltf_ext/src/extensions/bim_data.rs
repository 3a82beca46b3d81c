//! `GRIFFEL_bim_data`: building information attached to nodes.
//!
//! The document-level payload holds deduplicated tables of property names,
//! property values, name/value pairs and node types. Node payloads refer to
//! those tables by index, either inline or through a buffer view.

use serde::{Deserialize, Serialize};

use crate::codec;
use crate::extensions::{ExtensionType, Extensions, Extras};
use crate::registry::Parent;

pub const BIM_DATA: &str = "GRIFFEL_bim_data";

/// Node-level payload.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BimNode {
    /// Indices into [`BimDocument::properties`].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub properties: Option<Vec<u32>>,
    /// Index into [`BimDocument::types`].
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub type_index: Option<u32>,
    /// Buffer view holding the property indices when they are not inline.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub buffer_view: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extensions: Option<Extensions>,
    #[serde(default, deserialize_with = "codec::present", skip_serializing_if = "Option::is_none")]
    pub extras: Option<Extras>,
}

impl ExtensionType for BimNode {
    const NAME: &'static str = BIM_DATA;
    const PARENT: Parent = Parent::Node;
}

/// A name/value pair, both as indices into the document's string tables.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Property {
    pub name: u32,
    pub value: u32,
}

/// A node type, described by the properties all its nodes share.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BimType {
    pub properties: Vec<u32>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeProperties {
    pub node: u32,
    pub properties: Vec<u32>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub type_index: Option<u32>,
}

/// Document-level payload.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BimDocument {
    pub property_names: Vec<String>,
    pub property_values: Vec<String>,
    pub properties: Vec<Property>,
    pub types: Vec<BimType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub node_properties: Option<Vec<NodeProperties>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extensions: Option<Extensions>,
    #[serde(default, deserialize_with = "codec::present", skip_serializing_if = "Option::is_none")]
    pub extras: Option<Extras>,
}

fn intern(table: &mut Vec<String>, entry: &str) -> u32 {
    match table.iter().position(|existing| existing == entry) {
        Some(index) => index as u32,
        None => {
            table.push(entry.to_owned());
            (table.len() - 1) as u32
        }
    }
}

impl BimDocument {
    /// Returns the index of the `name = value` property, adding the strings
    /// and the pair to their tables if they are not there yet.
    pub fn intern_property(&mut self, name: &str, value: &str) -> u32 {
        let property = Property {
            name: intern(&mut self.property_names, name),
            value: intern(&mut self.property_values, value),
        };
        match self.properties.iter().position(|existing| *existing == property) {
            Some(index) => index as u32,
            None => {
                self.properties.push(property);
                (self.properties.len() - 1) as u32
            }
        }
    }

    /// Returns the index of the type with exactly these properties, adding it
    /// if needed.
    pub fn add_type(&mut self, properties: Vec<u32>) -> u32 {
        match self.types.iter().position(|existing| existing.properties == properties) {
            Some(index) => index as u32,
            None => {
                self.types.push(BimType { properties });
                (self.types.len() - 1) as u32
            }
        }
    }

    /// Resolves a property index to its name and value strings.
    pub fn property(&self, index: u32) -> Option<(&str, &str)> {
        let property = self.properties.get(index as usize)?;
        let name = self.property_names.get(property.name as usize)?;
        let value = self.property_values.get(property.value as usize)?;
        Some((name.as_str(), value.as_str()))
    }

    pub fn node_properties_for(&self, node: u32) -> Option<&NodeProperties> {
        self.node_properties
            .as_ref()?
            .iter()
            .find(|entry| entry.node == node)
    }

    /// Sets the properties of `node`, replacing any earlier entry.
    pub fn set_node_properties(
        &mut self,
        node: u32,
        properties: Vec<u32>,
        type_index: Option<u32>,
    ) {
        let entries = self.node_properties.get_or_insert_with(Vec::new);
        let entry = NodeProperties {
            node,
            properties,
            type_index,
        };
        match entries.iter_mut().find(|existing| existing.node == node) {
            Some(existing) => *existing = entry,
            None => entries.push(entry),
        }
    }
}

impl ExtensionType for BimDocument {
    const NAME: &'static str = BIM_DATA;
    const PARENT: Parent = Parent::Document;
}
