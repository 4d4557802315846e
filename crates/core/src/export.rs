//! Structure export as a nested JSON mapping.
//!
//! Shape: `{ block: { "marker": .., "modules": { module: [ { "title", "steps" } ] } } }`.
//! Block, module and card order follow the structure.

use crate::structure::{Block, Module, Structure};
use serde::ser::{SerializeMap, SerializeStruct};
use serde::{Serialize, Serializer};

impl Serialize for Structure {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.blocks().len()))?;
        for block in self.blocks() {
            map.serialize_entry(&block.name, &BlockEntry(block))?;
        }
        map.end()
    }
}

struct BlockEntry<'a>(&'a Block);

impl Serialize for BlockEntry<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("Block", 2)?;
        state.serialize_field("marker", &self.0.marker)?;
        state.serialize_field("modules", &ModuleEntries(&self.0.modules))?;
        state.end()
    }
}

struct ModuleEntries<'a>(&'a [Module]);

impl Serialize for ModuleEntries<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for module in self.0 {
            map.serialize_entry(&module.name, &module.cards)?;
        }
        map.end()
    }
}

impl Structure {
    /// Export as a JSON value.
    pub fn to_json(&self) -> serde_json::Result<serde_json::Value> {
        serde_json::to_value(self)
    }

    /// Export as pretty-printed JSON text.
    pub fn to_json_string(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
