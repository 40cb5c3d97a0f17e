//! JSON side files written next to exported assets and read back by the engine importer.

use serde::{Deserialize, Serialize};

use crate::tree::SizeTable;

/// Every grid cell with its declared size.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SizeDocument {
    pub items: Vec<SizeItem>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SizeItem {
    pub name: String,
    pub size: String,
}

impl SizeDocument {
    pub fn from_table(table: &SizeTable) -> Self {
        Self {
            items: table
                .iter()
                .map(|(name, size)| SizeItem {
                    name: name.clone(),
                    size: size.clone(),
                })
                .collect(),
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

/// Placement of decoration objects relative to the main object of a collection.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecorationDocument {
    pub items: Vec<DecorationItem>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecorationItem {
    pub name: String,
    pub data: Vec<DecorationField>,
}

/// Serialized as a single-key object, e.g. `{"location": "(1.0000, 0.0000, 2.5000)"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DecorationField {
    Location(String),
    Euler(String),
    Scale(String),
}

/// Transform of one decoration object, in scene units and radians.
#[derive(Debug, Clone, PartialEq)]
pub struct DecorationRecord {
    pub name: String,
    pub translation: [f32; 3],
    pub euler: [f32; 3],
    pub scale: [f32; 3],
}

impl DecorationDocument {
    /// Locations are stored relative to `origin` and multiplied by `unit_scale`.
    pub fn build<'a>(
        records: impl IntoIterator<Item = &'a DecorationRecord>,
        origin: [f32; 3],
        unit_scale: f32,
    ) -> Self {
        let items = records
            .into_iter()
            .map(|record| {
                let location: [f32; 3] =
                    std::array::from_fn(|axis| (record.translation[axis] - origin[axis]) * unit_scale);
                DecorationItem {
                    name: record.name.clone(),
                    data: vec![
                        DecorationField::Location(format_vector(location)),
                        DecorationField::Euler(format_vector(record.euler)),
                        DecorationField::Scale(format_vector(record.scale)),
                    ],
                }
            })
            .collect();
        Self { items }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

/// Objects whose name mentions `Kit` or `Adorn` are placed by the importer instead of
/// being merged into the main mesh.
pub fn is_decoration(name: &str) -> bool {
    name.contains("Kit") || name.contains("Adorn")
}

pub fn format_vector([x, y, z]: [f32; 3]) -> String {
    format!("({x:.4}, {y:.4}, {z:.4})")
}
