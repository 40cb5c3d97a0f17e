use serde::{Deserialize, Deserializer, Serialize};

use crate::error::SchemaError;

/// One `{title, topics?}` entry of a naming schema document.
///
/// Fields other than `title` and `topics` (ids, notes, styling exported by mind-map
/// tools) are ignored. Every entry needs a `title`; `topics` may be missing or `null`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemaTopic {
    pub title: String,
    #[serde(
        default,
        deserialize_with = "null_as_empty",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub topics: Vec<SchemaTopic>,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<SchemaTopic>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<SchemaTopic>>::deserialize(deserializer)?.unwrap_or_default())
}

impl SchemaTopic {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            topics: Vec::new(),
        }
    }

    pub fn with_topics(mut self, topics: impl IntoIterator<Item = SchemaTopic>) -> Self {
        self.topics.extend(topics);
        self
    }
}

/// Parse a schema document: a JSON list whose first entry is the naming table.
pub fn parse_document(json: &str) -> Result<Vec<SchemaTopic>, SchemaError> {
    let document: Vec<SchemaTopic> = serde_json::from_str(json)?;
    if document.is_empty() {
        return Err(SchemaError::Empty);
    }
    Ok(document)
}
