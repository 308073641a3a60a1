// RawPublication: an untyped publication document from the fetcher.
//
// Mirrors the shape Google Scholar scrapers conventionally produce: a few
// top-level keys (pub_url, eprint_url, num_citations, ...) plus a nested
// `bib` object holding the bibliographic fields. Nothing is guaranteed to be
// present, so every accessor returns an Option.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Key of the nested bibliographic object.
const BIB: &str = "bib";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RawPublication {
    fields: Map<String, Value>,
}

impl RawPublication {
    /// An empty document (`{}`).
    pub fn new() -> Self {
        Self::default()
    }

    /// A top-level field, e.g. `pub_url` or `num_citations`.
    pub fn field(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    /// A field inside the nested `bib` object, e.g. `title` or `journal`.
    pub fn bib_field(&self, key: &str) -> Option<&Value> {
        self.fields.get(BIB).and_then(|bib| bib.get(key))
    }

    /// A top-level field, only if it is a string.
    pub fn str_field(&self, key: &str) -> Option<&str> {
        self.field(key).and_then(Value::as_str)
    }

    /// A `bib` field, only if it is a string.
    pub fn bib_str(&self, key: &str) -> Option<&str> {
        self.bib_field(key).and_then(Value::as_str)
    }

    /// Set a top-level field.
    pub fn set_field(&mut self, key: &str, value: impl Into<Value>) {
        self.fields.insert(key.to_string(), value.into());
    }

    /// Set a field inside `bib`, creating the object if needed.
    pub fn set_bib_field(&mut self, key: &str, value: impl Into<Value>) {
        let bib = self
            .fields
            .entry(BIB)
            .or_insert_with(|| Value::Object(Map::new()));
        if !bib.is_object() {
            *bib = Value::Object(Map::new());
        }
        if let Value::Object(map) = bib {
            map.insert(key.to_string(), value.into());
        }
    }

    /// Merge another document into this one. Keys from `other` win; the two
    /// `bib` objects are merged key by key rather than replaced wholesale.
    pub fn merge(&mut self, other: RawPublication) {
        for (key, value) in other.fields {
            match (key.as_str(), value) {
                (BIB, Value::Object(bib)) => {
                    for (bib_key, bib_value) in bib {
                        self.set_bib_field(&bib_key, bib_value);
                    }
                }
                (_, value) => {
                    self.fields.insert(key, value);
                }
            }
        }
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// Non-object values carry no fields and become an empty document.
impl From<Value> for RawPublication {
    fn from(value: Value) -> Self {
        match value {
            Value::Object(fields) => Self { fields },
            _ => Self::default(),
        }
    }
}
