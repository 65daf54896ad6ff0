//! Item catalog: the read-only set of learnable items.
//!
//! Items come from an external task bank (a JSON file in the format the
//! learning platform ships). The catalog keeps insertion order stable so
//! that scheduling tie-breaks are reproducible, and offers lookup by id.
//! The scheduler never mutates it.

use std::collections::HashMap;
use std::fmt;
use std::fs;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::scheduler::storage::StoreError;

/// Stable identifier of a catalog item.
///
/// Ids are assigned by the task bank, not generated here.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(String);

impl ItemId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ItemId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for ItemId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// CEFR proficiency tag carried by catalog items. Opaque to the scheduler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum CefrLevel {
    A1,
    A2,
    B1,
    B2,
    C1,
    C2,
}

impl fmt::Display for CefrLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            CefrLevel::A1 => "A1",
            CefrLevel::A2 => "A2",
            CefrLevel::B1 => "B1",
            CefrLevel::B2 => "B2",
            CefrLevel::C1 => "C1",
            CefrLevel::C2 => "C2",
        };
        f.write_str(s)
    }
}

impl FromStr for CefrLevel {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "A1" => Ok(CefrLevel::A1),
            "A2" => Ok(CefrLevel::A2),
            "B1" => Ok(CefrLevel::B1),
            "B2" => Ok(CefrLevel::B2),
            "C1" => Ok(CefrLevel::C1),
            "C2" => Ok(CefrLevel::C2),
            other => Err(format!("unknown CEFR level '{}'", other)),
        }
    }
}

/// A learnable item: a prompt/answer pair with optional quiz extras.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    pub id: ItemId,
    pub level: CefrLevel,
    pub prompt: String,
    pub answer: String,
    /// Multiple-choice options, when the task bank provides them
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub explanation: Option<String>,
}

impl Item {
    pub fn new(id: impl Into<ItemId>, level: CefrLevel, prompt: String, answer: String) -> Self {
        Self {
            id: id.into(),
            level,
            prompt,
            answer,
            options: Vec::new(),
            explanation: None,
        }
    }
}

/// Insertion-ordered, id-indexed collection of items.
pub struct Catalog {
    items: Vec<Item>,
    index: HashMap<ItemId, usize>,
}

impl Catalog {
    /// Build a catalog from items, preserving their order.
    /// Duplicate ids are rejected.
    pub fn new(items: impl IntoIterator<Item = Item>) -> Result<Self> {
        let items: Vec<Item> = items.into_iter().collect();
        let mut index = HashMap::with_capacity(items.len());
        for (pos, item) in items.iter().enumerate() {
            if index.insert(item.id.clone(), pos).is_some() {
                return Err(Error::InvalidArgument(format!(
                    "duplicate item id in catalog: {}",
                    item.id
                )));
            }
        }
        Ok(Self { items, index })
    }

    /// Load vocabulary items from a task bank JSON file, optionally keeping
    /// only one CEFR level. Tasks from other modules (grammar, reading, ...)
    /// are skipped.
    pub fn from_json_file(path: &Path, level: Option<CefrLevel>) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(StoreError::from)?;
        let records: Vec<TaskRecord> =
            serde_json::from_str(&content).map_err(StoreError::from)?;

        let items = records
            .into_iter()
            .filter(|r| r.module.as_deref().map_or(true, |m| m == "vocabulary"))
            .filter(|r| level.map_or(true, |l| r.level == l))
            .map(TaskRecord::into_item)
            .collect::<Vec<_>>();

        log::debug!("loaded {} vocabulary item(s) from {}", items.len(), path.display());
        Self::new(items)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Items in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Item> {
        self.items.iter()
    }

    pub fn get(&self, id: &ItemId) -> Option<&Item> {
        self.index.get(id).map(|&pos| &self.items[pos])
    }

    /// Lookup that treats a missing item as an error.
    pub fn require(&self, id: &ItemId) -> Result<&Item> {
        self.get(id).ok_or_else(|| Error::NotFound(id.clone()))
    }

    /// Insertion position of an item, used for deterministic tie-breaks.
    pub fn position(&self, id: &ItemId) -> Option<usize> {
        self.index.get(id).copied()
    }
}

/// One entry of the task bank file. Ids may be numbers or strings, and the
/// answer may be a single string or a list of accepted alternatives.
#[derive(Debug, Deserialize)]
struct TaskRecord {
    id: RawId,
    level: CefrLevel,
    #[serde(default)]
    module: Option<String>,
    question: String,
    answer: RawAnswer,
    #[serde(default)]
    options: Vec<String>,
    #[serde(default)]
    explanation: Option<String>,
}

impl TaskRecord {
    fn into_item(self) -> Item {
        let id = match self.id {
            RawId::Num(n) => ItemId::new(n.to_string()),
            RawId::Text(s) => ItemId::new(s),
        };
        let answer = match self.answer {
            RawAnswer::One(s) => s,
            // The canonical answer is the first accepted alternative
            RawAnswer::Many(mut v) => {
                if v.is_empty() {
                    String::new()
                } else {
                    v.remove(0)
                }
            }
        };
        Item {
            id,
            level: self.level,
            prompt: self.question,
            answer,
            options: self.options,
            explanation: self.explanation,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawId {
    Num(i64),
    Text(String),
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawAnswer {
    One(String),
    Many(Vec<String>),
}
