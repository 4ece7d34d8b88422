use crate::value::Record;
use serde::ser::{SerializeMap, Serializer};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle stage of a well data file, encoded as the file name suffix
/// (`<WELL>-<stage>.<ext>`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Stage {
    Test,
    Production,
    Drilling,
}

impl Stage {
    pub const ALL: [Stage; 3] = [Stage::Test, Stage::Production, Stage::Drilling];

    pub fn as_str(&self) -> &'static str {
        match self {
            Stage::Test => "test",
            Stage::Production => "production",
            Stage::Drilling => "drilling",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "test" => Some(Stage::Test),
            "production" => Some(Stage::Production),
            "drilling" => Some(Stage::Drilling),
            _ => None,
        }
    }

    /// Recognized stage of a file name, if any.
    pub fn from_file_name(file_name: &str) -> Option<Self> {
        Self::parse(stage_suffix(file_name))
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Text between the last `-` and the extension of a file name.
///
/// `W1-production.csv` gives `production`; a name without `-` gives its whole
/// stem.
pub fn stage_suffix(file_name: &str) -> &str {
    let stem = match file_name.rfind('.') {
        Some(dot) if dot > 0 => &file_name[..dot],
        _ => file_name,
    };
    match stem.rfind('-') {
        Some(dash) => &stem[dash + 1..],
        None => stem,
    }
}

/// Fixed three-way split of items by stage.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Buckets<T> {
    pub test: Vec<T>,
    pub production: Vec<T>,
    pub drilling: Vec<T>,
}

impl<T> Default for Buckets<T> {
    fn default() -> Self {
        Self {
            test: Vec::new(),
            production: Vec::new(),
            drilling: Vec::new(),
        }
    }
}

impl<T> Buckets<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, stage: Stage) -> &[T] {
        match stage {
            Stage::Test => &self.test,
            Stage::Production => &self.production,
            Stage::Drilling => &self.drilling,
        }
    }

    pub fn get_mut(&mut self, stage: Stage) -> &mut Vec<T> {
        match stage {
            Stage::Test => &mut self.test,
            Stage::Production => &mut self.production,
            Stage::Drilling => &mut self.drilling,
        }
    }

    pub fn extend(&mut self, stage: Stage, items: impl IntoIterator<Item = T>) {
        self.get_mut(stage).extend(items);
    }

    pub fn len(&self) -> usize {
        self.test.len() + self.production.len() + self.drilling.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Per-stage item counts, in bucket order.
    pub fn counts(&self) -> [(Stage, usize); 3] {
        Stage::ALL.map(|stage| (stage, self.get(stage).len()))
    }
}

/// Decoded rows of one aggregation group, keyed by stage.
pub type BucketResult = Buckets<Record>;

/// An enriched row together with its provenance.
#[derive(Debug, Clone, PartialEq)]
pub struct StagedRow {
    pub stage: Stage,
    pub path: String,
    pub record: Record,
}

impl Serialize for StagedRow {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.record.len() + 2))?;
        for (k, v) in self.record.iter() {
            if k == "stage" || k == "path" {
                continue;
            }
            map.serialize_entry(k, v)?;
        }
        map.serialize_entry("stage", &self.stage)?;
        map.serialize_entry("path", &self.path)?;
        map.end()
    }
}
