use crate::value::{Record, Value};
use serde::Serialize;

/// One `MNEM.UNIT  VALUE : DESCRIPTION` line of a LAS header section.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HeaderItem {
    pub mnemonic: String,
    pub unit: String,
    pub value: String,
    pub description: String,
}

/// Sampled values of one curve from the `~A` section.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Curve {
    pub mnemonic: String,
    pub values: Vec<Value>,
}

/// Structured form of a LAS 2.0 well log.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct LasDocument {
    pub version: Vec<HeaderItem>,
    pub well: Vec<HeaderItem>,
    pub curves: Vec<HeaderItem>,
    pub parameters: Vec<HeaderItem>,
    pub other: String,
    pub data: Vec<Curve>,
}

impl LasDocument {
    pub fn well_item(&self, mnemonic: &str) -> Option<&HeaderItem> {
        self.well
            .iter()
            .find(|item| item.mnemonic.eq_ignore_ascii_case(mnemonic))
    }

    /// Well name from the `WELL` header entry.
    pub fn well_name(&self) -> Option<&str> {
        self.well_item("WELL")
            .map(|item| item.value.as_str())
            .filter(|v| !v.is_empty())
    }

    /// Number of depth samples.
    pub fn sample_count(&self) -> usize {
        self.data.first().map(|c| c.values.len()).unwrap_or(0)
    }

    /// Data section as one record per sample, keyed by curve mnemonic.
    pub fn rows(&self) -> Vec<Record> {
        (0..self.sample_count())
            .map(|i| {
                self.data
                    .iter()
                    .map(|curve| {
                        let value = curve.values.get(i).cloned().unwrap_or(Value::Missing);
                        (curve.mnemonic.clone(), value)
                    })
                    .collect()
            })
            .collect()
    }
}
