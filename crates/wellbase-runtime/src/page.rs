//! Page data: per-well datasets gathered from the data root.
//!
//! Each requested data name maps to a section keyed by well (or polygon,
//! or survey). Most names are folders of `<WELL>.csv` files; `polygons`,
//! `safety`, `seismic` and `reserves` have their own layouts, and the
//! configured log data name holds `<WELL>.las` well logs.

use crate::config::Config;
use crate::error::{Error, Result};
use log::{debug, warn};
use serde::ser::{SerializeMap, Serializer};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use wellbase_providers::{CsvDecoder, FileSystem, las};
use wellbase_types::{LasDocument, Record, Value};

/// Placeholder returned for a requested file that cannot be read.
pub const UNAVAILABLE: &str = "File wasn't found or access was denied.";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageRequest {
    pub data_names: Vec<String>,
    pub well_names: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum PageEntry {
    Rows(Vec<Record>),
    Log(LasDocument),
    Row(Record),
    Value(Value),
    Status { status: String },
    Unavailable(String),
}

impl PageEntry {
    fn unavailable() -> Self {
        PageEntry::Unavailable(UNAVAILABLE.to_string())
    }
}

/// Ordered key → entry mapping, serialized as a JSON object.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Section {
    entries: Vec<(String, PageEntry)>,
}

impl Section {
    pub fn insert(&mut self, key: impl Into<String>, entry: PageEntry) {
        let key = key.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(slot) => slot.1 = entry,
            None => self.entries.push((key, entry)),
        }
    }

    pub fn get(&self, key: &str) -> Option<&PageEntry> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, e)| e)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &PageEntry)> {
        self.entries.iter().map(|(k, e)| (k.as_str(), e))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Serialize for Section {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (k, v) in &self.entries {
            map.serialize_entry(k, v)?;
        }
        map.end()
    }
}

/// Sections in request order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PageData {
    sections: Vec<(String, Section)>,
}

impl PageData {
    pub fn section(&self, name: &str) -> Option<&Section> {
        self.sections.iter().find(|(k, _)| k == name).map(|(_, s)| s)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Section)> {
        self.sections.iter().map(|(k, s)| (k.as_str(), s))
    }

    pub fn len(&self) -> usize {
        self.sections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }
}

impl Serialize for PageData {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.sections.len()))?;
        for (k, v) in &self.sections {
            map.serialize_entry(k, v)?;
        }
        map.end()
    }
}

pub(crate) struct PageLoader<'a> {
    fs: &'a dyn FileSystem,
    config: &'a Config,
    decoder: CsvDecoder,
}

impl<'a> PageLoader<'a> {
    pub(crate) fn new(fs: &'a dyn FileSystem, config: &'a Config) -> Self {
        Self {
            fs,
            config,
            decoder: config.decoder(),
        }
    }

    pub(crate) fn load(&self, request: &PageRequest) -> Result<PageData> {
        for name in request.data_names.iter().chain(&request.well_names) {
            validate_segment(name)?;
        }

        let mut page = PageData::default();
        for data_name in &request.data_names {
            debug!("Loading page section {}", data_name);
            let section = match data_name.as_str() {
                "polygons" => self.polygons()?,
                "safety" => self.safety(&request.well_names)?,
                "seismic" => self.seismic()?,
                "reserves" => self.reserves(&request.well_names)?,
                name if name == self.config.page.log_data_name => {
                    self.well_logs(name, &request.well_names)?
                }
                name => self.well_tables(name, &request.well_names)?,
            };
            page.sections.retain(|(k, _)| k != data_name);
            page.sections.push((data_name.clone(), section));
        }
        Ok(page)
    }

    fn root(&self) -> &Path {
        &self.config.roots.data
    }

    fn well_tables(&self, data_name: &str, wells: &[String]) -> Result<Section> {
        let mut section = Section::default();
        for well in wells {
            let path = self
                .root()
                .join(data_name)
                .join(format!("{}.csv", well.to_uppercase()));
            let entry = match self.rows(&path, true)? {
                Some(rows) => PageEntry::Rows(rows),
                None => PageEntry::unavailable(),
            };
            section.insert(well.clone(), entry);
        }
        Ok(section)
    }

    fn well_logs(&self, data_name: &str, wells: &[String]) -> Result<Section> {
        let mut section = Section::default();
        for well in wells {
            let path = self
                .root()
                .join(data_name)
                .join(format!("{}.las", well.to_uppercase()));
            let entry = match self.fs.read_to_string(&path) {
                Ok(text) => PageEntry::Log(las::decode(&text)?),
                Err(err) if err.is_not_found() => PageEntry::unavailable(),
                Err(err) => return Err(err.into()),
            };
            section.insert(well.clone(), entry);
        }
        Ok(section)
    }

    fn polygons(&self) -> Result<Section> {
        let mut section = Section::default();
        for polygon in &self.config.page.polygons {
            let path = self.root().join("polygons").join(format!("{}.csv", polygon));
            let entry = match self.rows(&path, true)? {
                Some(rows) => PageEntry::Rows(rows),
                None => PageEntry::unavailable(),
            };
            section.insert(polygon.clone(), entry);
        }
        Ok(section)
    }

    fn safety(&self, wells: &[String]) -> Result<Section> {
        let mut section = Section::default();
        let path = self.root().join("safety").join("safety.csv");
        for row in self.shared_rows(&path, true)? {
            let Some(row_well) = row.get_str("well") else {
                continue;
            };
            for well in wells.iter().filter(|w| w.eq_ignore_ascii_case(row_well)) {
                let days = row
                    .get("days_without_incidents")
                    .cloned()
                    .unwrap_or(Value::Missing);
                section.insert(well.clone(), PageEntry::Value(days));
            }
        }
        Ok(section)
    }

    fn seismic(&self) -> Result<Section> {
        let mut section = Section::default();
        let path = self.root().join("seismic").join("seismic_status.csv");
        for row in self.shared_rows(&path, false)? {
            let (Some(survey), Some(status)) = (row.get_str("seismic_survey"), row.get_str("status"))
            else {
                continue;
            };
            section.insert(
                survey,
                PageEntry::Status {
                    status: status.to_string(),
                },
            );
        }
        Ok(section)
    }

    fn reserves(&self, wells: &[String]) -> Result<Section> {
        let mut section = Section::default();
        let path = self.root().join("reserves").join("reserves.csv");
        let rows = self.shared_rows(&path, false)?;
        for well in wells {
            for row in rows.iter().filter(|r| r.get_str("name") == Some(well.as_str())) {
                section.insert(well.clone(), PageEntry::Row(row.clone()));
            }
        }
        Ok(section)
    }

    /// Rows of a dataset-wide file; a missing file yields no rows.
    fn shared_rows(&self, path: &Path, numeric: bool) -> Result<Vec<Record>> {
        match self.rows(path, numeric)? {
            Some(rows) => Ok(rows),
            None => {
                warn!("{} not found, section left empty", path.display());
                Ok(Vec::new())
            }
        }
    }

    fn rows(&self, path: &Path, numeric: bool) -> Result<Option<Vec<Record>>> {
        let bytes = match self.fs.read(path) {
            Ok(bytes) => bytes,
            Err(err) if err.is_not_found() => return Ok(None),
            Err(err) => return Err(err.into()),
        };
        let rows = if numeric {
            self.decoder.decode_numeric(&bytes)?
        } else {
            self.decoder.decode(&bytes)?
        };
        Ok(Some(rows))
    }
}

/// Reject names that would escape their data folder.
fn validate_segment(name: &str) -> Result<()> {
    let path = PathBuf::from(name);
    let single = path.components().count() == 1
        && matches!(path.components().next(), Some(std::path::Component::Normal(_)));
    if name.is_empty() || !single {
        return Err(Error::InvalidInput(format!(
            "'{}' is not a plain file or folder name",
            name
        )));
    }
    Ok(())
}
