//! LAS 2.0 well-log decoder.
//!
//! Header sections (`~V`, `~W`, `~C`, `~P`) are parsed into
//! [`HeaderItem`]s, `~O` is kept verbatim, and the `~A` data section is split
//! into one [`Curve`] per `~C` entry. Wrapped data is handled by reading the
//! `~A` section as a flat stream of values.

use crate::error::{Error, Result};
use log::warn;
use wellbase_types::{Curve, HeaderItem, LasDocument, Value};

#[derive(Debug, Clone, Copy, PartialEq)]
enum Section {
    Version,
    Well,
    Curves,
    Parameters,
    Other,
    Ascii,
    Unknown,
}

impl Section {
    fn from_marker(line: &str) -> Self {
        match line[1..].chars().next().map(|c| c.to_ascii_uppercase()) {
            Some('V') => Section::Version,
            Some('W') => Section::Well,
            Some('C') => Section::Curves,
            Some('P') => Section::Parameters,
            Some('O') => Section::Other,
            Some('A') => Section::Ascii,
            _ => Section::Unknown,
        }
    }
}

pub fn decode(text: &str) -> Result<LasDocument> {
    let mut doc = LasDocument::default();
    let mut section = None;
    let mut other_lines = Vec::new();
    let mut samples = Vec::new();

    for raw_line in text.lines() {
        let line = raw_line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        if line.starts_with('~') {
            section = Some(Section::from_marker(line));
            continue;
        }

        match section {
            None => {
                return Err(Error::Decode(
                    "content before the first section marker".to_string(),
                ));
            }
            Some(Section::Version) => doc.version.extend(parse_header_line(line)),
            Some(Section::Well) => doc.well.extend(parse_header_line(line)),
            Some(Section::Curves) => doc.curves.extend(parse_header_line(line)),
            Some(Section::Parameters) => doc.parameters.extend(parse_header_line(line)),
            Some(Section::Other) => other_lines.push(line.to_string()),
            Some(Section::Ascii) => samples.extend(line.split_whitespace().map(str::to_string)),
            Some(Section::Unknown) => {}
        }
    }

    if doc.version.is_empty() {
        return Err(Error::Decode("missing ~V (version) section".to_string()));
    }

    doc.other = other_lines.join("\n");
    doc.data = split_curves(&doc, &samples);
    Ok(doc)
}

/// Parse `MNEM.UNIT  VALUE : DESCRIPTION`.
fn parse_header_line(line: &str) -> Option<HeaderItem> {
    let (left, description) = match line.rsplit_once(':') {
        Some((left, desc)) => (left, desc.trim()),
        None => (line, ""),
    };
    let Some((mnemonic, rest)) = left.split_once('.') else {
        warn!("Skipping malformed LAS header line: {}", line);
        return None;
    };
    let (unit, value) = match rest.find(char::is_whitespace) {
        Some(idx) => (&rest[..idx], rest[idx..].trim()),
        None => (rest, ""),
    };

    Some(HeaderItem {
        mnemonic: mnemonic.trim().to_string(),
        unit: unit.to_string(),
        value: value.to_string(),
        description: description.to_string(),
    })
}

fn split_curves(doc: &LasDocument, samples: &[String]) -> Vec<Curve> {
    let width = doc.curves.len();
    if width == 0 {
        return Vec::new();
    }

    let null = doc
        .well_item("NULL")
        .and_then(|item| item.value.parse::<f64>().ok());

    let complete = samples.len() / width * width;
    if complete != samples.len() {
        warn!(
            "Dropping {} trailing LAS values that do not fill a row",
            samples.len() - complete
        );
    }

    let mut curves: Vec<Curve> = doc
        .curves
        .iter()
        .map(|item| Curve {
            mnemonic: item.mnemonic.clone(),
            values: Vec::with_capacity(complete / width),
        })
        .collect();

    for (i, sample) in samples[..complete].iter().enumerate() {
        let value = match Value::numeric(sample) {
            Value::Float(v) if null.is_some_and(|n| n == v) => Value::Missing,
            other => other,
        };
        curves[i % width].values.push(value);
    }
    curves
}
