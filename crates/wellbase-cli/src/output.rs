//! Plain-text rendering. JSON output goes straight through serde.

use crate::types::OutputFormat;
use anyhow::Result;
use serde::Serialize;
use std::fmt::Write;
use wellbase_runtime::{PageData, PageEntry};
use wellbase_types::{Aggregate, Buckets, NodeKind, Record, StagedRow, Tree};

/// Print `value` as pretty JSON, or through `plain` for the text format.
pub fn emit<T: Serialize + ?Sized>(
    format: OutputFormat,
    value: &T,
    plain: impl FnOnce(&T) -> String,
) -> Result<()> {
    let text = match format {
        OutputFormat::Json => serde_json::to_string_pretty(value)?,
        OutputFormat::Plain => plain(value),
    };
    println!("{}", text.trim_end());
    Ok(())
}

/// Indented listing; directories carry a trailing `/`.
pub fn tree_text(tree: &Tree) -> String {
    let mut out = String::new();
    let root_depth = tree.depth(tree.root());
    for id in tree.preorder(tree.root()) {
        let node = tree.node(id);
        let indent = "  ".repeat(tree.depth(id) - root_depth);
        let _ = match (node.kind, node.stage) {
            (NodeKind::Directory, _) => writeln!(out, "{}{}/", indent, node.name),
            (NodeKind::Well, Some(stage)) => writeln!(out, "{}{} [{}]", indent, node.name, stage),
            _ => writeln!(out, "{}{}", indent, node.name),
        };
    }
    out
}

pub fn record_line(record: &Record) -> String {
    record
        .iter()
        .map(|(k, v)| format!("{}={}", k, v))
        .collect::<Vec<_>>()
        .join(" ")
}

pub fn records_text(rows: &[Record]) -> String {
    if rows.is_empty() {
        return "(no rows)".to_string();
    }
    rows.iter().map(record_line).collect::<Vec<_>>().join("\n")
}

/// One line of stage counts per aggregation group.
pub fn aggregate_text(aggregate: &Aggregate) -> String {
    let groups = aggregate.groups();
    if groups.is_empty() {
        return "(no data)".to_string();
    }

    let mut out = String::new();
    for (i, group) in groups.iter().enumerate() {
        let counts = group
            .counts()
            .iter()
            .map(|(stage, n)| format!("{}={}", stage, n))
            .collect::<Vec<_>>()
            .join(" ");
        let _ = writeln!(out, "group {}: {}", i + 1, counts);
    }
    out
}

pub fn staged_text(buckets: &Buckets<StagedRow>) -> String {
    let mut out = String::new();
    for (stage, count) in buckets.counts() {
        let _ = writeln!(out, "{} ({})", stage, count);
        for row in buckets.get(stage) {
            let _ = writeln!(out, "  {}  {}", row.path, record_line(&row.record));
        }
    }
    out
}

pub fn page_text(page: &PageData) -> String {
    let mut out = String::new();
    for (name, section) in page.iter() {
        let _ = writeln!(out, "{}:", name);
        if section.is_empty() {
            let _ = writeln!(out, "  (empty)");
        }
        for (key, entry) in section.iter() {
            let summary = match entry {
                PageEntry::Rows(rows) => format!("{} rows", rows.len()),
                PageEntry::Log(doc) => format!(
                    "{} curves, {} samples",
                    doc.data.len(),
                    doc.sample_count()
                ),
                PageEntry::Row(record) => record_line(record),
                PageEntry::Value(value) => value.to_string(),
                PageEntry::Status { status } => status.clone(),
                PageEntry::Unavailable(message) => message.clone(),
            };
            let _ = writeln!(out, "  {}: {}", key, summary);
        }
    }
    out
}
