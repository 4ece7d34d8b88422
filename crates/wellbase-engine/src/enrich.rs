use crate::error::{Error, Result};
use crate::index::{annotate_paths, collect_leaves, locate};
use log::debug;
use wellbase_providers::{CsvDecoder, FileSystem, las};
use wellbase_types::{Buckets, NodeId, NodeKind, Record, Stage, StagedRow, Tree};

/// Graft decoded rows onto the tree.
///
/// Every file leaf gets one [`NodeKind::Well`] child per decoded row, carrying
/// the row, the stage parsed from the file name and the file's path. `.las`
/// leaves are read as well logs, everything else as numeric CSV. Returns the
/// number of rows grafted.
pub fn enrich(tree: &mut Tree, fs: &dyn FileSystem, decoder: &CsvDecoder) -> Result<usize> {
    annotate_paths(tree);

    let mut grafted = 0;
    for leaf in collect_leaves(tree) {
        let node = tree.node(leaf);
        if node.kind != NodeKind::File {
            continue;
        }

        let location = locate(tree, leaf);
        let rows = if node.has_extension("las") {
            let text = fs.read_to_string(&location)?;
            las::decode(&text)
                .map_err(|err| Error::File(location, err))?
                .rows()
        } else {
            let bytes = fs.read(&location)?;
            decoder
                .decode_numeric(&bytes)
                .map_err(|err| Error::File(location, err))?
        };

        let stage = Stage::from_file_name(&node.name);
        let path = node.path.clone();
        let fallback_name = file_stem(&node.name).to_string();

        grafted += rows.len();
        for row in rows {
            let name = row
                .get_str("well")
                .map(str::to_string)
                .unwrap_or_else(|| fallback_name.clone());
            let id = tree.add_child(leaf, name, NodeKind::Well);
            let well = tree.node_mut(id);
            well.stage = stage;
            well.path = path.clone();
            well.record = Some(row);
        }
    }

    debug!("Enriched tree with {} rows", grafted);
    Ok(grafted)
}

/// Group every enriched leaf with a recognized stage into its bucket.
pub fn flatten_by_stage(tree: &Tree) -> Buckets<StagedRow> {
    let mut buckets = Buckets::new();
    for leaf in collect_leaves(tree) {
        let node = tree.node(leaf);
        let (Some(stage), Some(record)) = (node.stage, &node.record) else {
            continue;
        };
        buckets.extend(
            stage,
            [StagedRow {
                stage,
                path: node.path.clone().unwrap_or_default(),
                record: record.clone(),
            }],
        );
    }
    buckets
}

/// Rows grafted under the node at `leaf`, in order.
pub fn grafted_records(tree: &Tree, leaf: NodeId) -> Vec<&Record> {
    tree.children(leaf)
        .iter()
        .filter_map(|&id| tree.node(id).record.as_ref())
        .collect()
}

fn file_stem(name: &str) -> &str {
    match name.rfind('.') {
        Some(dot) if dot > 0 => &name[..dot],
        _ => name,
    }
}
