use crate::stage::Stage;
use crate::value::Record;
use serde::ser::{SerializeMap, Serializer};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Index of a node inside a [`Tree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    pub fn index(self) -> usize {
        self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    File,
    Directory,
    /// Synthetic node holding one decoded row, created by enrichment.
    Well,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub name: String,
    pub kind: NodeKind,
    pub parent: Option<NodeId>,
    pub children: Vec<NodeId>,
    pub path: Option<String>,
    pub stage: Option<Stage>,
    pub record: Option<Record>,
}

impl Node {
    fn new(name: String, kind: NodeKind, parent: Option<NodeId>) -> Self {
        Self {
            name,
            kind,
            parent,
            children: Vec::new(),
            path: None,
            stage: None,
            record: None,
        }
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    pub fn is_dir(&self) -> bool {
        self.kind == NodeKind::Directory
    }

    pub fn is_file(&self) -> bool {
        self.kind == NodeKind::File
    }

    pub fn has_extension(&self, ext: &str) -> bool {
        self.name
            .rsplit_once('.')
            .is_some_and(|(stem, e)| !stem.is_empty() && e.eq_ignore_ascii_case(ext))
    }
}

/// Arena of nodes mirroring a file-system subtree.
///
/// Nodes are never removed, so a `NodeId` stays valid for the lifetime of the
/// tree. The root is always the first node.
#[derive(Debug, Clone, PartialEq)]
pub struct Tree {
    base: PathBuf,
    nodes: Vec<Node>,
}

impl Tree {
    /// Create a tree holding only a root node. `base` is the on-disk location
    /// of the root.
    pub fn new(base: impl Into<PathBuf>, root_name: impl Into<String>, kind: NodeKind) -> Self {
        Self {
            base: base.into(),
            nodes: vec![Node::new(root_name.into(), kind, None)],
        }
    }

    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    pub fn base(&self) -> &Path {
        &self.base
    }

    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    pub fn node_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.nodes[id.0]
    }

    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0)
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.nodes[id.0].children
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Append a new child at the end of `parent`'s children.
    pub fn add_child(&mut self, parent: NodeId, name: impl Into<String>, kind: NodeKind) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node::new(name.into(), kind, Some(parent)));
        self.nodes[parent.0].children.push(id);
        id
    }

    /// Names from the root down to `id`, inclusive.
    pub fn ancestry(&self, id: NodeId) -> Vec<String> {
        let mut names = Vec::new();
        let mut current = Some(id);
        while let Some(cur) = current {
            let node = self.node(cur);
            names.push(node.name.clone());
            current = node.parent;
        }
        names.reverse();
        names
    }

    /// Pre-order traversal starting at `from`.
    pub fn preorder(&self, from: NodeId) -> Vec<NodeId> {
        let mut order = Vec::new();
        let mut stack = vec![from];
        while let Some(id) = stack.pop() {
            order.push(id);
            stack.extend(self.children(id).iter().rev().copied());
        }
        order
    }

    pub fn depth(&self, id: NodeId) -> usize {
        let mut depth = 0;
        let mut current = self.node(id).parent;
        while let Some(parent) = current {
            depth += 1;
            current = self.node(parent).parent;
        }
        depth
    }

    /// Serializable view of the subtree rooted at `id`.
    pub fn view(&self, id: NodeId) -> NodeView<'_> {
        NodeView { tree: self, id }
    }
}

/// Nested JSON rendering of a subtree:
/// `{name, type, children?}` for files and directories,
/// record fields plus `type`, `stage` and `path` for well nodes.
#[derive(Clone, Copy)]
pub struct NodeView<'a> {
    tree: &'a Tree,
    id: NodeId,
}

impl Serialize for NodeView<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let node = self.tree.node(self.id);
        let mut map = serializer.serialize_map(None)?;

        if let Some(record) = &node.record {
            for (k, v) in record.iter() {
                if matches!(k, "type" | "stage" | "path" | "children") {
                    continue;
                }
                map.serialize_entry(k, v)?;
            }
        } else {
            map.serialize_entry("name", &node.name)?;
        }
        map.serialize_entry("type", &node.kind)?;
        if let Some(stage) = node.stage {
            map.serialize_entry("stage", &stage)?;
        }
        if let Some(path) = &node.path {
            map.serialize_entry("path", path)?;
        }
        if node.kind == NodeKind::Directory || !node.children.is_empty() {
            let children: Vec<NodeView<'_>> = node
                .children
                .iter()
                .map(|&child| self.tree.view(child))
                .collect();
            map.serialize_entry("children", &children)?;
        }
        map.end()
    }
}
