use crate::error::{Error, Result};
use std::path::PathBuf;
use wellbase_types::{NodeId, NodeKind, Tree};

/// A node located by name, with the names from the root down to it.
#[derive(Debug, Clone, PartialEq)]
pub struct Found {
    pub node: NodeId,
    pub segments: Vec<String>,
}

/// First node in pre-order whose name equals `target` (case-sensitive).
///
/// Later nodes sharing the name are never returned.
pub fn find_by_name(tree: &Tree, target: &str) -> Option<Found> {
    tree.preorder(tree.root())
        .into_iter()
        .find(|&id| tree.node(id).name == target)
        .map(|node| Found {
            node,
            segments: tree.ancestry(node),
        })
}

/// Join path segments with `/`. At least a root and one entry are required.
pub fn path_string<S: AsRef<str>>(segments: &[S]) -> Result<String> {
    if segments.len() < 2 {
        return Err(Error::InvalidInput(format!(
            "path needs at least two segments, got {}",
            segments.len()
        )));
    }
    let parts: Vec<&str> = segments.iter().map(AsRef::as_ref).collect();
    Ok(parts.join("/"))
}

/// Set `path` on every node: `""` for the root, `parent + "/" + name` below.
///
/// Well nodes take their parent's path, which is the file they were decoded
/// from.
pub fn annotate_paths(tree: &mut Tree) {
    for id in tree.preorder(tree.root()) {
        let node = tree.node(id);
        let path = match node.parent {
            None => String::new(),
            Some(parent) => {
                let parent_path = tree.node(parent).path.as_deref().unwrap_or_default();
                if node.kind == NodeKind::Well {
                    parent_path.to_string()
                } else {
                    format!("{}/{}", parent_path, node.name)
                }
            }
        };
        tree.node_mut(id).path = Some(path);
    }
}

/// All nodes without children, left to right.
pub fn collect_leaves(tree: &Tree) -> Vec<NodeId> {
    tree.preorder(tree.root())
        .into_iter()
        .filter(|&id| tree.node(id).is_leaf())
        .collect()
}

/// On-disk location of a file or directory node.
pub fn locate(tree: &Tree, id: NodeId) -> PathBuf {
    let mut location = tree.base().to_path_buf();
    for segment in tree.ancestry(id).iter().skip(1) {
        location.push(segment);
    }
    location
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Tree {
        // fields/
        //   north/W1-test.csv
        //   south/W1-test.csv
        //   south/W2-production.csv
        let mut tree = Tree::new("/srv/fields", "fields", NodeKind::Directory);
        let north = tree.add_child(tree.root(), "north", NodeKind::Directory);
        tree.add_child(north, "W1-test.csv", NodeKind::File);
        let south = tree.add_child(tree.root(), "south", NodeKind::Directory);
        tree.add_child(south, "W1-test.csv", NodeKind::File);
        tree.add_child(south, "W2-production.csv", NodeKind::File);
        tree
    }

    #[test]
    fn test_find_unique_name() {
        let tree = sample();
        let found = find_by_name(&tree, "W2-production.csv").unwrap();

        assert_eq!(tree.node(found.node).name, "W2-production.csv");
        assert_eq!(found.segments, vec!["fields", "south", "W2-production.csv"]);
        assert_eq!(found.segments.len(), tree.depth(found.node) + 1);
    }

    #[test]
    fn test_find_returns_preorder_first_duplicate() {
        let tree = sample();
        let found = find_by_name(&tree, "W1-test.csv").unwrap();
        assert_eq!(found.segments, vec!["fields", "north", "W1-test.csv"]);
    }

    #[test]
    fn test_find_is_case_sensitive_and_reports_absence() {
        let tree = sample();
        assert!(find_by_name(&tree, "w1-test.csv").is_none());
        assert!(find_by_name(&tree, "missing.csv").is_none());
        assert_eq!(find_by_name(&tree, "fields").unwrap().segments, vec!["fields"]);
    }

    #[test]
    fn test_path_string() {
        assert_eq!(path_string(&["root", "a", "b"]).unwrap(), "root/a/b");
        assert_eq!(path_string(&["root", "a"]).unwrap(), "root/a");
        assert!(matches!(path_string(&["only"]), Err(Error::InvalidInput(_))));
        assert!(matches!(
            path_string::<&str>(&[]),
            Err(Error::InvalidInput(_))
        ));
    }

    #[test]
    fn test_annotate_paths_is_idempotent() {
        let mut tree = sample();
        annotate_paths(&mut tree);
        let first: Vec<Option<String>> = tree
            .preorder(tree.root())
            .iter()
            .map(|&id| tree.node(id).path.clone())
            .collect();

        annotate_paths(&mut tree);
        let second: Vec<Option<String>> = tree
            .preorder(tree.root())
            .iter()
            .map(|&id| tree.node(id).path.clone())
            .collect();

        assert_eq!(first, second);
        assert_eq!(first[0].as_deref(), Some(""));
        assert_eq!(first[2].as_deref(), Some("/north/W1-test.csv"));
    }

    #[test]
    fn test_collect_leaves_left_to_right() {
        let mut tree = sample();
        let empty = tree.add_child(tree.root(), "empty", NodeKind::Directory);
        let names: Vec<String> = collect_leaves(&tree)
            .into_iter()
            .map(|id| tree.ancestry(id).join("/"))
            .collect();

        assert_eq!(
            names,
            vec![
                "fields/north/W1-test.csv",
                "fields/south/W1-test.csv",
                "fields/south/W2-production.csv",
                "fields/empty",
            ]
        );
        assert!(tree.node(empty).is_leaf());
    }

    #[test]
    fn test_locate_joins_base() {
        let tree = sample();
        let found = find_by_name(&tree, "W2-production.csv").unwrap();
        assert_eq!(
            locate(&tree, found.node),
            PathBuf::from("/srv/fields/south/W2-production.csv")
        );
        assert_eq!(locate(&tree, tree.root()), PathBuf::from("/srv/fields"));
    }
}
