use crate::error::Result;
use log::debug;
use std::path::Path;
use wellbase_providers::FileSystem;
use wellbase_types::{NodeId, NodeKind, Tree};

/// Build the tree mirroring `root`.
///
/// A root that is not a directory yields a single file node. A missing root
/// surfaces as the adapter's not-found error.
pub fn build_tree(fs: &dyn FileSystem, root: &Path) -> Result<Tree> {
    let kind = if fs.is_dir(root)? {
        NodeKind::Directory
    } else {
        NodeKind::File
    };

    let mut tree = Tree::new(root, root_name(root), kind);
    if kind == NodeKind::Directory {
        let top = tree.root();
        walk(fs, &mut tree, top, root)?;
    }

    debug!("Built tree for {} ({} nodes)", root.display(), tree.len());
    Ok(tree)
}

fn walk(fs: &dyn FileSystem, tree: &mut Tree, parent: NodeId, dir: &Path) -> Result<()> {
    for name in fs.list_dir(dir)? {
        let path = dir.join(&name);
        if fs.is_dir(&path)? {
            let id = tree.add_child(parent, name, NodeKind::Directory);
            walk(fs, tree, id, &path)?;
        } else {
            tree.add_child(parent, name, NodeKind::File);
        }
    }
    Ok(())
}

fn root_name(root: &Path) -> String {
    match root.file_name() {
        Some(name) => name.to_string_lossy().into_owned(),
        None => root.display().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wellbase_testing::MemoryFileSystem;

    #[test]
    fn test_children_follow_enumeration_order() -> Result<()> {
        let fs = MemoryFileSystem::new("/data/heletz")
            .with_file("/data/heletz/zeta/W9-test.csv", "a\n1\n")
            .with_file("/data/heletz/alpha/W1-test.csv", "a\n1\n")
            .with_dir("/data/heletz/middle");

        let tree = build_tree(&fs, Path::new("/data/heletz"))?;
        let root = tree.root();
        let names: Vec<&str> = tree
            .children(root)
            .iter()
            .map(|&id| tree.node(id).name.as_str())
            .collect();

        assert_eq!(tree.node(root).name, "heletz");
        assert_eq!(names, fs.list_dir(Path::new("/data/heletz"))?);
        assert_eq!(names, vec!["zeta", "alpha", "middle"]);
        Ok(())
    }

    #[test]
    fn test_file_root_is_single_node() -> Result<()> {
        let fs = MemoryFileSystem::new("/data").with_file("/data/W1-test.csv", "a\n1\n");
        let tree = build_tree(&fs, Path::new("/data/W1-test.csv"))?;

        assert_eq!(tree.len(), 1);
        assert_eq!(tree.node(tree.root()).kind, NodeKind::File);
        assert_eq!(tree.node(tree.root()).name, "W1-test.csv");
        Ok(())
    }

    #[test]
    fn test_empty_directory_has_no_children() -> Result<()> {
        let fs = MemoryFileSystem::new("/data").with_dir("/data/empty");
        let tree = build_tree(&fs, Path::new("/data"))?;
        let empty = tree.children(tree.root())[0];

        assert!(tree.node(empty).is_dir());
        assert!(tree.node(empty).is_leaf());
        Ok(())
    }

    #[test]
    fn test_missing_root_is_not_found() {
        let fs = MemoryFileSystem::new("/data");
        let err = build_tree(&fs, Path::new("/nowhere")).unwrap_err();
        assert!(err.is_not_found());
    }
}
