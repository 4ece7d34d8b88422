use crate::output;
use crate::types::OutputFormat;
use anyhow::Result;
use wellbase_runtime::Workspace;

pub fn handle(workspace: &Workspace, format: OutputFormat) -> Result<()> {
    let tree = workspace.reservoir_tree()?;
    output::emit(format, &tree.view(tree.root()), |_| output::tree_text(&tree))
}
