use crate::types::OutputFormat;
use anyhow::Result;
use serde_json::json;
use wellbase_runtime::Workspace;

pub fn handle(workspace: &Workspace, name: &str, format: OutputFormat) -> Result<()> {
    let (tree, found) = workspace.find(name)?;
    let path = wellbase_engine::path_string(found.segments.as_slice())?;

    match format {
        OutputFormat::Plain => println!("{}", path),
        OutputFormat::Json => {
            let node = tree.node(found.node);
            let value = json!({
                "name": node.name,
                "type": node.kind,
                "path": path,
                "location": wellbase_engine::locate(&tree, found.node),
            });
            println!("{}", serde_json::to_string_pretty(&value)?);
        }
    }
    Ok(())
}
