use crate::output;
use crate::types::OutputFormat;
use anyhow::Result;
use wellbase_runtime::Workspace;

pub fn handle(workspace: &Workspace, path: &str, format: OutputFormat) -> Result<()> {
    let rows = workspace.wells(path)?;
    output::emit(format, rows.as_slice(), output::records_text)
}
