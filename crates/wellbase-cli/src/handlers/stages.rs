use crate::output;
use crate::types::OutputFormat;
use anyhow::Result;
use wellbase_runtime::Workspace;

pub fn handle(workspace: &Workspace, folder: &str, format: OutputFormat) -> Result<()> {
    let buckets = workspace.stages(folder)?;
    output::emit(format, &buckets, output::staged_text)
}
