use crate::output;
use crate::types::OutputFormat;
use anyhow::Result;
use wellbase_runtime::Workspace;

pub async fn handle(workspace: &Workspace, folder: &str, format: OutputFormat) -> Result<()> {
    let aggregate = workspace.scan_field(folder).await?;
    output::emit(format, &aggregate, output::aggregate_text)
}
