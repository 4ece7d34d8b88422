use crate::output;
use crate::types::OutputFormat;
use anyhow::Result;
use wellbase_runtime::Workspace;

pub fn handle(workspace: &Workspace, name: &str, format: OutputFormat) -> Result<()> {
    let data = workspace.file(name)?;
    output::emit(format, &data, |data| {
        format!("{}\n{}", data.path, output::records_text(&data.rows))
    })
}
