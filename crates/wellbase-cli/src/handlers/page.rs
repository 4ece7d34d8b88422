use crate::output;
use crate::types::OutputFormat;
use anyhow::Result;
use wellbase_runtime::{PageRequest, Workspace};

pub fn handle(
    workspace: &Workspace,
    data_names: Vec<String>,
    well_names: Vec<String>,
    format: OutputFormat,
) -> Result<()> {
    let request = PageRequest {
        data_names,
        well_names,
    };
    let page = workspace.page_data(&request)?;
    output::emit(format, &page, output::page_text)
}
