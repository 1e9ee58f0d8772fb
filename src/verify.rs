use anyhow::{Result, anyhow};
use log::info;

use crate::{cli::ValidateArgs, document::InputSet, io_utils, table};

pub fn execute(args: &ValidateArgs) -> Result<()> {
    let inputs = io_utils::load_inputs(&args.input)?;
    io_utils::require_inputs(&inputs)?;
    let set = InputSet::from_texts(inputs.iter().map(|i| i.text.clone()));

    let statuses = set.validation_errors();
    let rows = inputs
        .iter()
        .zip(&statuses)
        .enumerate()
        .map(|(idx, (input, status))| {
            vec![
                (idx + 1).to_string(),
                input.label.clone(),
                status.unwrap_or("ok").to_string(),
            ]
        })
        .collect::<Vec<_>>();
    let headers = vec!["#".to_string(), "input".to_string(), "status".to_string()];
    table::print_table(&headers, &rows);

    let invalid = statuses.iter().filter(|s| s.is_some()).count();
    if invalid > 0 {
        return Err(anyhow!(
            "{invalid} of {} input(s) contain invalid JSON",
            inputs.len()
        ));
    }
    info!("✓ {} input(s) parsed as JSON", inputs.len());
    Ok(())
}
