//! The `convert` command: resolve columns, build the CSV and deliver it.
//!
//! Column resolution order:
//!
//! 1. `--columns` and `--column` when given. `--columns` values are split on
//!    commas and trimmed; `--column` values are taken verbatim.
//! 2. The persisted selection, after applying the one-time default against the
//!    columns discovered in the current inputs.
//! 3. Otherwise every discovered column.

use anyhow::{Result, anyhow};
use log::{debug, info};

use crate::{
    cli::{ConvertArgs, split_column_list},
    discover::discover_columns,
    encode::{CSV_MIME_TYPE, build_csv},
    io_utils,
    preview::render_preview,
    selection::SelectionStore,
};

pub fn execute(args: &ConvertArgs) -> Result<()> {
    let inputs = io_utils::load_inputs(&args.input)?;
    io_utils::require_inputs(&inputs)?;
    let texts = inputs.iter().map(|i| i.text.as_str()).collect::<Vec<_>>();

    let columns = resolve_columns(args, &texts)?;
    debug!("Requested columns: {:?}", columns);

    let document = build_csv(&texts, &columns)
        .map_err(|err| anyhow!("Error converting JSON to CSV: {err}"))?;

    if let Some(rows) = args.preview {
        let limit = (rows > 0).then_some(rows);
        print!("{}", render_preview(&document, limit));
        info!(
            "Previewed {} of {} row(s)",
            limit.map_or(document.row_count(), |l| l.min(document.row_count())),
            document.row_count()
        );
        return Ok(());
    }

    let output_encoding = io_utils::resolve_encoding(args.output_encoding.as_deref())?;
    let output_path = io_utils::resolve_output_path(args.output.as_deref());
    io_utils::write_output(output_path.as_deref(), document.as_str(), output_encoding)?;
    info!(
        "Wrote {} row(s) across {} column(s) to {} ({CSV_MIME_TYPE})",
        document.row_count(),
        document.columns().len(),
        output_path
            .as_ref()
            .map(|p| format!("{p:?}"))
            .unwrap_or_else(|| "stdout".into())
    );
    Ok(())
}

fn resolve_columns(args: &ConvertArgs, texts: &[&str]) -> Result<Vec<String>> {
    let mut explicit = split_column_list(&args.columns);
    explicit.extend(args.column.iter().cloned());
    if !explicit.is_empty() {
        return Ok(explicit);
    }
    let Some(store) = SelectionStore::resolve(args.state.as_deref()) else {
        return Ok(Vec::new());
    };
    let mut selection = store.load()?;
    if selection.observe_available(&discover_columns(texts)) {
        store.save(&selection)?;
        info!("Selected all columns by default in {:?}", store.path());
    }
    Ok(selection.columns().to_vec())
}
