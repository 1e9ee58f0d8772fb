//! Column listing and selection editing.
//!
//! `columns` prints the discovered columns, one per line. `select` loads the
//! persisted selection, applies the one-time default and any requested edits,
//! saves it back and renders the result as a table.

use anyhow::{Result, anyhow};
use log::info;

use crate::{
    cli::{ColumnsArgs, SelectArgs},
    discover::discover_columns,
    io_utils,
    selection::{ColumnSelection, STATE_ENV_VAR, SelectionStore},
    table,
};

pub fn execute(args: &ColumnsArgs) -> Result<()> {
    let inputs = io_utils::load_inputs(&args.input)?;
    io_utils::require_inputs(&inputs)?;
    let texts = inputs.iter().map(|i| i.text.as_str()).collect::<Vec<_>>();
    let columns = discover_columns(&texts);
    for column in &columns {
        println!("{column}");
    }
    info!(
        "Discovered {} column(s) across {} input(s)",
        columns.len(),
        inputs.len()
    );
    Ok(())
}

pub fn execute_select(args: &SelectArgs) -> Result<()> {
    let store = SelectionStore::resolve(args.state.as_deref()).ok_or_else(|| {
        anyhow!("No selection store configured; pass --state or set {STATE_ENV_VAR}")
    })?;
    let inputs = io_utils::load_inputs(&args.input)?;
    let texts = inputs.iter().map(|i| i.text.as_str()).collect::<Vec<_>>();
    let available = discover_columns(&texts);

    let mut selection = store.load()?;
    let mut changed = selection.observe_available(&available);
    if args.all {
        selection.select_all(&available);
        changed = true;
    }
    if args.none {
        selection.deselect_all();
        changed = true;
    }
    for column in &args.toggle {
        selection.toggle(column);
        changed = true;
    }
    if changed {
        store.save(&selection)?;
        info!(
            "Saved {} selected column(s) to {:?}",
            selection.columns().len(),
            store.path()
        );
    }

    print!("{}", render_selection(&available, &selection));
    Ok(())
}

/// One row per available column, then any selected column the inputs lack.
pub fn render_selection(available: &[String], selection: &ColumnSelection) -> String {
    let mark = |selected: bool| (if selected { "[x]" } else { "[ ]" }).to_string();
    let mut rows = available
        .iter()
        .map(|column| {
            vec![
                mark(selection.contains(column)),
                column.clone(),
                String::new(),
            ]
        })
        .collect::<Vec<_>>();
    rows.extend(
        selection
            .columns()
            .iter()
            .filter(|column| !available.contains(column))
            .map(|column| vec![mark(true), column.clone(), "not in inputs".to_string()]),
    );
    let headers = vec![
        "selected".to_string(),
        "column".to_string(),
        "note".to_string(),
    ];
    table::render_table(&headers, &rows)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn render_selection_marks_selected_and_stale_columns() {
        let available = vec!["a".to_string(), "b".to_string()];
        let selection = ColumnSelection::Explicit(vec!["b".to_string(), "gone".to_string()]);
        let rendered = render_selection(&available, &selection);
        let lines: Vec<&str> = rendered.lines().collect();
        assert_eq!(lines[2], "[ ]       a");
        assert_eq!(lines[3], "[x]       b");
        assert_eq!(lines[4], "[x]       gone    not in inputs");
    }
}
