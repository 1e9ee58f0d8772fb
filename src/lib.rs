pub mod cli;
pub mod columns;
pub mod convert;
pub mod data;
pub mod discover;
pub mod document;
pub mod encode;
pub mod error;
pub mod io_utils;
pub mod preview;
pub mod selection;
pub mod table;
pub mod verify;

use std::{env, sync::OnceLock};

use anyhow::Result;
use clap::Parser;
use log::LevelFilter;

use crate::cli::{Cli, Commands};

pub use crate::{
    data::CellValue,
    discover::discover_columns,
    document::InputSet,
    encode::{CSV_MIME_TYPE, CsvDocument, build_csv},
    error::ConversionError,
    selection::{ColumnSelection, SelectionStore},
};

static LOGGER: OnceLock<()> = OnceLock::new();

fn init_logging() {
    LOGGER.get_or_init(|| {
        let mut builder = env_logger::Builder::from_env(env_logger::Env::default());
        if env::var("RUST_LOG").is_err() {
            builder.filter_module("json_csv", LevelFilter::Info);
        }
        let _ = builder.format_timestamp_millis().try_init();
    });
}

pub fn run() -> Result<()> {
    init_logging();
    let cli = Cli::parse();
    match cli.command {
        Commands::Columns(args) => columns::execute(&args),
        Commands::Validate(args) => verify::execute(&args),
        Commands::Select(args) => columns::execute_select(&args),
        Commands::Convert(args) => convert::execute(&args),
    }
}
