//! I/O utilities for reading JSON inputs and writing CSV output.
//!
//! All file I/O in json-csv flows through this module. It provides:
//!
//! - **Encoding**: input decoding and output transcoding via `encoding_rs`,
//!   defaulting to UTF-8.
//! - **stdin/stdout**: the `-` path convention routes through standard streams.
//! - **Export naming**: an output path naming a directory receives `data.csv`.

use std::{
    fs::{self, File},
    io::{self, BufWriter, Read, Write},
    path::{Path, PathBuf},
};

use anyhow::{Context, Result, anyhow};
use encoding_rs::{Encoding, UTF_8};

use crate::{cli::InputArgs, encode::DEFAULT_EXPORT_FILE_NAME};

/// One input document together with a label naming where it came from.
#[derive(Debug, Clone)]
pub struct NamedInput {
    pub label: String,
    pub text: String,
}

pub fn is_dash(path: &Path) -> bool {
    path == Path::new("-")
}

pub fn resolve_encoding(label: Option<&str>) -> Result<&'static Encoding> {
    if let Some(value) = label {
        Encoding::for_label(value.trim().as_bytes())
            .ok_or_else(|| anyhow!("Unknown encoding '{value}'"))
    } else {
        Ok(UTF_8)
    }
}

pub fn decode_bytes(bytes: &[u8], encoding: &'static Encoding) -> Result<String> {
    let (text, _, had_errors) = encoding.decode(bytes);
    if had_errors {
        Err(anyhow!(
            "Failed to decode text with encoding {}",
            encoding.name()
        ))
    } else {
        Ok(text.into_owned())
    }
}

pub fn encode_text(text: &str, encoding: &'static Encoding) -> Result<Vec<u8>> {
    let (encoded, _, had_errors) = encoding.encode(text);
    if had_errors {
        Err(anyhow!(
            "Failed to encode text using {}",
            encoding.name()
        ))
    } else {
        Ok(encoded.into_owned())
    }
}

/// Reads one JSON input document from a file or, for `-`, from stdin.
pub fn read_input(path: &Path, encoding: &'static Encoding) -> Result<String> {
    let mut bytes = Vec::new();
    if is_dash(path) {
        io::stdin()
            .lock()
            .read_to_end(&mut bytes)
            .context("Reading input from stdin")?;
    } else {
        File::open(path)
            .with_context(|| format!("Opening input file {path:?}"))?
            .read_to_end(&mut bytes)
            .with_context(|| format!("Reading input file {path:?}"))?;
    }
    decode_bytes(&bytes, encoding).with_context(|| format!("Decoding input {path:?}"))
}

/// Loads `--input` files in order, followed by inline `--json` documents.
pub fn load_inputs(args: &InputArgs) -> Result<Vec<NamedInput>> {
    let encoding = resolve_encoding(args.input_encoding.as_deref())?;
    let mut inputs = Vec::with_capacity(args.inputs.len() + args.json.len());
    for path in &args.inputs {
        let label = if is_dash(path) {
            "stdin".to_string()
        } else {
            path.display().to_string()
        };
        inputs.push(NamedInput {
            label,
            text: read_input(path, encoding)?,
        });
    }
    for (idx, text) in args.json.iter().enumerate() {
        inputs.push(NamedInput {
            label: format!("--json #{}", idx + 1),
            text: text.clone(),
        });
    }
    Ok(inputs)
}

pub fn require_inputs(inputs: &[NamedInput]) -> Result<()> {
    if inputs.is_empty() {
        Err(anyhow!("At least one JSON input must be provided"))
    } else {
        Ok(())
    }
}

/// Where output should go. Directories receive the default export name.
pub fn resolve_output_path(path: Option<&Path>) -> Option<PathBuf> {
    match path {
        Some(p) if is_dash(p) => None,
        Some(p) if p.is_dir() => Some(p.join(DEFAULT_EXPORT_FILE_NAME)),
        Some(p) => Some(p.to_path_buf()),
        None => None,
    }
}

/// Writes `text` to `path` (stdout when `None`), transcoding when required.
pub fn write_output(path: Option<&Path>, text: &str, encoding: &'static Encoding) -> Result<()> {
    let bytes = if encoding == UTF_8 {
        text.as_bytes().to_vec()
    } else {
        encode_text(text, encoding)?
    };
    let mut writer: Box<dyn Write> = match path {
        Some(p) => {
            if let Some(parent) = p.parent().filter(|parent| !parent.as_os_str().is_empty()) {
                fs::create_dir_all(parent)
                    .with_context(|| format!("Creating output directory {parent:?}"))?;
            }
            Box::new(BufWriter::new(
                File::create(p).with_context(|| format!("Creating output file {p:?}"))?,
            ))
        }
        None => Box::new(io::stdout().lock()),
    };
    writer.write_all(&bytes).context("Writing output")?;
    writer.flush().context("Flushing output")
}

#[cfg(test)]
mod tests {
    use super::*;
    use encoding_rs::WINDOWS_1252;
    use tempfile::tempdir;

    #[test]
    fn resolve_encoding_defaults_to_utf8() {
        assert_eq!(resolve_encoding(None).unwrap(), UTF_8);
        assert_eq!(resolve_encoding(Some(" windows-1252 ")).unwrap(), WINDOWS_1252);
        assert!(resolve_encoding(Some("not-an-encoding")).is_err());
    }

    #[test]
    fn output_directory_receives_default_name() {
        let dir = tempdir().expect("temp dir");
        assert_eq!(
            resolve_output_path(Some(dir.path())),
            Some(dir.path().join("data.csv"))
        );
        assert_eq!(resolve_output_path(Some(Path::new("-"))), None);
        assert_eq!(resolve_output_path(None), None);
    }

    #[test]
    fn load_inputs_orders_files_before_inline_json() {
        let dir = tempdir().expect("temp dir");
        let path = dir.path().join("a.json");
        fs::write(&path, "{\"a\": 1}").unwrap();
        let args = InputArgs {
            inputs: vec![path.clone()],
            json: vec!["[]".to_string()],
            input_encoding: None,
        };
        let inputs = load_inputs(&args).unwrap();
        assert_eq!(inputs.len(), 2);
        assert_eq!(inputs[0].label, path.display().to_string());
        assert_eq!(inputs[0].text, "{\"a\": 1}");
        assert_eq!(inputs[1].label, "--json #1");
        assert!(require_inputs(&inputs).is_ok());
        assert!(require_inputs(&[]).is_err());
    }

    #[test]
    fn write_then_read_with_legacy_encoding() {
        let dir = tempdir().expect("temp dir");
        let path = dir.path().join("nested").join("out.csv");
        write_output(Some(path.as_path()), "name\nCaf\u{e9}", WINDOWS_1252).unwrap();
        let raw = fs::read(&path).unwrap();
        assert_eq!(raw.last(), Some(&0xE9));
        assert_eq!(read_input(&path, WINDOWS_1252).unwrap(), "name\nCaf\u{e9}");
    }
}
