//! Generate command implementation

use crate::error::{CliError, CliResult};
use crate::generator::generate_client_code;
use crate::utils::config::determine_output;
use shugen_compiler::compile_source;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

pub struct Options {
    /// Declaration file to read.
    pub input: String,
    /// Explicit output path; falls back to config, then the default.
    pub output: Option<String>,
}

pub fn run(options: &Options) -> i32 {
    match run_inner(options) {
        Ok(output_path) => {
            println!("✓ generate {} done", output_path.display());
            0
        }
        Err(e) => {
            eprintln!("✗ Generation failed");
            eprintln!("  Error: {e}");
            1
        }
    }
}

fn run_inner(options: &Options) -> CliResult<PathBuf> {
    let input_path = PathBuf::from(&options.input);
    if !input_path.exists() {
        return Err(CliError::FileNotFound(input_path));
    }

    let source = fs::read_to_string(&input_path)?;
    let package = compile_source(&source)?;
    info!(
        package = %package.name,
        clients = package.clients.len(),
        funcs = package.func_count(),
        "extracted client declarations"
    );

    let code = generate_client_code(&package)?;
    let output_path = determine_output(options.output.as_deref())?;
    write_atomically(&output_path, &code)?;

    Ok(output_path)
}

/// Replace `path` with `contents` without ever leaving a partially written file behind.
fn write_atomically(path: &Path, contents: &str) -> CliResult<()> {
    let write_failure = |source| CliError::WriteFailure {
        path: path.to_path_buf(),
        source,
    };

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    fs::create_dir_all(dir).map_err(write_failure)?;

    let mut temp = tempfile::NamedTempFile::new_in(dir).map_err(write_failure)?;
    temp.write_all(contents.as_bytes()).map_err(write_failure)?;
    temp.persist(path).map_err(|e| write_failure(e.error))?;

    debug!(path = %path.display(), bytes = contents.len(), "wrote generated code");
    Ok(())
}
