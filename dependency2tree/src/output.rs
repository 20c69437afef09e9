//! Writing and compiling rendered trees.

use std::ffi::OsStr;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use deptree_render::Block;
use tracing::{debug, info};

use crate::error::CliError;

/// Insert a 1-based, zero-padded sentence number before the extension.
///
/// `trees/out.svg` becomes `trees/out-001.svg` for the first sentence.
pub fn numbered_path(path: &Path, number: usize) -> PathBuf {
    let stem = path
        .file_stem()
        .map(OsStr::to_string_lossy)
        .unwrap_or_default();

    let file_name = match path.extension() {
        Some(ext) => format!("{}-{:03}.{}", stem, number, ext.to_string_lossy()),
        None => format!("{}-{:03}", stem, number),
    };

    path.with_file_name(file_name)
}

pub fn write_file(path: &Path, contents: &[u8]) -> Result<(), CliError> {
    fs::write(path, contents).map_err(|source| CliError::Write {
        path: path.to_owned(),
        source,
    })?;
    info!(path = %path.display(), bytes = contents.len(), "wrote output");
    Ok(())
}

/// Write DOT graphs to files numbered by sentence.
///
/// When `compile` holds a command, each graph is piped through
/// `<command> -T<format>` and the command output is written instead.
pub fn write_graphs(
    output: &Path,
    graphs: &[Block],
    compile: Option<(&str, &str)>,
) -> Result<(), CliError> {
    for graph in graphs {
        let path = numbered_path(output, graph.sentence());
        match compile {
            Some((command, format)) => {
                let image = run_dot(command, format, graph.text())?;
                write_file(&path, &image)?;
            }
            None => write_file(&path, graph.text().as_bytes())?,
        }
    }

    Ok(())
}

/// Write a LaTeX document, optionally running `command` on it.
pub fn write_document(output: &Path, document: &str, compile: Option<&str>) -> Result<(), CliError> {
    write_file(output, document.as_bytes())?;

    let command = match compile {
        Some(command) => command,
        None => return Ok(()),
    };

    let mut cmd = Command::new(command);
    match output.parent().filter(|dir| !dir.as_os_str().is_empty()) {
        Some(dir) => {
            cmd.current_dir(dir);
            cmd.arg(output.file_name().unwrap_or_else(|| output.as_os_str()));
        }
        None => {
            cmd.arg(output);
        }
    }

    debug!(?cmd, "compiling document");
    let status = cmd.status().map_err(|source| CliError::Spawn {
        command: command.to_owned(),
        source,
    })?;

    if !status.success() {
        return Err(CliError::CommandFailed {
            command: command.to_owned(),
            status,
        });
    }

    Ok(())
}

fn run_dot(command: &str, format: &str, graph: &str) -> Result<Vec<u8>, CliError> {
    let spawn_err = |source: io::Error| CliError::Spawn {
        command: command.to_owned(),
        source,
    };

    let mut child = Command::new(command)
        .arg(format!("-T{}", format))
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .spawn()
        .map_err(spawn_err)?;

    if let Some(mut stdin) = child.stdin.take() {
        stdin.write_all(graph.as_bytes()).map_err(spawn_err)?;
    }

    let output = child.wait_with_output().map_err(spawn_err)?;
    if !output.status.success() {
        return Err(CliError::CommandFailed {
            command: command.to_owned(),
            status: output.status,
        });
    }

    Ok(output.stdout)
}

#[cfg(test)]
mod tests {
    use std::path::{Path, PathBuf};

    use super::numbered_path;

    #[test]
    fn numbered_paths() {
        assert_eq!(
            numbered_path(Path::new("out.dot"), 1),
            PathBuf::from("out-001.dot")
        );
        assert_eq!(
            numbered_path(Path::new("trees/out.svg"), 12),
            PathBuf::from("trees/out-012.svg")
        );
        assert_eq!(
            numbered_path(Path::new("trees/out"), 1000),
            PathBuf::from("trees/out-1000")
        );
        assert_eq!(
            numbered_path(Path::new("a.b.dot"), 2),
            PathBuf::from("a.b-002.dot")
        );
    }
}
