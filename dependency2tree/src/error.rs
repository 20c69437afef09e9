use std::io;
use std::path::PathBuf;
use std::process::ExitStatus;

use deptree_render::ConvertError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("cannot open {}: {}", .path.display(), .source)]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error(transparent)]
    Convert(#[from] ConvertError),

    #[error("cannot write {}: {}", .path.display(), .source)]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("cannot run {command}: {source}")]
    Spawn {
        command: String,
        #[source]
        source: io::Error,
    },

    #[error("{command} failed ({status})")]
    CommandFailed { command: String, status: ExitStatus },
}
