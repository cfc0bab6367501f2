use std::{
    fs, io,
    path::{Path, PathBuf},
    process::{ExitStatus, Stdio},
};

use thiserror::Error;

use crate::codegen::Backend;

#[derive(Error, Debug)]
pub enum ToolchainError {
    #[error("failed to start `{program}`")]
    Spawn {
        program: String,
        #[source]
        source: io::Error,
    },

    #[error("`{program}` failed ({status})")]
    Failed { program: String, status: ExitStatus },
}

/// `<output>.<extension>`, a sibling of the binary.
pub fn source_path(output: &Path, extension: &str) -> PathBuf {
    let mut path = output.as_os_str().to_owned();
    path.push(".");
    path.push(extension);
    PathBuf::from(path)
}

pub fn write_source(path: &Path, source: &str) -> io::Result<()> {
    tracing::debug!(path = %path.display(), bytes = source.len(), "writing generated source");
    fs::write(path, source)
}

/// Run the backend's build command, with the child's output going straight to ours.
///
/// There is no timeout: a hung toolchain hangs the caller.
pub fn build(backend: &dyn Backend, source: &Path, output: &Path) -> Result<(), ToolchainError> {
    let mut command = backend.build_command(source, output);
    let program = command.get_program().to_string_lossy().into_owned();
    tracing::info!(?command, "invoking toolchain");

    let status = command
        .stdin(Stdio::null())
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .status()
        .map_err(|source| ToolchainError::Spawn {
            program: program.clone(),
            source,
        })?;

    if !status.success() {
        return Err(ToolchainError::Failed { program, status });
    }

    Ok(())
}
