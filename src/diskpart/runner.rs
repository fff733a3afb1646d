use super::error::DiskpartError;
use super::script::Script;
use crate::ui::prelude::*;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Raw text captured from one utility run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScriptOutput {
    pub stdout: String,
    pub stderr: String,
    pub exit_code: Option<i32>,
}

#[cfg(test)]
impl ScriptOutput {
    pub fn success(stdout: impl Into<String>) -> Self {
        Self {
            stdout: stdout.into(),
            stderr: String::new(),
            exit_code: Some(0),
        }
    }
}

/// Executes a command script and hands back what the utility printed.
///
/// Implementations do not interpret the exit code or stderr; callers decide
/// what counts as a failure.
pub trait ScriptRunner {
    fn run(&self, script: &Script) -> Result<ScriptOutput, DiskpartError>;
}

/// Runs `<utility> /s <script>` against a fresh temporary file per call.
#[derive(Debug, Clone)]
pub struct DiskpartRunner {
    utility: PathBuf,
    script_dir: Option<PathBuf>,
}

impl DiskpartRunner {
    pub fn new(utility: impl Into<PathBuf>) -> Self {
        Self {
            utility: utility.into(),
            script_dir: None,
        }
    }

    /// Places script files in `dir` instead of the system temp directory.
    pub fn with_script_dir(mut self, dir: Option<PathBuf>) -> Self {
        self.script_dir = dir;
        self
    }

    fn write_script(&self, script: &Script) -> Result<tempfile::TempPath, DiskpartError> {
        let mut builder = tempfile::Builder::new();
        builder.prefix("diskmenu-").suffix(".txt");
        let mut file = match &self.script_dir {
            Some(dir) => builder.tempfile_in(dir)?,
            None => builder.tempfile()?,
        };
        file.write_all(script.render().as_bytes())?;
        file.flush()?;
        // Close our handle so the utility can open the file on every platform.
        Ok(file.into_temp_path())
    }
}

impl ScriptRunner for DiskpartRunner {
    fn run(&self, script: &Script) -> Result<ScriptOutput, DiskpartError> {
        let script_path = self.write_script(script)?;

        emit(
            Level::Debug,
            "diskpart.run",
            &format!(
                "Running {} /s {} ({})",
                self.utility.display(),
                script_path.display(),
                script
            ),
            None,
        );

        let result = duct::cmd(
            self.utility.as_path(),
            [Path::new("/s").as_os_str(), script_path.as_os_str()],
        )
        .stdout_capture()
        .stderr_capture()
        .unchecked()
        .run();

        let removal = script_path.close();

        let output = result.map_err(|source| DiskpartError::Spawn {
            utility: self.utility.clone(),
            source,
        })?;

        if let Err(e) = removal {
            emit(
                Level::Warn,
                "diskpart.cleanup.failed",
                &format!("Failed to remove command script: {}", e),
                None,
            );
        }

        Ok(ScriptOutput {
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            exit_code: output.status.code(),
        })
    }
}
