use std::path::Path;
use std::process::{Command, Stdio};

use image::{ImageFormat, RgbaImage};
use tracing::{debug, warn};

use crate::error::{PipelineError, Result};

use super::BackgroundEraser;

/// Runs an external background-removal program on a temporary PNG.
///
/// The argument list is a template: `{input}` and `{output}` are replaced by
/// the temporary input and output paths.
#[derive(Clone, Debug)]
pub struct CommandEraser {
    template: Vec<String>,
}

impl CommandEraser {
    pub fn new(template: Vec<String>) -> Self {
        Self { template }
    }

    fn build_command(&self, input: &Path, output: &Path) -> Result<Command> {
        let (program, args) = self.template.split_first().ok_or_else(|| {
            PipelineError::InvalidConfig("eraser command template is empty".into())
        })?;
        let mut cmd = Command::new(program);
        for arg in args {
            let arg = arg
                .replace("{input}", &input.to_string_lossy())
                .replace("{output}", &output.to_string_lossy());
            cmd.arg(arg);
        }
        cmd.stdout(Stdio::null()).stderr(Stdio::piped());
        Ok(cmd)
    }
}

impl BackgroundEraser for CommandEraser {
    fn name(&self) -> &str {
        self.template.first().map(String::as_str).unwrap_or("command")
    }

    fn erase(&self, image: &RgbaImage) -> Result<Option<RgbaImage>> {
        let dir = tempfile::tempdir()?;
        let input = dir.path().join("input.png");
        let output = dir.path().join("output.png");
        image.save_with_format(&input, ImageFormat::Png)?;

        let mut cmd = self.build_command(&input, &output)?;
        debug!(command = ?cmd, "Running eraser command");
        let result = cmd
            .output()
            .map_err(|e| PipelineError::EraserCommand(format!("{}: {e}", self.name())))?;

        if !result.status.success() {
            let stderr = String::from_utf8_lossy(&result.stderr);
            return Err(PipelineError::EraserCommand(format!(
                "{} exited with {}: {}",
                self.name(),
                result.status,
                stderr.trim()
            )));
        }

        if !output.is_file() {
            warn!(command = self.name(), "Eraser command produced no output file");
            return Ok(None);
        }

        Ok(Some(image::open(&output)?.to_rgba8()))
    }
}
