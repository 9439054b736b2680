use std::{
    io::Write as _,
    path::PathBuf,
    process::{Command, Stdio},
    thread,
};

use anyhow::Context as _;

use crate::foundation::error::{SillageError, SillageResult};

/// Text shown in place of a consultation when generation fails.
pub const CONSULTATION_APOLOGY: &str =
    "We're sorry, our fragrance consultant is unavailable right now. Please try again in a moment.";

/// A hosted text generator: one prompt in, one response out.
pub trait TextGenerator {
    /// Generate a response to `prompt`.
    fn generate(&self, prompt: &str) -> anyhow::Result<String>;
}

impl<F> TextGenerator for F
where
    F: Fn(&str) -> anyhow::Result<String>,
{
    fn generate(&self, prompt: &str) -> anyhow::Result<String> {
        self(prompt)
    }
}

fn generate_text(generator: &dyn TextGenerator, prompt: &str) -> anyhow::Result<String> {
    let text = generator.generate(prompt)?;
    if text.trim().is_empty() {
        anyhow::bail!("generator returned an empty response");
    }
    Ok(text)
}

/// Generated consultation text, or [`CONSULTATION_APOLOGY`] on any failure.
pub fn consult(generator: &dyn TextGenerator, prompt: &str) -> String {
    match generate_text(generator, prompt) {
        Ok(text) => text,
        Err(err) => {
            tracing::warn!(error = %format!("{err:#}"), "consultation failed; serving apology");
            CONSULTATION_APOLOGY.to_string()
        }
    }
}

/// Generated description, or `None` on any failure.
pub fn describe(generator: &dyn TextGenerator, prompt: &str) -> Option<String> {
    match generate_text(generator, prompt) {
        Ok(text) => Some(text),
        Err(err) => {
            tracing::warn!(error = %format!("{err:#}"), "description failed; leaving it empty");
            None
        }
    }
}

/// Generator backed by an external program: the prompt goes to its stdin, the response is read
/// from its stdout.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CommandGenerator {
    program: PathBuf,
    args: Vec<String>,
}

impl CommandGenerator {
    /// Generator running `program` with `args`.
    pub fn new(program: impl Into<PathBuf>, args: Vec<String>) -> SillageResult<Self> {
        let program = program.into();
        if program.as_os_str().is_empty() {
            return Err(SillageError::backend("generator program must not be empty"));
        }
        Ok(Self { program, args })
    }
}

impl TextGenerator for CommandGenerator {
    #[tracing::instrument(skip(self, prompt), fields(program = %self.program.display()))]
    fn generate(&self, prompt: &str) -> anyhow::Result<String> {
        let mut child = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .with_context(|| format!("failed to spawn '{}'", self.program.display()))?;

        // Stdout is drained by `wait_with_output` while the prompt is written, so a generator
        // that echoes as it reads cannot fill its pipe and stall the writer.
        let mut stdin = child
            .stdin
            .take()
            .context("failed to open generator stdin")?;
        let payload = prompt.as_bytes().to_vec();
        let writer = thread::spawn(move || stdin.write_all(&payload));

        let output = child
            .wait_with_output()
            .context("failed to wait for generator to finish")?;
        let written = writer
            .join()
            .map_err(|_| anyhow::anyhow!("prompt writer thread panicked"))?;
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            anyhow::bail!(
                "generator exited with status {}: {}",
                output.status,
                stderr.trim()
            );
        }
        written.context("failed to write prompt to generator")?;
        let text = String::from_utf8(output.stdout).context("generator output is not UTF-8")?;
        Ok(text.trim_end().to_string())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/backend/text.rs"]
mod tests;
