// SPDX-FileCopyrightText: 2026 Mentora Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Subprocess runner for the five supported languages.

use std::path::Path;
use std::process::Output;
use std::time::Duration;

use mentora_config::SandboxConfig;
use mentora_core::MentoraError;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use tempfile::TempDir;
use tokio::process::Command;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, Serialize, Deserialize)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Language {
    Python,
    Java,
    C,
    Cpp,
    Javascript,
}

impl Language {
    /// File name the source is staged under. Java requires the file name to
    /// match the public class, so submitted Java code must declare `Main`.
    fn source_file(self) -> &'static str {
        match self {
            Language::Python => "main.py",
            Language::Java => "Main.java",
            Language::C => "main.c",
            Language::Cpp => "main.cpp",
            Language::Javascript => "main.js",
        }
    }

    fn needs_compile(self) -> bool {
        matches!(self, Language::Java | Language::C | Language::Cpp)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ExecutionResult {
    pub success: bool,
    pub stdout: String,
    pub stderr: String,
    pub exit_code: Option<i32>,
}

impl ExecutionResult {
    fn from_output(output: &Output) -> Self {
        Self {
            success: output.status.success(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            exit_code: output.status.code(),
        }
    }
}

pub struct Sandbox {
    timeout: Duration,
}

impl Sandbox {
    pub fn new(config: &SandboxConfig) -> Self {
        Self {
            timeout: Duration::from_secs(config.execution_timeout_secs),
        }
    }

    /// Stage, optionally compile, and run the submitted code.
    ///
    /// Compile failures and non-zero exits come back as an unsuccessful
    /// `ExecutionResult`; `Err` is reserved for infrastructure problems
    /// (temp dir creation, missing toolchain binaries).
    pub async fn run(&self, language: Language, code: &str) -> Result<ExecutionResult, MentoraError> {
        let dir = TempDir::new()
            .map_err(|e| MentoraError::Execution(format!("temp dir creation failed: {e}")))?;
        let source = dir.path().join(language.source_file());
        tokio::fs::write(&source, code)
            .await
            .map_err(|e| MentoraError::Execution(format!("source staging failed: {e}")))?;

        if language.needs_compile() {
            let output = self.compile(language, dir.path()).await?;
            if !output.status.success() {
                debug!(%language, "compilation failed");
                return Ok(ExecutionResult::from_output(&output));
            }
        }

        let mut command = self.run_command(language, dir.path());
        command.current_dir(dir.path()).kill_on_drop(true);

        let execution = tokio::time::timeout(self.timeout, command.output()).await;
        match execution {
            Ok(Ok(output)) => Ok(ExecutionResult::from_output(&output)),
            Ok(Err(e)) => Err(MentoraError::Execution(format!(
                "failed to run {language} code: {e}"
            ))),
            // kill_on_drop reaps the child when the future is dropped here.
            Err(_) => Ok(ExecutionResult {
                success: false,
                stdout: String::new(),
                stderr: format!("Execution timed out after {} seconds", self.timeout.as_secs()),
                exit_code: None,
            }),
        }
    }

    async fn compile(&self, language: Language, dir: &Path) -> Result<Output, MentoraError> {
        let mut command = match language {
            Language::Java => {
                let mut c = Command::new("javac");
                c.arg("Main.java");
                c
            }
            Language::C => {
                let mut c = Command::new("gcc");
                c.args(["main.c", "-o", "main"]);
                c
            }
            Language::Cpp => {
                let mut c = Command::new("g++");
                c.args(["main.cpp", "-o", "main"]);
                c
            }
            Language::Python | Language::Javascript => {
                return Err(MentoraError::Execution(format!(
                    "{language} does not have a compile step"
                )));
            }
        };
        command.current_dir(dir).kill_on_drop(true);
        tokio::time::timeout(self.timeout, command.output())
            .await
            .map_err(|_| MentoraError::Timeout {
                duration: self.timeout,
            })?
            .map_err(|e| MentoraError::Execution(format!("failed to compile {language}: {e}")))
    }

    fn run_command(&self, language: Language, dir: &Path) -> Command {
        match language {
            Language::Python => {
                let mut c = Command::new("python3");
                c.arg(dir.join("main.py"));
                c
            }
            Language::Javascript => {
                let mut c = Command::new("node");
                c.arg(dir.join("main.js"));
                c
            }
            Language::Java => {
                let mut c = Command::new("java");
                c.arg("Main");
                c
            }
            Language::C | Language::Cpp => Command::new(dir.join("main")),
        }
    }
}
