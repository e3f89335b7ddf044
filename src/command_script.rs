use anyhow::{Context, Result};
use serde::Deserialize;
use std::{collections::VecDeque, fs, path::Path};

#[derive(Debug, Deserialize)]
struct CommandScriptFile {
    steps: Vec<CommandScriptStepDef>,
}

#[derive(Debug, Clone, Deserialize)]
struct CommandScriptStepDef {
    command: String,
}

/// Deterministic command script runner.
///
/// Scripts are a simple list of `{command}` steps, executed in file order.
#[derive(Debug)]
pub struct CommandScriptPlayer {
    pending: VecDeque<String>,
}

impl CommandScriptPlayer {
    /// Load a command script from a JSON file on disk.
    pub fn from_path(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read command script {}", path.display()))?;
        Self::from_str(&contents)
            .with_context(|| format!("Invalid command script {}", path.display()))
    }

    /// Load a command script from an in-memory JSON string.
    pub fn from_str(contents: &str) -> Result<Self> {
        let file: CommandScriptFile = serde_json::from_str(contents)?;
        if file.steps.is_empty() {
            anyhow::bail!("command script contains no steps");
        }

        let mut pending = VecDeque::with_capacity(file.steps.len());
        for (index, step) in file.steps.into_iter().enumerate() {
            let command = step.command.trim().to_string();
            if command.is_empty() {
                anyhow::bail!("command script step {index} is an empty command");
            }
            pending.push_back(command);
        }

        Ok(Self { pending })
    }

    /// Pop the next command, if any remain.
    pub fn next_command(&mut self) -> Option<String> {
        self.pending.pop_front()
    }

    pub fn remaining(&self) -> usize {
        self.pending.len()
    }
}

impl Iterator for CommandScriptPlayer {
    type Item = String;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_command()
    }
}
