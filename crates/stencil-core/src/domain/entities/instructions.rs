//! The next-steps block printed after a successful bootstrap.

use std::fmt;

use serde::Serialize;

use super::options::BootstrapOptions;

const BANNER: &str = "!!! SETUP !!!";

const CONTINUATION: &str = " && \\";

const REMINDERS: &[&str] = &[
    "Please review the license file (and pyproject.toml classifier) and make any appropriate changes.",
    "Remember to add a `PYPI_TOKEN` secret to the repo!",
    "Happy Developing!",
];

/// Manual command sequence for finishing project setup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SetupInstructions {
    pub commands: Vec<String>,
    pub reminders: Vec<String>,
}

impl SetupInstructions {
    /// Build the command chain.
    ///
    /// `entries` are the project's top-level names to stage; an empty list
    /// falls back to `git add .`. When `venv_ready` is set the environment
    /// creation step is left out.
    pub fn new(options: &BootstrapOptions, entries: &[String], venv_ready: bool) -> Self {
        let mut commands = vec![format!("cd \"{}\"", options.project_name())];

        if !venv_ready {
            commands.push("python -m venv venv".into());
        }
        commands.extend([
            "source venv/bin/activate".to_string(),
            "python -m pip install -r requirements/dev_requirements.txt".into(),
            "git init".into(),
            "python -m pre_commit autoupdate".into(),
            git_add(entries),
            "git commit -m \"initial template render\"".into(),
            "python -m invoke install".into(),
            "python -m pre_commit install --install-hooks".into(),
            format!(
                "git remote add origin git@github.com:{}/{}.git",
                options.github_username(),
                options.github_repo_name()
            ),
            "git push -u origin main".into(),
        ]);

        Self {
            commands,
            reminders: REMINDERS.iter().map(|r| (*r).to_string()).collect(),
        }
    }

    /// The command chain alone, one command per line joined by `&& \`.
    pub fn script(&self) -> String {
        let last = self.commands.len().saturating_sub(1);
        self.commands
            .iter()
            .enumerate()
            .map(|(i, cmd)| {
                if i == last {
                    cmd.clone()
                } else {
                    format!("{cmd}{CONTINUATION}")
                }
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

fn git_add(entries: &[String]) -> String {
    if entries.is_empty() {
        "git add .".into()
    } else {
        format!("git add {}", entries.join(" "))
    }
}

impl fmt::Display for SetupInstructions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Template successfully created.")?;
        writeln!(f)?;
        writeln!(f, "{BANNER}")?;
        writeln!(f)?;
        writeln!(f, "{}", self.script())?;
        writeln!(f)?;
        for reminder in &self.reminders {
            writeln!(f, "{reminder}")?;
            writeln!(f)?;
        }
        Ok(())
    }
}
