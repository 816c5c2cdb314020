//! Render-time options consumed by the bootstrap hook.

use serde::Serialize;

use crate::domain::{DomainError, ModuleName, ProjectName};

/// Options resolved when the template was rendered.
///
/// Immutable once built; every stage only reads them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BootstrapOptions {
    project_name: ProjectName,
    module_name: Option<ModuleName>,
    create_docs: bool,
    create_venv: bool,
    venv_args: Vec<String>,
    github_username: String,
    github_repo_name: String,
}

impl BootstrapOptions {
    pub fn builder() -> BootstrapOptionsBuilder {
        BootstrapOptionsBuilder::default()
    }

    pub fn project_name(&self) -> &ProjectName {
        &self.project_name
    }

    pub fn module_name(&self) -> Option<&ModuleName> {
        self.module_name.as_ref()
    }

    pub fn create_docs(&self) -> bool {
        self.create_docs
    }

    pub fn create_venv(&self) -> bool {
        self.create_venv
    }

    /// Extra arguments for the environment creator, passed through untouched.
    pub fn venv_args(&self) -> &[String] {
        &self.venv_args
    }

    pub fn github_username(&self) -> &str {
        &self.github_username
    }

    pub fn github_repo_name(&self) -> &str {
        &self.github_repo_name
    }
}

/// Builder for [`BootstrapOptions`].
///
/// Names are validated as they are set; `build` only checks presence.
#[derive(Debug, Default)]
pub struct BootstrapOptionsBuilder {
    project_name: Option<ProjectName>,
    module_name: Option<ModuleName>,
    create_docs: Option<bool>,
    create_venv: bool,
    venv_args: Vec<String>,
    github_username: Option<String>,
    github_repo_name: Option<String>,
}

impl BootstrapOptionsBuilder {
    pub fn project_name(mut self, name: impl Into<String>) -> Result<Self, DomainError> {
        self.project_name = Some(ProjectName::parse(name)?);
        Ok(self)
    }

    pub fn module_name(mut self, name: impl Into<String>) -> Result<Self, DomainError> {
        self.module_name = Some(ModuleName::parse(name)?);
        Ok(self)
    }

    pub fn create_docs(mut self, yes: bool) -> Self {
        self.create_docs = Some(yes);
        self
    }

    pub fn create_venv(mut self, yes: bool) -> Self {
        self.create_venv = yes;
        self
    }

    pub fn venv_args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.venv_args = args.into_iter().map(Into::into).collect();
        self
    }

    pub fn github_username(mut self, user: impl Into<String>) -> Self {
        self.github_username = Some(user.into());
        self
    }

    pub fn github_repo_name(mut self, repo: impl Into<String>) -> Self {
        self.github_repo_name = Some(repo.into());
        self
    }

    /// Defaults: docs kept, no environment, repo named after the project,
    /// placeholder GitHub user.
    pub fn build(self) -> Result<BootstrapOptions, DomainError> {
        let project_name = self
            .project_name
            .ok_or(DomainError::MissingRequiredField {
                field: "project_name",
            })?;

        let github_repo_name = self
            .github_repo_name
            .filter(|r| !r.is_empty())
            .unwrap_or_else(|| project_name.as_str().to_string());

        Ok(BootstrapOptions {
            module_name: self.module_name,
            create_docs: self.create_docs.unwrap_or(true),
            create_venv: self.create_venv,
            venv_args: self.venv_args,
            github_username: self
                .github_username
                .filter(|u| !u.is_empty())
                .unwrap_or_else(|| "<github-username>".into()),
            github_repo_name,
            project_name,
        })
    }
}
