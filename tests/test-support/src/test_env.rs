use anyhow::{Context, Result};
use assert_fs::TempDir;
use assert_fs::prelude::*;

use std::path::{Path, PathBuf};
use std::process::Command;

/// A scratch git repository for driving the `gwt` binary end to end.
///
/// Worktrees created by the tests land next to `repo_dir` inside the same
/// temporary directory, so everything is removed on drop.
pub struct CliTestEnvironment {
    pub repo_dir: assert_fs::fixture::ChildPath,
    /// Symlink-free path of `repo_dir`, as git and gwt report it
    pub repo_path: PathBuf,
    /// Config file gwt is pointed at; absent unless a test writes it
    pub config_file: assert_fs::fixture::ChildPath,
    _temp_dir: TempDir, // Keep temp_dir private to ensure cleanup, but don't expose it
}

impl CliTestEnvironment {
    /// Creates a new test environment with a real git repository on `main`
    ///
    /// # Errors
    /// Returns an error if:
    /// - Failed to create temporary directory
    /// - Failed to initialize git repository
    /// - Failed to configure git settings
    /// - Failed to create initial commit
    pub fn new() -> Result<Self> {
        let temp_dir = TempDir::new().context("Failed to create temporary directory")?;
        let repo_dir = temp_dir.child("test_repo");
        let config_file = temp_dir.child("config.toml");
        repo_dir.create_dir_all()?;

        Self::run_git_command(repo_dir.path(), &["init"])?;
        Self::run_git_command(repo_dir.path(), &["config", "user.name", "Test User"])?;
        Self::run_git_command(repo_dir.path(), &["config", "user.email", "test@example.com"])?;

        repo_dir.child("README.md").write_str("# Test Repo")?;
        Self::run_git_command(repo_dir.path(), &["add", "."])?;
        Self::run_git_command(repo_dir.path(), &["commit", "-m", "Initial commit"])?;

        // Ensure we have a main branch (some git versions default to 'master')
        Self::run_git_command(repo_dir.path(), &["branch", "-M", "main"])?;

        let repo_path = repo_dir
            .path()
            .canonicalize()
            .context("Failed to resolve repository path")?;

        Ok(Self {
            repo_dir,
            repo_path,
            config_file,
            _temp_dir: temp_dir,
        })
    }

    fn run_git_command(dir: &Path, args: &[&str]) -> Result<String> {
        let output = Command::new("git")
            .args(args)
            .current_dir(dir)
            .output()
            .context("Failed to execute git command")?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            anyhow::bail!("Git command failed: {}", stderr);
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }

    /// Run git in the repository directory and return its stdout
    ///
    /// # Errors
    /// Returns an error if git cannot be run or exits unsuccessfully.
    pub fn git(&self, args: &[&str]) -> Result<String> {
        Self::run_git_command(&self.repo_path, args)
    }

    /// Where `gwt add <branch>` run from the repository puts its worktree
    #[must_use]
    pub fn sibling_path(&self, branch: &str) -> PathBuf {
        let sanitized = branch.replace('/', "_");
        self.repo_path
            .with_file_name(format!("test_repo_{sanitized}"))
    }

    /// Creates `branch` and a worktree for it at [`Self::sibling_path`]
    ///
    /// # Errors
    /// Returns an error if git fails to create the branch or worktree.
    pub fn add_worktree(&self, branch: &str) -> Result<PathBuf> {
        let path = self.sibling_path(branch);
        let path_arg = path.to_string_lossy();
        self.git(&["worktree", "add", "-b", branch, &path_arg])?;
        Ok(path)
    }

    /// Execute a CLI command from the repository directory
    ///
    /// # Errors
    /// Returns an error if the command setup fails
    pub fn run_command(&self, args: &[&str]) -> Result<assert_cmd::Command> {
        self.run_command_in(&self.repo_path, args)
    }

    /// Execute a CLI command from `dir` with an isolated config and no
    /// repository discovery above the temporary directory
    ///
    /// # Errors
    /// Returns an error if the command setup fails
    pub fn run_command_in(&self, dir: &Path, args: &[&str]) -> Result<assert_cmd::Command> {
        let mut cmd =
            assert_cmd::Command::cargo_bin("gwt").context("Failed to find gwt binary")?;

        let ceiling = self.repo_path.parent().unwrap_or(&self.repo_path);
        cmd.current_dir(dir)
            .env("GWT_CONFIG", self.config_file.path())
            .env("GIT_CEILING_DIRECTORIES", ceiling)
            .env_remove("GWT_LOG");

        cmd.args(args);
        Ok(cmd)
    }

    /// Path of the temporary directory holding the repository and its siblings
    #[must_use]
    pub fn root(&self) -> &Path {
        self.repo_path.parent().unwrap_or(&self.repo_path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use predicates::prelude::*;

    #[test]
    fn test_cli_test_environment_creation() -> Result<()> {
        let env = CliTestEnvironment::new()?;

        env.repo_dir.assert(predicate::path::is_dir());
        env.repo_dir.child(".git").assert(predicate::path::exists());
        env.repo_dir
            .child("README.md")
            .assert(predicate::str::contains("# Test Repo"));
        env.config_file.assert(predicate::path::missing());

        assert_eq!(env.git(&["branch", "--show-current"])?.trim(), "main");
        Ok(())
    }

    #[test]
    fn test_sibling_path_sanitization() -> Result<()> {
        let env = CliTestEnvironment::new()?;

        let path = env.sibling_path("feature/test-branch");
        assert_eq!(
            path.file_name().map(|n| n.to_string_lossy().into_owned()),
            Some("test_repo_feature_test-branch".to_string())
        );
        assert_eq!(path.parent(), Some(env.root()));
        Ok(())
    }
}
