use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use crate::error::GwtError;
use crate::traits::WorktreeSource;

/// Runs the `git` executable found on `PATH`.
///
/// Every invocation runs from the directory gwt was started in. Git's stderr goes
/// straight to the terminal; stdout is captured so the only thing gwt itself
/// prints there is the resulting path.
#[derive(Debug, Clone)]
pub struct GitCli {
    cwd: PathBuf,
}

impl GitCli {
    #[must_use]
    pub fn new(cwd: impl Into<PathBuf>) -> Self {
        Self { cwd: cwd.into() }
    }

    fn git(&self) -> Command {
        let mut cmd = Command::new("git");
        cmd.current_dir(&self.cwd)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::inherit());
        cmd
    }

    /// Runs `cmd` and returns its stdout, failing on a non-zero exit.
    fn execute(mut cmd: Command) -> Result<String> {
        let rendered = describe(&cmd);
        log::debug!("$ {rendered}");

        let output = cmd
            .output()
            .with_context(|| format!("Failed to execute `{rendered}`"))?;
        let stdout = String::from_utf8_lossy(&output.stdout).into_owned();

        if !output.status.success() {
            anyhow::bail!("`{rendered}` exited with {}", output.status);
        }
        log::trace!("`{rendered}` stdout: {stdout:?}");
        Ok(stdout)
    }
}

fn describe(cmd: &Command) -> String {
    let mut rendered = cmd.get_program().to_string_lossy().into_owned();
    for arg in cmd.get_args() {
        rendered.push(' ');
        rendered.push_str(&arg.to_string_lossy());
    }
    rendered
}

impl WorktreeSource for GitCli {
    fn list_worktrees(&self) -> Result<Vec<String>> {
        let mut cmd = self.git();
        cmd.args(["worktree", "list"]);
        let stdout = Self::execute(cmd).map_err(|e| GwtError::VcsUnavailable {
            detail: format!("{e:#}"),
        })?;
        Ok(stdout.lines().map(str::to_string).collect())
    }

    fn repository_root(&self) -> Result<PathBuf> {
        let mut cmd = self.git();
        cmd.args(["rev-parse", "--show-toplevel"]);
        let stdout = Self::execute(cmd).map_err(|e| GwtError::NotARepository {
            detail: format!("{e:#}"),
        })?;
        Ok(PathBuf::from(stdout.trim_end_matches(['\n', '\r'])))
    }

    fn add_worktree(&self, path: &Path, branch: &str) -> Result<()> {
        let mut cmd = self.git();
        cmd.args(["worktree", "add"]).arg(path).arg(branch);
        Self::execute(cmd)?;
        Ok(())
    }

    fn add_worktree_with_new_branch(&self, branch: &str, path: &Path) -> Result<()> {
        let mut cmd = self.git();
        cmd.args(["worktree", "add", "-b", branch]).arg(path);
        Self::execute(cmd)?;
        Ok(())
    }

    fn remove_worktree(&self, path: &Path, force: bool) -> Result<()> {
        let mut cmd = self.git();
        cmd.args(["worktree", "remove"]);
        if force {
            cmd.arg("--force");
        }
        cmd.arg(path);
        Self::execute(cmd)?;
        Ok(())
    }

    fn status_short(&self, path: &Path) -> Result<String> {
        let mut cmd = self.git();
        // Anything git complains about would be drawn over the picker
        cmd.arg("-C")
            .arg(path)
            .args(["status", "--short"])
            .stderr(Stdio::null());
        Self::execute(cmd)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_describe_renders_program_and_args() {
        let mut cmd = Command::new("git");
        cmd.args(["worktree", "remove", "--force"])
            .arg(Path::new("/tmp/repo_feature"));
        assert_eq!(describe(&cmd), "git worktree remove --force /tmp/repo_feature");
    }

    #[test]
    fn test_listing_outside_repository_is_vcs_unavailable() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let git = GitCli::new(dir.path());

        let err = temp_env::with_var("GIT_CEILING_DIRECTORIES", dir.path().parent(), || {
            git.list_worktrees()
        });
        let Err(err) = err else {
            anyhow::bail!("listing succeeded outside a repository");
        };
        assert!(matches!(
            err.downcast_ref::<GwtError>(),
            Some(GwtError::VcsUnavailable { .. })
        ));
        Ok(())
    }

    #[test]
    fn test_root_outside_repository_is_not_a_repository() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let git = GitCli::new(dir.path());

        let err = temp_env::with_var("GIT_CEILING_DIRECTORIES", dir.path().parent(), || {
            git.repository_root()
        });
        let Err(err) = err else {
            anyhow::bail!("rev-parse succeeded outside a repository");
        };
        assert!(matches!(
            err.downcast_ref::<GwtError>(),
            Some(GwtError::NotARepository { .. })
        ));
        Ok(())
    }
}
