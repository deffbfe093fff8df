//! Integration tests for `gwt remove`
//!
//! The picker needs a terminal, so these only cover the paths that fail
//! before or at selection.

use anyhow::Result;
use predicates::prelude::*;
use test_support::CliTestEnvironment;

#[test]
fn test_remove_outside_repository_fails() -> Result<()> {
    let env = CliTestEnvironment::new()?;

    env.run_command_in(env.root(), &["remove"])?
        .assert()
        .failure()
        .code(1)
        .stdout(predicate::str::is_empty());
    Ok(())
}

#[test]
fn test_remove_without_terminal_keeps_worktrees() -> Result<()> {
    let env = CliTestEnvironment::new()?;
    let feature = env.add_worktree("feature")?;
    std::fs::write(env.config_file.path(), "[picker]\nstyle = \"list\"\n")?;

    env.run_command(&["rm", "--force"])?
        .write_stdin("y\n")
        .assert()
        .failure()
        .code(1)
        .stdout(predicate::str::is_empty());

    assert!(feature.is_dir());
    Ok(())
}
