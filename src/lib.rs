//! # gwt
//!
//! A navigator for git worktrees. `gwt` lists the worktrees of the current
//! repository, lets you pick one (fuzzy finder or plain list), and prints its
//! path so a small shell function can `cd` there.
//!
//! ## Quick Start
//!
//! ```bash
//! # Install the shell function once
//! eval "$(command gwt init bash)"
//!
//! # Pick a worktree interactively
//! gwt
//!
//! # Jump straight to the worktree that has `feature/auth` checked out
//! gwt feature/auth
//!
//! # Create ../<repo>_feature_x for branch feature/x and move into it
//! gwt add feature/x
//!
//! # Back to the main/master worktree
//! gwt main
//!
//! # Pick worktrees to delete
//! gwt remove
//! ```
//!
//! ## Module Structure
//!
//! - [`worktree`] - Parsing and ranking of `git worktree list` output
//! - [`commands`] - Command handlers (jump, add, remove, main, init)
//! - [`selection`] - Interactive pickers behind the [`selection::Picker`] trait
//! - [`git`] - Git subprocess wrapper implementing [`traits::WorktreeSource`]
//! - [`config`] - Optional `config.toml` with defaults
//! - [`error`] - Error kinds the binary reacts to
//! - [`prompt`] - y/N confirmation

pub mod commands;
pub mod config;
pub mod error;
pub mod git;
pub mod prompt;
pub mod selection;
pub mod traits;
pub mod worktree;

pub use anyhow::Result;
