//! CLI argument parsing for marklock.
//!
//! Uses clap derive macros for declarative argument definitions.
//! This module defines the command structure; actual implementations
//! are in the `commands` module.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Marklock: advisory locks backed by marker files.
///
/// A lock named ID is held while `<lock_dir>/~ID.lock` exists. Every process
/// sharing the lock directory sees the same lock state.
#[derive(Parser, Debug)]
#[command(name = "marklock")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Config file (default: .marklock.yaml in the current directory, if present).
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Lock directory, overriding `lock_dir` from the config.
    #[arg(long, global = true)]
    pub dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

/// Available commands for marklock.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Show whether a lock is held.
    Status(LockArgs),

    /// Take a lock.
    ///
    /// Fails with exit code 2 if the lock is already held. Never waits.
    Lock(LockArgs),

    /// Release a lock.
    ///
    /// Releasing a lock that is not held is not an error.
    Unlock(LockArgs),

    /// List all held locks with their age.
    List(ListArgs),

    /// Remove an orphaned lock left behind by a crashed holder.
    ///
    /// Requires --force flag to prevent accidental clearing.
    Clear(ClearArgs),

    /// Print the effective configuration as YAML.
    Config,
}

/// A single lock name.
#[derive(Parser, Debug)]
pub struct LockArgs {
    /// Lock name; the marker file is `~<ID>.lock`.
    pub lock_id: String,
}

/// Arguments for the `list` command.
#[derive(Parser, Debug)]
pub struct ListArgs {
    /// Emit JSON instead of text.
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `clear` command.
#[derive(Parser, Debug)]
pub struct ClearArgs {
    /// Lock name to clear.
    pub lock_id: String,

    /// Force clearing the lock (required for safety).
    #[arg(long)]
    pub force: bool,
}
