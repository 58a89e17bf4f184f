//! Command implementations for marklock.
//!
//! This module resolves the configuration, initializes the process-wide
//! lock coordinator, and routes each CLI command to its handler.

use crate::cli::{ClearArgs, Cli, Command, ListArgs, LockArgs};
use marklock::config::Config;
use marklock::error::{MarklockError, Result};
use marklock::locks::{self, LockCoordinator, LockHandle, LockHandler, LockId};
use std::path::{Path, PathBuf};

/// Configuration and handler resolved for one invocation.
struct Session {
    config: Config,
    handler: LockHandler,
}

/// Dispatch a command to its implementation.
pub fn dispatch(cli: Cli) -> Result<()> {
    let session = open_session(cli.config.as_deref(), cli.dir)?;

    match cli.command {
        Command::Status(args) => cmd_status(args),
        Command::Lock(args) => cmd_lock(args),
        Command::Unlock(args) => cmd_unlock(args),
        Command::List(args) => cmd_list(&session, args),
        Command::Clear(args) => cmd_clear(&session, args),
        Command::Config => cmd_config(&session),
    }
}

/// Load config, build the handler, and bind the global coordinator to it.
fn open_session(config_path: Option<&Path>, dir: Option<PathBuf>) -> Result<Session> {
    let cwd = std::env::current_dir().map_err(|e| {
        MarklockError::UserError(format!("failed to get current working directory: {}", e))
    })?;

    let (config, base) = match config_path {
        Some(path) => {
            let config = Config::load(path)?;
            // Relative lock_dir resolves next to the config file
            let base = path
                .parent()
                .map(|p| cwd.join(p))
                .unwrap_or_else(|| cwd.clone());
            (config, base)
        }
        None => (Config::discover(&cwd)?, cwd.clone()),
    };

    let handler = match dir {
        Some(dir) => LockHandler::new(cwd.join(dir)).create_lock_dir(config.create_lock_dir),
        None => LockHandler::from_config(&config, &base),
    };

    LockCoordinator::global().init(handler.clone());

    Ok(Session { config, handler })
}

fn cmd_status(args: LockArgs) -> Result<()> {
    let handle = LockHandle::new(args.lock_id)?;

    if handle.is_locked()? {
        println!("{}: locked", handle.lock_id());
    } else {
        println!("{}: unlocked", handle.lock_id());
    }

    Ok(())
}

fn cmd_lock(args: LockArgs) -> Result<()> {
    let handle = LockHandle::new(args.lock_id)?;
    handle.lock()?;
    println!("Locked: {}", handle.lock_id());
    Ok(())
}

fn cmd_unlock(args: LockArgs) -> Result<()> {
    let handle = LockHandle::new(args.lock_id)?;

    if handle.unlock()? {
        println!("Unlocked: {}", handle.lock_id());
    } else {
        println!("Not locked: {}", handle.lock_id());
    }

    Ok(())
}

fn cmd_list(session: &Session, args: ListArgs) -> Result<()> {
    let locks = locks::list_locks(&session.handler, session.config.lock_stale_minutes)?;

    if args.json {
        let json = serde_json::to_string_pretty(&locks).map_err(|e| {
            MarklockError::UserError(format!("failed to serialize lock list: {}", e))
        })?;
        println!("{}", json);
        return Ok(());
    }

    if locks.is_empty() {
        println!("No active locks.");
        return Ok(());
    }

    println!("Active locks ({}):", locks.len());
    println!();

    for lock in &locks {
        println!("  {}:", lock.id);
        println!(
            "    Created:    {}",
            lock.created_at.format("%Y-%m-%d %H:%M:%S UTC")
        );
        println!("    Age:        {}", lock.age_string());
        if lock.is_stale {
            println!(
                "    Status:     STALE (exceeds {} min threshold)",
                session.config.lock_stale_minutes
            );
        }
        println!("    Path:       {}", lock.path.display());
        println!();
    }

    let stale_count = locks.iter().filter(|l| l.is_stale).count();
    if stale_count > 0 {
        println!(
            "Note: {} lock(s) are stale. Use `marklock clear <lock-id> --force` to clear.",
            stale_count
        );
    }

    Ok(())
}

fn cmd_clear(session: &Session, args: ClearArgs) -> Result<()> {
    if !args.force {
        return Err(MarklockError::UserError(format!(
            "refusing to clear lock without --force flag.\n\n\
             Clearing a lock that is still held breaks mutual exclusion.\n\
             Only clear locks if you are certain the lock holder has crashed.\n\n\
             To clear the lock, run:\n  marklock clear {} --force",
            args.lock_id
        )));
    }

    let id = LockId::new(args.lock_id)?;
    let cleared = locks::clear_lock(&session.handler, &id, session.config.lock_stale_minutes)?;

    println!("Cleared lock: {}", cleared.id);
    println!();
    println!("Lock details:");
    println!(
        "  Created:    {}",
        cleared.created_at.format("%Y-%m-%d %H:%M:%S UTC")
    );
    println!("  Age:        {}", cleared.age_string());
    if cleared.is_stale {
        println!("  Status:     was STALE");
    }
    println!("  Path:       {}", cleared.path.display());

    Ok(())
}

fn cmd_config(session: &Session) -> Result<()> {
    print!("{}", session.config.to_yaml()?);
    println!(
        "# resolved lock directory: {}",
        session.handler.lock_dir().display()
    );
    Ok(())
}
