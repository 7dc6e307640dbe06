//! `davdrive lock` - manage the passcode app lock

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Args, Subcommand};

use davdrive_core::config::Config;
use davdrive_lock::{
    PassCodeHandler, PasscodeAction, PasscodeOutcome, Status, SystemClock,
};
use davdrive_prefs::JsonFilePreferences;

#[derive(Debug, Subcommand)]
pub enum LockCommand {
    /// Set a new passcode
    Set(PasscodeArg),
    /// Verify the stored passcode
    Check(PasscodeArg),
    /// Remove the stored passcode
    Remove(PasscodeArg),
    /// Show lock status
    Status,
}

#[derive(Debug, Args)]
pub struct PasscodeArg {
    /// The passcode digits
    pub passcode: String,
}

impl LockCommand {
    pub fn execute(self, config: &Config) -> Result<()> {
        let prefs = Arc::new(JsonFilePreferences::open(prefs_path())?);
        let clock = Arc::new(SystemClock);
        let digits = config.security.passcode_digits;

        match self {
            LockCommand::Set(arg) => {
                let mut handler =
                    PassCodeHandler::new(prefs, clock, PasscodeAction::Create, digits);
                let first = feed(&mut handler, &arg.passcode)?;
                anyhow::ensure!(
                    matches!(
                        first,
                        Some(Status {
                            outcome: PasscodeOutcome::NoConfirm,
                            ..
                        })
                    ),
                    "passcode entry was not accepted"
                );
                // Non-interactive confirmation: the same digits again.
                let second = feed(&mut handler, &arg.passcode)?;
                anyhow::ensure!(
                    matches!(
                        second,
                        Some(Status {
                            outcome: PasscodeOutcome::Confirm,
                            ..
                        })
                    ),
                    "passcode confirmation failed"
                );
                println!("Passcode set");
                Ok(())
            }
            LockCommand::Check(arg) => {
                let mut handler =
                    PassCodeHandler::new(prefs, clock, PasscodeAction::Check, digits);
                match feed(&mut handler, &arg.passcode)? {
                    Some(Status {
                        outcome: PasscodeOutcome::Ok,
                        ..
                    }) => {
                        handler.register_unlock();
                        println!("Passcode correct");
                        Ok(())
                    }
                    Some(_) => anyhow::bail!(
                        "wrong passcode ({} failed attempts)",
                        handler.attempts()
                    ),
                    None => anyhow::bail!(
                        "locked out, try again in {} ms",
                        handler.time_to_unlock_left()
                    ),
                }
            }
            LockCommand::Remove(arg) => {
                let mut handler =
                    PassCodeHandler::new(prefs, clock, PasscodeAction::Remove, digits);
                match feed(&mut handler, &arg.passcode)? {
                    Some(Status {
                        outcome: PasscodeOutcome::Ok,
                        ..
                    }) => {
                        println!("Passcode removed");
                        Ok(())
                    }
                    Some(_) => anyhow::bail!("wrong passcode, nothing removed"),
                    None => anyhow::bail!(
                        "locked out, try again in {} ms",
                        handler.time_to_unlock_left()
                    ),
                }
            }
            LockCommand::Status => {
                let handler = PassCodeHandler::new(prefs, clock, PasscodeAction::Check, digits);
                println!(
                    "passcode set:       {}",
                    if handler.is_passcode_set() { "yes" } else { "no" }
                );
                println!("failed attempts:    {}", handler.attempts());
                println!("lockout remaining:  {} ms", handler.time_to_unlock_left());
                if handler.is_migration_required() {
                    println!("note: passcode was migrated from the legacy format");
                }
                Ok(())
            }
        }
    }
}

/// Feeds a passcode string into the handler digit by digit
fn feed(handler: &mut PassCodeHandler, passcode: &str) -> Result<Option<Status>> {
    anyhow::ensure!(
        passcode.len() == handler.number_of_digits(),
        "passcode must be exactly {} digits",
        handler.number_of_digits()
    );

    let mut last = None;
    for ch in passcode.chars() {
        let digit = ch
            .to_digit(10)
            .with_context(|| format!("'{ch}' is not a digit"))? as u8;
        last = handler.on_digit(digit);
    }
    Ok(last)
}

/// Path of the preferences file backing the lock state
fn prefs_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("~/.config"))
        .join("davdrive")
        .join("prefs.json")
}
