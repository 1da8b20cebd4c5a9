//! Command-line front end of the Conciliador navigation core.
//!
//! Everything here writes to a caller-supplied sink; `main` hands it stdout.

pub mod args;

use crate::args::Command;
use anyhow::{Context, Result};
use concil::Backoffice;
use concil::access::{AccessDecision, DeviceClass, RecordingNavigator};
use concil::domain::config::AppConfig;
use concil::session::{LoginResponse, SessionState};
use std::fs;
use std::io::{self, Read, Write};
use std::path::Path;
use std::sync::Arc;

/// Runs one command against the persisted session described by `config`.
///
/// Returns whether the command succeeded; only `check` can fail without an error.
///
/// # Errors
/// Fails when the session storage or the menu catalog cannot be opened, a login
/// response cannot be read, or output cannot be written.
pub fn execute(config: AppConfig, command: &Command, out: &mut impl Write) -> Result<bool> {
    let navigator = Arc::new(RecordingNavigator::new());
    let backoffice = Backoffice::open(config, navigator.clone()).context("Opening back office")?;

    let succeeded = match command {
        Command::Login { response } => login(&backoffice, response, out)?,
        Command::Logout => {
            backoffice.session().clear();
            writeln!(out, "Signed out")?;
            true
        },
        Command::Whoami => whoami(&backoffice, out)?,
        Command::Menu { user_agent, mobile } => {
            let device = if *mobile {
                DeviceClass::Mobile
            } else {
                backoffice.device(user_agent.as_deref())
            };
            serde_json::to_writer_pretty(&mut *out, &backoffice.menu(device))?;
            writeln!(out)?;
            true
        },
        Command::Check { tag, page } => check(&backoffice, *tag, *page, out)?,
    };

    for route in navigator.visits() {
        writeln!(out, "redirect {route}")?;
    }

    Ok(succeeded)
}

fn login(backoffice: &Backoffice, source: &Path, out: &mut impl Write) -> Result<bool> {
    let raw = if source == Path::new("-") {
        let mut buf = Vec::new();
        io::stdin().read_to_end(&mut buf).context("Reading login response from stdin")?;
        buf
    } else {
        fs::read(source).with_context(|| format!("Reading login response {}", source.display()))?
    };

    let response: LoginResponse = serde_json::from_slice(&raw).context("Malformed login response")?;
    let user = backoffice.session().sign_in(response);

    writeln!(out, "Signed in as {} <{}> ({} permissions)", user.name, user.email, user.permissions.len())?;
    Ok(true)
}

fn whoami(backoffice: &Backoffice, out: &mut impl Write) -> Result<bool> {
    let state = backoffice.session().state();
    writeln!(out, "state: {}", state.label())?;

    if let SessionState::Authenticated(user) = state {
        let tags = user.tags().map(|tag| tag.to_string()).collect::<Vec<_>>().join(", ");
        writeln!(out, "name: {}", user.name)?;
        writeln!(out, "email: {}", user.email)?;
        writeln!(out, "support: {}", user.is_support)?;
        writeln!(out, "tags: {tags}")?;
    }
    Ok(true)
}

fn check(backoffice: &Backoffice, tag: i32, page: bool, out: &mut impl Write) -> Result<bool> {
    let decision = backoffice.decide(tag);
    let allowed = backoffice.check(tag, page);

    let verdict = match decision {
        AccessDecision::Allowed => "allowed",
        AccessDecision::Denied => "denied",
        AccessDecision::Pending if allowed => "pending (allowed)",
        AccessDecision::Pending => "pending (denied)",
    };
    writeln!(out, "{tag}: {verdict}")?;
    Ok(allowed)
}
