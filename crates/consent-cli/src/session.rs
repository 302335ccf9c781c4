//! Menu-driven session: identify the user, then loop over
//! view/grant/revoke until Exit saves the registry.

use std::io::Write;

use consent_core::{ConsentOption, Error, LocationCode, Result, User};
use consent_protocol::{grant, options_for_opt, relocate, revoke, RevokeOutcome};
use consent_store::Registry;
use tracing::{debug, info};

use crate::prompt::Prompter;
use crate::render::write_status;

const LOCATION_HINT: &str = "Please enter a valid two-letter state code (e.g., FL, GA, CA, CO, UT).";

/// Entries of the main menu, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuAction {
    View,
    Grant,
    Revoke,
    Exit,
}

impl MenuAction {
    pub const ALL: [MenuAction; 4] = [Self::View, Self::Grant, Self::Revoke, Self::Exit];

    pub fn label(self) -> &'static str {
        match self {
            Self::View => "View Consent Status",
            Self::Grant => "Give Consent",
            Self::Revoke => "Revoke Consent",
            Self::Exit => "Exit",
        }
    }
}

/// Where the loop is. Every action state returns to `Menu`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Identify,
    Menu,
    Viewing,
    Granting,
    Revoking,
    Exited,
}

/// One interactive session over a borrowed registry.
pub struct Session<'a, P, W> {
    registry: &'a mut Registry,
    prompter: P,
    out: W,
    user_id: Option<String>,
}

impl<'a, P: Prompter, W: Write> Session<'a, P, W> {
    pub fn new(registry: &'a mut Registry, prompter: P, out: W) -> Self {
        Self {
            registry,
            prompter,
            out,
            user_id: None,
        }
    }

    /// Run until the user chooses Exit. Returns the identity of the session
    /// user. Any error, including closed input, leaves the file untouched.
    pub fn run(&mut self) -> Result<String> {
        let mut state = SessionState::Identify;
        loop {
            debug!("Session state: {:?}", state);
            state = match state {
                SessionState::Identify => {
                    self.identify()?;
                    SessionState::Menu
                }
                SessionState::Menu => self.menu()?,
                SessionState::Viewing => {
                    let id = self.current_id()?.to_string();
                    let user = self
                        .registry
                        .get(&id)
                        .ok_or_else(|| Error::Internal(format!("unknown user {}", id)))?;
                    write_status(&mut self.out, user)?;
                    SessionState::Menu
                }
                SessionState::Granting => self.give_consent()?,
                SessionState::Revoking => self.revoke_consent()?,
                SessionState::Exited => break,
            };
        }
        self.user_id
            .clone()
            .ok_or_else(|| Error::Internal("session ended before identification".into()))
    }

    fn identify(&mut self) -> Result<()> {
        let name = self.prompter.input("Enter your name:", &|s: &str| {
            if s.is_empty() {
                Err(Error::EmptyName.to_string())
            } else {
                Ok(())
            }
        })?;
        let raw = self
            .prompter
            .input("Enter your location (e.g., FL, GA, CA, CO, UT):", &|s: &str| {
                LocationCode::parse(s).map(|_| ()).map_err(|_| LOCATION_HINT.to_string())
            })?;
        let location = LocationCode::parse(&raw)?;

        let user = self.registry.resolve_user(&name)?;
        // Only options offered at the new location stay recorded
        relocate(user, location);
        let id = user.id.clone();
        info!("Session started for user {}", id);

        writeln!(self.out, "Welcome, {}!", name)?;
        self.user_id = Some(id);
        Ok(())
    }

    fn menu(&mut self) -> Result<SessionState> {
        let user = self.user()?;
        let location = user.location.as_ref().map(|l| l.as_str()).unwrap_or("unknown");
        let message = format!("Manage consent preferences for {} in {}:", user.name, location);
        let labels: Vec<String> = MenuAction::ALL.iter().map(|a| a.label().to_string()).collect();

        let idx = self.prompter.select(&message, &labels)?;
        let action = MenuAction::ALL
            .get(idx)
            .copied()
            .ok_or_else(|| Error::Internal(format!("menu choice out of range: {}", idx)))?;

        Ok(match action {
            MenuAction::View => SessionState::Viewing,
            MenuAction::Grant => SessionState::Granting,
            MenuAction::Revoke => SessionState::Revoking,
            MenuAction::Exit => {
                self.registry.save()?;
                SessionState::Exited
            }
        })
    }

    fn give_consent(&mut self) -> Result<SessionState> {
        let selected = self.choose_options(
            "Select options to give consent:",
            "Please select at least one option to give consent.",
        )?;
        match grant(self.user_mut()?, &selected) {
            Ok(()) => writeln!(self.out, "Consent given for selected options.")?,
            Err(e) if e.is_validation() => {
                writeln!(self.out, ">> {}", e)?;
                return Ok(SessionState::Granting);
            }
            Err(e) => return Err(e),
        }
        Ok(SessionState::Menu)
    }

    fn revoke_consent(&mut self) -> Result<SessionState> {
        let selected = self.choose_options(
            "Select options to revoke consent:",
            "Please select at least one option to revoke consent.",
        )?;
        let confirmed = self.prompter.confirm(
            "Are you sure you want to revoke consent for the selected options?",
            true,
        )?;
        match revoke(self.user_mut()?, &selected, confirmed) {
            Ok(RevokeOutcome::Revoked(_)) => {
                writeln!(self.out, "Consent revoked for selected options.")?
            }
            Ok(RevokeOutcome::Canceled) => writeln!(self.out, "Consent revocation canceled.")?,
            Err(e) if e.is_validation() => {
                writeln!(self.out, ">> {}", e)?;
                return Ok(SessionState::Revoking);
            }
            Err(e) => return Err(e),
        }
        Ok(SessionState::Menu)
    }

    /// Checklist over the options applicable to the user's location.
    fn choose_options(&mut self, message: &str, empty_hint: &str) -> Result<Vec<ConsentOption>> {
        let options = options_for_opt(self.user()?.location.as_ref());
        let labels: Vec<String> = options
            .iter()
            .map(|o| format!("{} ({})", o.description, o.key))
            .collect();

        let picked = self.prompter.multi_select(message, &labels, &|sel: &[usize]| {
            if sel.is_empty() {
                Err(empty_hint.to_string())
            } else {
                Ok(())
            }
        })?;
        Ok(picked.into_iter().filter_map(|i| options.get(i).copied()).collect())
    }

    fn user(&self) -> Result<&User> {
        let id = self.current_id()?;
        self.registry
            .get(id)
            .ok_or_else(|| Error::Internal(format!("unknown user {}", id)))
    }

    fn user_mut(&mut self) -> Result<&mut User> {
        let id = self
            .user_id
            .as_deref()
            .ok_or_else(|| Error::Internal("no user identified".into()))?;
        self.registry
            .get_mut(id)
            .ok_or_else(|| Error::Internal(format!("unknown user {}", id)))
    }

    fn current_id(&self) -> Result<&str> {
        self.user_id
            .as_deref()
            .ok_or_else(|| Error::Internal("no user identified".into()))
    }
}
