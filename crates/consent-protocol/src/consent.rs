//! Consent state transitions — view, grant and revoke on a single user.
//!
//! None of these persist; callers save the registry explicitly.

use consent_core::{ConsentOption, ConsentState, Error, LocationCode, Result, User};
use tracing::debug;

use crate::catalog::{find_option, options_for_opt};

/// One materialized entry of a user's consent map.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConsentEntry {
    pub key: String,
    pub state: ConsentState,
}

/// Result of a revoke request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RevokeOutcome {
    /// Options were set to revoked.
    Revoked(usize),
    /// The user declined the confirmation; nothing changed.
    Canceled,
}

/// Every option present in the user's consent map, in key order. Options
/// never touched are not listed.
pub fn view(user: &User) -> Vec<ConsentEntry> {
    user.consent_preferences
        .iter()
        .map(|(key, granted)| ConsentEntry {
            key: key.clone(),
            state: ConsentState::from(Some(*granted)),
        })
        .collect()
}

/// Set each option to granted.
pub fn grant(user: &mut User, options: &[ConsentOption]) -> Result<()> {
    validate_selection(user, options)?;
    for option in options {
        user.consent_preferences.insert(option.key.to_string(), true);
    }
    debug!("Granted {} option(s) for user {}", options.len(), user.id);
    Ok(())
}

/// Set each option to revoked when `confirmed`; otherwise leave the user
/// untouched and report [`RevokeOutcome::Canceled`]. Validation runs first
/// either way.
pub fn revoke(user: &mut User, options: &[ConsentOption], confirmed: bool) -> Result<RevokeOutcome> {
    validate_selection(user, options)?;
    if !confirmed {
        debug!("Revocation canceled for user {}", user.id);
        return Ok(RevokeOutcome::Canceled);
    }
    for option in options {
        user.consent_preferences.insert(option.key.to_string(), false);
    }
    debug!("Revoked {} option(s) for user {}", options.len(), user.id);
    Ok(RevokeOutcome::Revoked(options.len()))
}

/// Move the user to `location`, dropping recorded options the new
/// location does not offer. Returns the dropped keys.
pub fn relocate(user: &mut User, location: LocationCode) -> Vec<String> {
    let applicable = options_for_opt(Some(&location));
    let dropped: Vec<String> = user
        .consent_preferences
        .keys()
        .filter(|key| find_option(applicable, key).is_none())
        .cloned()
        .collect();
    for key in &dropped {
        user.consent_preferences.remove(key);
    }
    if !dropped.is_empty() {
        debug!("Dropped {:?} for user {} moving to {}", dropped, user.id, location);
    }
    user.location = Some(location);
    dropped
}

fn validate_selection(user: &User, options: &[ConsentOption]) -> Result<()> {
    if options.is_empty() {
        return Err(Error::EmptySelection);
    }
    let applicable = options_for_opt(user.location.as_ref());
    if let Some(stray) = options.iter().find(|o| find_option(applicable, o.key).is_none()) {
        return Err(Error::UnknownOption(stray.key.to_string()));
    }
    Ok(())
}
