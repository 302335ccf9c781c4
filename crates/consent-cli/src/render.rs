//! Status output for a user's consent map.

use std::io::Write;

use colored::Colorize;
use consent_core::{ConsentState, User};
use consent_protocol::{view, ConsentEntry};

/// `<key>: Granted` in green or `<key>: Revoked` in red.
pub fn status_line(entry: &ConsentEntry) -> String {
    let state = entry.state.to_string();
    let state = if entry.state == ConsentState::Granted {
        state.green()
    } else {
        state.red()
    };
    format!("{}: {}", entry.key, state)
}

/// Print the heading and one line per recorded option.
pub fn write_status(out: &mut impl Write, user: &User) -> std::io::Result<()> {
    writeln!(out, "Consent Status for {}:", user.name)?;
    for entry in view(user) {
        writeln!(out, "{}", status_line(&entry))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_status_lists_recorded_options() {
        colored::control::set_override(false);
        let mut user = User::new("id", "Alice").unwrap();
        user.consent_preferences.insert("personalizedRecommendations".into(), true);
        user.consent_preferences.insert("dataSharingWithThirdParties".into(), false);

        let mut out = Vec::new();
        write_status(&mut out, &user).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(
            text,
            "Consent Status for Alice:\n\
             dataSharingWithThirdParties: Revoked\n\
             personalizedRecommendations: Granted\n"
        );
    }
}
