//! Input provider abstraction and a line-based terminal implementation.
//!
//! Validators return `Err(message)` to have the provider show the message
//! and ask again. A closed input stream surfaces as
//! [`std::io::ErrorKind::UnexpectedEof`].

use std::io::{self, BufRead, Write};

use colored::Colorize;

/// Validation callback for free-text answers.
pub type TextValidator<'a> = &'a dyn Fn(&str) -> Result<(), String>;

/// Validation callback for checklist answers (selected indices).
pub type SelectionValidator<'a> = &'a dyn Fn(&[usize]) -> Result<(), String>;

/// The four prompt kinds the session needs.
pub trait Prompter {
    /// Free-text input, repeated until `validate` accepts it.
    fn input(&mut self, message: &str, validate: TextValidator<'_>) -> io::Result<String>;

    /// Pick exactly one entry; returns its index.
    fn select(&mut self, message: &str, choices: &[String]) -> io::Result<usize>;

    /// Pick any number of entries, repeated until `validate` accepts the
    /// selection. Returns indices in the order given, without duplicates.
    fn multi_select(
        &mut self,
        message: &str,
        choices: &[String],
        validate: SelectionValidator<'_>,
    ) -> io::Result<Vec<usize>>;

    /// Yes/no question; an empty answer takes `default`.
    fn confirm(&mut self, message: &str, default: bool) -> io::Result<bool>;
}

/// Prompts over a reader/writer pair, one answer per line.
pub struct TerminalPrompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> TerminalPrompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    fn ask(&mut self, message: &str, hint: &str) -> io::Result<String> {
        if hint.is_empty() {
            write!(self.output, "{} {} ", "?".green(), message.bold())?;
        } else {
            write!(self.output, "{} {} {} ", "?".green(), message.bold(), hint.dimmed())?;
        }
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(io::Error::new(io::ErrorKind::UnexpectedEof, "input closed"));
        }
        Ok(line.trim_end_matches(['\r', '\n']).to_string())
    }

    fn reject(&mut self, message: &str) -> io::Result<()> {
        writeln!(self.output, "{} {}", ">>".red(), message)
    }

    fn list_choices(&mut self, choices: &[String]) -> io::Result<()> {
        for (i, choice) in choices.iter().enumerate() {
            writeln!(self.output, "  {}) {}", i + 1, choice)?;
        }
        Ok(())
    }
}

/// Parse a 1-based choice number.
fn parse_choice(token: &str, count: usize) -> Option<usize> {
    match token.trim().parse::<usize>() {
        Ok(n) if (1..=count).contains(&n) => Some(n - 1),
        _ => None,
    }
}

/// Parse a comma/space separated list of 1-based choice numbers.
fn parse_choices(answer: &str, count: usize) -> Result<Vec<usize>, String> {
    let mut picked = Vec::new();
    for token in answer.split([',', ' ']).filter(|t| !t.trim().is_empty()) {
        let idx = parse_choice(token, count)
            .ok_or_else(|| format!("Not a valid choice: {} (1-{})", token.trim(), count))?;
        if !picked.contains(&idx) {
            picked.push(idx);
        }
    }
    Ok(picked)
}

impl<R: BufRead, W: Write> Prompter for TerminalPrompter<R, W> {
    fn input(&mut self, message: &str, validate: TextValidator<'_>) -> io::Result<String> {
        loop {
            let answer = self.ask(message, "")?;
            match validate(&answer) {
                Ok(()) => return Ok(answer),
                Err(msg) => self.reject(&msg)?,
            }
        }
    }

    fn select(&mut self, message: &str, choices: &[String]) -> io::Result<usize> {
        writeln!(self.output, "{} {}", "?".green(), message.bold())?;
        self.list_choices(choices)?;
        loop {
            let answer = self.ask("Answer:", "")?;
            match parse_choice(&answer, choices.len()) {
                Some(idx) => return Ok(idx),
                None => {
                    let msg = format!("Please enter a number between 1 and {}.", choices.len());
                    self.reject(&msg)?
                }
            }
        }
    }

    fn multi_select(
        &mut self,
        message: &str,
        choices: &[String],
        validate: SelectionValidator<'_>,
    ) -> io::Result<Vec<usize>> {
        writeln!(self.output, "{} {}", "?".green(), message.bold())?;
        self.list_choices(choices)?;
        loop {
            let answer = self.ask("Answer:", "(numbers separated by commas)")?;
            let verdict = parse_choices(&answer, choices.len())
                .and_then(|picked| validate(&picked).map(|()| picked));
            match verdict {
                Ok(picked) => return Ok(picked),
                Err(msg) => self.reject(&msg)?,
            }
        }
    }

    fn confirm(&mut self, message: &str, default: bool) -> io::Result<bool> {
        let hint = if default { "(Y/n)" } else { "(y/N)" };
        loop {
            let answer = self.ask(message, hint)?;
            match answer.trim().to_lowercase().as_str() {
                "" => return Ok(default),
                "y" | "yes" => return Ok(true),
                "n" | "no" => return Ok(false),
                _ => self.reject("Please answer y or n.")?,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn prompter(script: &str) -> TerminalPrompter<Cursor<Vec<u8>>, Vec<u8>> {
        colored::control::set_override(false);
        TerminalPrompter::new(Cursor::new(script.as_bytes().to_vec()), Vec::new())
    }

    fn choices(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_input_reprompts_until_valid() {
        let mut p = prompter("\nAlice\n");
        let not_empty = |s: &str| if s.is_empty() { Err("Please enter your name.".to_string()) } else { Ok(()) };
        assert_eq!(p.input("Enter your name:", &not_empty).unwrap(), "Alice");

        let shown = String::from_utf8(p.output).unwrap();
        assert!(shown.contains(">> Please enter your name."));
    }

    #[test]
    fn test_input_eof() {
        let mut p = prompter("");
        let err = p.input("Enter your name:", &|_| Ok(())).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::UnexpectedEof);
    }

    #[test]
    fn test_select_out_of_range() {
        let mut p = prompter("0\nfive\n2\n");
        let idx = p.select("Pick:", &choices(&["a", "b"])).unwrap();
        assert_eq!(idx, 1);
    }

    #[test]
    fn test_multi_select_dedupes_and_validates() {
        let mut p = prompter("\n3\n2, 1,2\n");
        let at_least_one =
            |s: &[usize]| if s.is_empty() { Err("Select at least one.".to_string()) } else { Ok(()) };
        let picked = p.multi_select("Pick:", &choices(&["a", "b"]), &at_least_one).unwrap();
        assert_eq!(picked, vec![1, 0]);

        let shown = String::from_utf8(p.output).unwrap();
        assert!(shown.contains("Select at least one."));
        assert!(shown.contains("Not a valid choice: 3 (1-2)"));
    }

    #[test]
    fn test_confirm_default_and_explicit() {
        let mut p = prompter("\nmaybe\nN\n");
        assert!(p.confirm("Sure?", true).unwrap());
        assert!(!p.confirm("Sure?", true).unwrap());
    }
}
