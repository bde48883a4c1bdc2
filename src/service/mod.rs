//! Domain services sitting between the shell and the record stores. They
//! enforce the cross-record rules and turn store failures into outcomes the
//! operator can act on.

mod clients;
mod shoots;

pub use clients::ClientService;
pub use shoots::ShootService;

use crate::error::{Error, ErrorKind, Result};

/// Printed when a yes/no question gets anything other than yes or no.
pub const WRONG_ANSWER: &str = "Press wrong button: enter (y/n)";

/// The operator on the other side of the terminal, reduced to what the
/// services need: ask a question, get a line back, or tell them something.
pub trait Interaction {
    /// Show `prompt` and return the answer with surrounding whitespace
    /// trimmed. Closed input is an `InvalidInput` error.
    fn ask(&mut self, prompt: &str) -> Result<String>;

    fn notify(&mut self, message: &str) -> Result<()>;
}

/// Ask a yes/no question until the answer is recognisable.
pub fn confirm(io: &mut dyn Interaction, question: &str) -> Result<bool> {
    loop {
        let answer = io.ask(&format!("{question} (y/n)"))?;
        match answer.to_ascii_lowercase().as_str() {
            "y" | "yes" => return Ok(true),
            "n" | "no" => return Ok(false),
            _ => io.notify(WRONG_ANSWER)?,
        }
    }
}

/// Ask for a positive record id until one is given.
pub fn read_id(io: &mut dyn Interaction, label: &str) -> Result<i64> {
    loop {
        let answer = io.ask(label)?;
        match answer.parse::<i64>() {
            Ok(id) if id > 0 => return Ok(id),
            _ => io.notify("Error: enter a positive number")?,
        }
    }
}

/// Keep asking for an id until `lookup` finds a record. A miss tagged with
/// `not_found` prints `retry_message` and loops; anything else is returned.
pub(crate) fn resolve_with_retry<T, F>(
    io: &mut dyn Interaction,
    label: &str,
    not_found: ErrorKind,
    retry_message: &str,
    mut lookup: F,
) -> Result<T>
where
    F: FnMut(i64) -> Result<T>,
{
    loop {
        let id = read_id(io, label)?;
        match lookup(id) {
            Ok(record) => return Ok(record),
            Err(err) if err.has_kind(not_found) => io.notify(retry_message)?,
            Err(err) => return Err(err),
        }
    }
}

/// Shared confirm-then-delete step. Declining is reported as
/// `ValidationFailed` and `delete` is never called.
pub(crate) fn confirm_then<F>(io: &mut dyn Interaction, question: &str, delete: F) -> Result<()>
where
    F: FnOnce() -> Result<()>,
{
    if !confirm(io, question)? {
        return Err(Error::new(ErrorKind::ValidationFailed, "deletion cancelled"));
    }
    delete()
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;

    use super::*;

    struct Script {
        answers: VecDeque<&'static str>,
        notices: Vec<String>,
    }

    impl Script {
        fn new(answers: &[&'static str]) -> Self {
            Self {
                answers: answers.iter().copied().collect(),
                notices: Vec::new(),
            }
        }
    }

    impl Interaction for Script {
        fn ask(&mut self, _prompt: &str) -> Result<String> {
            self.answers
                .pop_front()
                .map(str::to_string)
                .ok_or_else(|| Error::new(ErrorKind::InvalidInput, "input closed"))
        }

        fn notify(&mut self, message: &str) -> Result<()> {
            self.notices.push(message.to_string());
            Ok(())
        }
    }

    #[test]
    fn confirm_accepts_both_cases_and_long_forms() {
        for (answer, expected) in [("y", true), ("Y", true), ("yes", true), ("N", false), ("no", false)] {
            let mut io = Script::new(&[answer]);
            assert_eq!(confirm(&mut io, "Sure?").unwrap(), expected);
        }
    }

    #[test]
    fn confirm_reprompts_on_unrecognised_answers() {
        let mut io = Script::new(&["maybe", "", "n"]);
        assert!(!confirm(&mut io, "Sure?").unwrap());
        assert_eq!(io.notices, vec![WRONG_ANSWER.to_string(), WRONG_ANSWER.to_string()]);
    }

    #[test]
    fn confirm_fails_when_input_runs_out() {
        let mut io = Script::new(&["maybe"]);
        let err = confirm(&mut io, "Sure?").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidInput);
    }

    #[test]
    fn read_id_rejects_non_positive_values() {
        let mut io = Script::new(&["abc", "0", "-4", "12"]);
        assert_eq!(read_id(&mut io, "ID").unwrap(), 12);
        assert_eq!(io.notices.len(), 3);
    }

    #[test]
    fn resolve_retries_only_on_the_not_found_kind() {
        let mut io = Script::new(&["1", "2", "3"]);
        let found = resolve_with_retry(&mut io, "ID", ErrorKind::ClientNotFound, "again", |id| {
            if id < 3 {
                Err(Error::new(ErrorKind::ClientNotFound, "client not found"))
            } else {
                Ok(id * 10)
            }
        })
        .unwrap();
        assert_eq!(found, 30);
        assert_eq!(io.notices, vec!["again".to_string(), "again".to_string()]);

        let mut io = Script::new(&["1"]);
        let err = resolve_with_retry::<i64, _>(&mut io, "ID", ErrorKind::ClientNotFound, "again", |_| {
            Err(Error::new(ErrorKind::DatabaseSelect, "boom"))
        })
        .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::DatabaseSelect);
    }

    #[test]
    fn declined_confirmation_skips_the_delete() {
        let mut io = Script::new(&["n"]);
        let mut called = false;
        let err = confirm_then(&mut io, "Delete?", || {
            called = true;
            Ok(())
        })
        .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ValidationFailed);
        assert_eq!(err.message(), "deletion cancelled");
        assert!(!called);
    }
}
