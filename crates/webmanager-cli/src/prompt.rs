//! Masked password prompt.

use std::borrow::Cow;

use rustyline::completion::Completer;
use rustyline::highlight::Highlighter;
use rustyline::hint::Hinter;
use rustyline::history::DefaultHistory;
use rustyline::validate::Validator;
use rustyline::{Config, Editor, Helper};

/// Helper that renders every typed character as `*`.
pub struct MaskingHelper;

impl Completer for MaskingHelper {
    type Candidate = String;
}

impl Hinter for MaskingHelper {
    type Hint = String;
}

impl Highlighter for MaskingHelper {
    fn highlight<'l>(&self, line: &'l str, _pos: usize) -> Cow<'l, str> {
        Cow::Owned("*".repeat(line.chars().count()))
    }

    fn highlight_char(&self, _line: &str, _pos: usize, _forced: bool) -> bool {
        true
    }
}

impl Validator for MaskingHelper {}
impl Helper for MaskingHelper {}

/// Read a password without echoing it.
pub fn read_password(prompt: &str) -> rustyline::Result<String> {
    let config = Config::builder().auto_add_history(false).build();
    let mut editor: Editor<MaskingHelper, DefaultHistory> = Editor::with_config(config)?;
    editor.set_helper(Some(MaskingHelper));
    editor.readline(prompt)
}
