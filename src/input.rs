use std::{
    fs::File,
    io::{BufRead, BufReader},
    path::Path,
};

use bracket_terminal::prelude::VirtualKeyCode;
use log::warn;

use crate::TombResult;

/// A key script: one keypress per character, `#` lines are comments.
#[derive(Clone, Debug, Default)]
pub struct ScriptedInput {
    keys: Vec<VirtualKeyCode>,
    cursor: usize,
}

impl ScriptedInput {
    pub fn from_file<P: AsRef<Path>>(path: P) -> TombResult<Self> {
        let reader = BufReader::new(File::open(path)?);
        let mut script = Self::default();
        for line in reader.lines() {
            script.push_line(&line?);
        }
        Ok(script)
    }

    pub fn from_script(text: &str) -> Self {
        let mut script = Self::default();
        for line in text.lines() {
            script.push_line(line);
        }
        script
    }

    fn push_line(&mut self, line: &str) {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            return;
        }
        for c in trimmed.chars() {
            match char_to_key(c) {
                Some(key) => self.keys.push(key),
                None => warn!("unknown key in script: {c:?}"),
            }
        }
    }

    pub fn next_key(&mut self) -> Option<VirtualKeyCode> {
        let key = self.keys.get(self.cursor).copied()?;
        self.cursor += 1;
        Some(key)
    }

    pub fn remaining(&self) -> usize {
        self.keys.len() - self.cursor
    }
}

impl Iterator for ScriptedInput {
    type Item = VirtualKeyCode;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_key()
    }
}

/// Letters map to their own key so scripts can drive menus too.
fn char_to_key(c: char) -> Option<VirtualKeyCode> {
    let key = match c.to_ascii_lowercase() {
        'a' => VirtualKeyCode::A,
        'b' => VirtualKeyCode::B,
        'c' => VirtualKeyCode::C,
        'd' => VirtualKeyCode::D,
        'e' => VirtualKeyCode::E,
        'f' => VirtualKeyCode::F,
        'g' => VirtualKeyCode::G,
        'h' => VirtualKeyCode::H,
        'i' => VirtualKeyCode::I,
        'j' => VirtualKeyCode::J,
        'k' => VirtualKeyCode::K,
        'l' => VirtualKeyCode::L,
        'm' => VirtualKeyCode::M,
        'n' => VirtualKeyCode::N,
        'o' => VirtualKeyCode::O,
        'p' => VirtualKeyCode::P,
        'q' => VirtualKeyCode::Q,
        'r' => VirtualKeyCode::R,
        's' => VirtualKeyCode::S,
        't' => VirtualKeyCode::T,
        'u' => VirtualKeyCode::U,
        'v' => VirtualKeyCode::V,
        'w' => VirtualKeyCode::W,
        'x' => VirtualKeyCode::X,
        'y' => VirtualKeyCode::Y,
        'z' => VirtualKeyCode::Z,
        '.' => VirtualKeyCode::Period,
        '\x1B' | '~' => VirtualKeyCode::Escape,
        _ => return None,
    };
    Some(key)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn comments_and_blank_lines_are_skipped() {
        let script = ScriptedInput::from_script("# walk east\n\nll\n  gI \n");
        let keys: Vec<_> = script.collect();
        assert_eq!(
            keys,
            [
                VirtualKeyCode::L,
                VirtualKeyCode::L,
                VirtualKeyCode::G,
                VirtualKeyCode::I
            ]
        );
    }

    #[test]
    fn unknown_characters_are_dropped() {
        let mut script = ScriptedInput::from_script("h?~");
        assert_eq!(script.remaining(), 2);
        assert_eq!(script.next_key(), Some(VirtualKeyCode::H));
        assert_eq!(script.next_key(), Some(VirtualKeyCode::Escape));
        assert_eq!(script.next_key(), None);
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err = ScriptedInput::from_file("/nonexistent/keys.txt").unwrap_err();
        assert!(matches!(err, crate::TombError::Io(_)));
    }
}
