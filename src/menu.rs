use bracket_terminal::prelude::VirtualKeyCode;

use crate::{TombError, TombResult};

/// One option per letter `a..=z`.
pub const MAX_OPTIONS: usize = 26;

const LETTER_KEYS: [VirtualKeyCode; MAX_OPTIONS] = [
    VirtualKeyCode::A,
    VirtualKeyCode::B,
    VirtualKeyCode::C,
    VirtualKeyCode::D,
    VirtualKeyCode::E,
    VirtualKeyCode::F,
    VirtualKeyCode::G,
    VirtualKeyCode::H,
    VirtualKeyCode::I,
    VirtualKeyCode::J,
    VirtualKeyCode::K,
    VirtualKeyCode::L,
    VirtualKeyCode::M,
    VirtualKeyCode::N,
    VirtualKeyCode::O,
    VirtualKeyCode::P,
    VirtualKeyCode::Q,
    VirtualKeyCode::R,
    VirtualKeyCode::S,
    VirtualKeyCode::T,
    VirtualKeyCode::U,
    VirtualKeyCode::V,
    VirtualKeyCode::W,
    VirtualKeyCode::X,
    VirtualKeyCode::Y,
    VirtualKeyCode::Z,
];

/// A lettered list of choices. Building one with more options than letters
/// is a programming error and fails fast.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Menu {
    pub header: String,
    options: Vec<String>,
    /// A placeholder line is shown but cannot be picked.
    selectable: bool,
}

impl Menu {
    pub fn new<S: Into<String>>(header: S, options: Vec<String>) -> TombResult<Self> {
        if options.len() > MAX_OPTIONS {
            return Err(TombError::MenuOverflow {
                options: options.len(),
            });
        }
        Ok(Self {
            header: header.into(),
            options,
            selectable: true,
        })
    }

    /// Shows `line` but never yields a selection.
    pub fn placeholder<S: Into<String>, L: Into<String>>(header: S, line: L) -> Self {
        Self {
            header: header.into(),
            options: vec![line.into()],
            selectable: false,
        }
    }

    /// `(a) option` style rows, or the bare placeholder line.
    pub fn rows(&self) -> Vec<String> {
        if !self.selectable {
            return self.options.clone();
        }
        self.options
            .iter()
            .zip('a'..='z')
            .map(|(option, letter)| format!("({letter}) {option}"))
            .collect()
    }

    pub fn option_for_key(&self, key: VirtualKeyCode) -> Option<usize> {
        if !self.selectable {
            return None;
        }
        letter_index(key).filter(|index| *index < self.options.len())
    }
}

pub fn letter_index(key: VirtualKeyCode) -> Option<usize> {
    LETTER_KEYS.iter().position(|letter| *letter == key)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn options(n: usize) -> Vec<String> {
        (0..n).map(|i| format!("option {i}")).collect()
    }

    #[test]
    fn twenty_six_options_fit() {
        let menu = Menu::new("Pick", options(26)).expect("fits");
        assert_eq!(menu.option_for_key(VirtualKeyCode::Z), Some(25));
        assert_eq!(menu.rows()[25], "(z) option 25");
    }

    #[test]
    fn twenty_seven_options_overflow() {
        let err = Menu::new("Pick", options(27)).unwrap_err();
        assert!(matches!(err, TombError::MenuOverflow { options: 27 }));
    }

    #[test]
    fn keys_outside_the_range_select_nothing() {
        let menu = Menu::new("Pick", options(3)).expect("fits");
        assert_eq!(menu.option_for_key(VirtualKeyCode::A), Some(0));
        assert_eq!(menu.option_for_key(VirtualKeyCode::C), Some(2));
        assert_eq!(menu.option_for_key(VirtualKeyCode::D), None);
        assert_eq!(menu.option_for_key(VirtualKeyCode::Escape), None);
    }

    #[test]
    fn placeholder_cannot_be_selected() {
        let menu = Menu::placeholder("Inventory", "Inventory is empty.");
        assert_eq!(menu.rows(), ["Inventory is empty."]);
        assert_eq!(menu.option_for_key(VirtualKeyCode::A), None);
    }
}
