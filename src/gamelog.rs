use std::collections::VecDeque;

use bracket_terminal::prelude::RGB;
use log::info;

use crate::render::palette::{self, Color};

#[derive(Clone, Debug, PartialEq)]
pub struct LogLine {
    pub text: String,
    pub color: RGB,
}

/// Most recent narrative lines, sized to the message panel.
#[derive(Clone, Debug)]
pub struct MessageLog {
    lines: VecDeque<LogLine>,
    capacity: usize,
    width: usize,
}

impl MessageLog {
    pub fn new(capacity: usize, width: usize) -> Self {
        Self {
            lines: VecDeque::with_capacity(capacity),
            capacity: capacity.max(1),
            width: width.max(1),
        }
    }

    pub fn push<S: Into<String>>(&mut self, text: S, color: Color) {
        let text = text.into();
        info!(target: "tombcrawl::gamelog", "{text}");
        for line in wrap(&text, self.width) {
            if self.lines.len() == self.capacity {
                self.lines.pop_front();
            }
            self.lines.push_back(LogLine {
                text: line,
                color: RGB::named(color),
            });
        }
    }

    pub fn info<S: Into<String>>(&mut self, text: S) {
        self.push(text, palette::WHITE);
    }

    /// Oldest first.
    pub fn lines(&self) -> impl Iterator<Item = &LogLine> {
        self.lines.iter()
    }

    pub fn last_text(&self) -> Option<&str> {
        self.lines.back().map(|line| line.text.as_str())
    }

    pub fn contains(&self, needle: &str) -> bool {
        self.lines.iter().any(|line| line.text.contains(needle))
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

/// Greedy word wrap; words longer than `width` are split.
pub(crate) fn wrap(text: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        let mut word = word;
        while word.chars().count() > width {
            if !current.is_empty() {
                lines.push(std::mem::take(&mut current));
            }
            let split = word
                .char_indices()
                .nth(width)
                .map_or(word.len(), |(idx, _)| idx);
            lines.push(word[..split].to_string());
            word = &word[split..];
        }
        if word.is_empty() {
            continue;
        }

        let needed = if current.is_empty() {
            word.chars().count()
        } else {
            current.chars().count() + 1 + word.chars().count()
        };
        if needed > width {
            lines.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(word);
    }

    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn oldest_lines_are_evicted_first() {
        let mut log = MessageLog::new(3, 40);
        for n in 0..5 {
            log.info(format!("message {n}"));
        }
        let texts: Vec<&str> = log.lines().map(|l| l.text.as_str()).collect();
        assert_eq!(texts, ["message 2", "message 3", "message 4"]);
    }

    #[test]
    fn long_messages_wrap_into_several_entries() {
        let mut log = MessageLog::new(6, 12);
        log.push("the orc attacks the player for 3 hit points", palette::GREY);
        assert!(log.len() > 1);
        assert!(log.lines().all(|l| l.text.chars().count() <= 12));
        assert!(log.lines().all(|l| l.color == RGB::named(palette::GREY)));
    }

    #[test]
    fn wrapping_keeps_every_word() {
        let lines = wrap("Welcome stranger! Prepare to perish.", 10);
        assert_eq!(lines, ["Welcome", "stranger!", "Prepare to", "perish."]);
        assert_eq!(wrap("abcdefghij", 4), ["abcd", "efgh", "ij"]);
        assert!(wrap("   ", 4).is_empty());
    }
}
