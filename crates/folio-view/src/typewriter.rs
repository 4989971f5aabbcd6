//! Endless type/hold/delete cycle over a list of phrases.

use crate::config::TypewriterConfig;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypewriterFrame {
    pub text: String,
    /// Delay before the next `tick`.
    pub delay_ms: u32,
}

#[derive(Debug, Clone)]
pub struct Typewriter {
    phrases: Vec<Vec<char>>,
    phrase: usize,
    shown: usize,
    deleting: bool,
    type_ms: u32,
    delete_ms: u32,
    hold_ms: u32,
    gap_ms: u32,
}

impl Typewriter {
    /// `None` when there is nothing to type.
    pub fn new(config: &TypewriterConfig) -> Option<Self> {
        let phrases: Vec<Vec<char>> = config
            .phrases
            .iter()
            .filter(|p| !p.is_empty())
            .map(|p| p.chars().collect())
            .collect();
        if phrases.is_empty() {
            return None;
        }
        Some(Self {
            phrases,
            phrase: 0,
            shown: 0,
            deleting: false,
            type_ms: config.type_ms,
            delete_ms: config.delete_ms,
            hold_ms: config.hold_ms,
            gap_ms: config.gap_ms,
        })
    }

    pub fn tick(&mut self) -> TypewriterFrame {
        let len = self.phrases[self.phrase].len();
        let delay_ms = if self.deleting {
            self.shown = self.shown.saturating_sub(1);
            if self.shown == 0 {
                self.deleting = false;
                self.phrase = (self.phrase + 1) % self.phrases.len();
                self.gap_ms
            } else {
                self.delete_ms
            }
        } else {
            self.shown = (self.shown + 1).min(len);
            if self.shown == len {
                self.deleting = true;
                self.hold_ms
            } else {
                self.type_ms
            }
        };
        TypewriterFrame {
            text: self.current_text(),
            delay_ms,
        }
    }

    /// True while the full phrase is on screen, before deletion starts.
    pub fn is_holding(&self) -> bool {
        self.deleting && self.shown == self.phrases[self.phrase].len()
    }

    /// Advance to the next fully typed phrase (or stay on the current one if
    /// it is already complete) and return it. Used to freeze the effect.
    pub fn settle(&mut self) -> String {
        while !self.is_holding() {
            self.tick();
        }
        self.current_text()
    }

    pub fn current_text(&self) -> String {
        self.phrases[self.phrase][..self.shown].iter().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(phrases: &[&str]) -> TypewriterConfig {
        TypewriterConfig {
            phrases: phrases.iter().map(|p| p.to_string()).collect(),
            type_ms: 100,
            delete_ms: 50,
            hold_ms: 2000,
            gap_ms: 500,
        }
    }

    #[test]
    fn types_holds_deletes_and_advances() {
        let mut writer = Typewriter::new(&config(&["Hi", "Yo"])).expect("has phrases");
        let frames: Vec<TypewriterFrame> = (0..5).map(|_| writer.tick()).collect();
        let texts: Vec<&str> = frames.iter().map(|f| f.text.as_str()).collect();
        let delays: Vec<u32> = frames.iter().map(|f| f.delay_ms).collect();

        assert_eq!(texts, ["H", "Hi", "H", "", "Y"]);
        assert_eq!(delays, [100, 2000, 50, 500, 100]);
    }

    #[test]
    fn loops_back_to_first_phrase() {
        let mut writer = Typewriter::new(&config(&["a"])).expect("has phrases");
        assert_eq!(writer.tick().text, "a");
        assert_eq!(writer.tick().text, "");
        assert_eq!(writer.tick().text, "a");
    }

    #[test]
    fn handles_multibyte_characters() {
        let mut writer = Typewriter::new(&config(&["K\u{1ef9}"])).expect("has phrases");
        assert_eq!(writer.tick().text, "K");
        assert_eq!(writer.tick().text, "K\u{1ef9}");
    }

    #[test]
    fn holds_only_on_complete_phrase() {
        let mut writer = Typewriter::new(&config(&["ab"])).expect("has phrases");
        assert!(!writer.is_holding());
        writer.tick();
        assert!(!writer.is_holding());
        writer.tick();
        assert!(writer.is_holding());
        writer.tick();
        assert!(!writer.is_holding());
    }

    #[test]
    fn settle_freezes_on_a_complete_phrase() {
        let mut writer = Typewriter::new(&config(&["Hi", "Yo"])).expect("has phrases");
        assert_eq!(writer.settle(), "Hi");
        assert_eq!(writer.settle(), "Hi");

        // Mid-deletion: finishes deleting and types the next phrase.
        writer.tick();
        assert_eq!(writer.settle(), "Yo");

        // Resuming after a freeze continues with deletion.
        let frame = writer.tick();
        assert_eq!(frame.text, "Y");
        assert_eq!(frame.delay_ms, 50);
    }

    #[test]
    fn empty_phrase_list_disables_effect() {
        assert!(Typewriter::new(&config(&[])).is_none());
        assert!(Typewriter::new(&config(&[""])).is_none());
    }
}
