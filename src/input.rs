//! Keyboard Input
//!
//! Every pause in the experiment is a blocking read from a `KeySource`,
//! optionally restricted to a set of accepted keys.

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use std::collections::VecDeque;
use tracing::debug;

use crate::error::{ExperimentError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Char(char),
    Enter,
    Backspace,
    Esc,
    /// Ctrl+C. Raw mode swallows SIGINT, so it arrives as a key.
    Interrupt,
    Other,
}

impl From<KeyEvent> for Key {
    fn from(event: KeyEvent) -> Self {
        match event.code {
            KeyCode::Char('c') if event.modifiers.contains(KeyModifiers::CONTROL) => Key::Interrupt,
            KeyCode::Char(c) => Key::Char(c),
            KeyCode::Enter => Key::Enter,
            KeyCode::Backspace => Key::Backspace,
            KeyCode::Esc => Key::Esc,
            _ => Key::Other,
        }
    }
}

/// Blocking source of key presses
pub trait KeySource {
    fn next_key(&mut self) -> Result<Key>;
}

/// Reads key presses from the controlling terminal
#[derive(Debug, Default)]
pub struct TerminalKeys;

impl KeySource for TerminalKeys {
    fn next_key(&mut self) -> Result<Key> {
        loop {
            if let Event::Key(key) = event::read()? {
                // Releases and repeats are reported on some platforms
                if key.kind == KeyEventKind::Press {
                    return Ok(Key::from(key));
                }
            }
        }
    }
}

/// Replays a fixed sequence of keys
#[derive(Debug, Default)]
pub struct ScriptedKeys {
    keys: VecDeque<Key>,
}

impl ScriptedKeys {
    pub fn new(keys: impl IntoIterator<Item = Key>) -> Self {
        Self {
            keys: keys.into_iter().collect(),
        }
    }

    /// One `Key::Char` per character of `chars`
    pub fn from_chars(chars: &str) -> Self {
        Self::new(chars.chars().map(Key::Char))
    }

    pub fn push(&mut self, key: Key) {
        self.keys.push_back(key);
    }

    pub fn remaining(&self) -> usize {
        self.keys.len()
    }
}

impl KeySource for ScriptedKeys {
    fn next_key(&mut self) -> Result<Key> {
        self.keys.pop_front().ok_or(ExperimentError::InputExhausted)
    }
}

/// Block until any key is pressed
pub fn wait_any(keys: &mut dyn KeySource) -> Result<Key> {
    match keys.next_key()? {
        Key::Interrupt => Err(ExperimentError::Interrupted),
        key => Ok(key),
    }
}

/// Block until one of `allowed` is pressed; everything else is ignored
pub fn wait_for(keys: &mut dyn KeySource, allowed: &[char]) -> Result<char> {
    wait_map(keys, |c| allowed.contains(&c).then_some(c))
}

/// Block until `accept` maps a pressed character to a value. Letters are
/// lowercased first so Shift and Caps Lock do not change the answer.
pub fn wait_map<T>(keys: &mut dyn KeySource, mut accept: impl FnMut(char) -> Option<T>) -> Result<T> {
    loop {
        match keys.next_key()? {
            Key::Interrupt => return Err(ExperimentError::Interrupted),
            Key::Char(c) => match accept(c.to_ascii_lowercase()) {
                Some(value) => return Ok(value),
                None => debug!("Ignoring key '{}'", c),
            },
            ignored => debug!("Ignoring key {:?}", ignored),
        }
    }
}
