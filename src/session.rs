//! Session Data Model
//!
//! Participant metadata, group assignment and the responses captured during
//! the testing phase.

use rand::Rng;
use std::fmt;

/// Experimental condition a participant is assigned to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Group {
    A,
    B,
}

impl Group {
    /// Independent 50/50 draw. Sessions are not counterbalanced.
    pub fn draw<R: Rng + ?Sized>(rng: &mut R) -> Self {
        if rng.gen_bool(0.5) {
            Group::A
        } else {
            Group::B
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Group::A => "A",
            Group::B => "B",
        }
    }
}

impl fmt::Display for Group {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Created once at bootstrap and read by every later phase
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParticipantSession {
    identifier: String,
    group: Group,
}

impl ParticipantSession {
    pub fn new(identifier: impl Into<String>, group: Group) -> Self {
        Self {
            identifier: identifier.into(),
            group,
        }
    }

    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    pub fn group(&self) -> Group {
        self.group
    }
}

/// Typicality rating on a 1 (not at all typical) to 7 (very typical) scale
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Rating(u8);

impl Rating {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 7;

    pub fn new(value: u8) -> Option<Self> {
        (Self::MIN..=Self::MAX).contains(&value).then_some(Self(value))
    }

    /// Map a digit key `'1'..='7'` to a rating
    pub fn from_key(key: char) -> Option<Self> {
        key.to_digit(10)
            .and_then(|d| u8::try_from(d).ok())
            .and_then(Self::new)
    }

    pub fn value(&self) -> u8 {
        self.0
    }
}

impl fmt::Display for Rating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Category-membership judgement. A rating exists only for `Yes`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Yes { rating: Rating },
    No,
}

impl Decision {
    pub fn label(&self) -> &'static str {
        match self {
            Decision::Yes { .. } => "Yes",
            Decision::No => "No",
        }
    }
}

/// One recorded answer for one test item
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    item_label: String,
    decision: Decision,
}

impl Response {
    pub fn yes(item_label: impl Into<String>, rating: Rating) -> Self {
        Self {
            item_label: item_label.into(),
            decision: Decision::Yes { rating },
        }
    }

    pub fn no(item_label: impl Into<String>) -> Self {
        Self {
            item_label: item_label.into(),
            decision: Decision::No,
        }
    }

    pub fn item_label(&self) -> &str {
        &self.item_label
    }

    pub fn decision(&self) -> Decision {
        self.decision
    }

    pub fn rating(&self) -> Option<Rating> {
        match self.decision {
            Decision::Yes { rating } => Some(rating),
            Decision::No => None,
        }
    }
}
