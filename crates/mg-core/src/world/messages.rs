//! Player-facing message log

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

use crate::consts::DEFAULT_MESSAGE_LIMIT;
use crate::creature::CreatureId;
use crate::geom::Position;

use super::GameTime;

/// Who gets to read a message
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, Display, EnumIter,
)]
#[repr(u8)]
pub enum MessageKind {
    /// Seen by anyone watching the position
    #[default]
    Global = 0,
    /// Heard by anyone nearby who cannot see the position
    Unseen = 1,
    /// Addressed to one creature, "you ..."
    SecondPerson = 2,
    /// Private to one creature
    Private = 3,
}

/// Phrasing templates for [`super::World::you`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter)]
#[repr(u8)]
pub enum MsgType {
    /// "You are killed by X"
    KilledBy = 0,
    /// "X pulls you"
    HappensTo = 1,
    /// "You are X"
    Are = 2,
}

impl MsgType {
    pub fn second_person(self, param: &str) -> String {
        match self {
            MsgType::KilledBy => format!("You are killed by {}", param),
            MsgType::HappensTo => format!("{} you", capitalize(param)),
            MsgType::Are => format!("You are {}", param),
        }
    }

    pub fn third_person(self, subject: &str, param: &str) -> String {
        match self {
            MsgType::KilledBy => format!("{} is killed by {}", capitalize(subject), param),
            MsgType::HappensTo => format!("{} {}", capitalize(param), subject),
            MsgType::Are => format!("{} is {}", capitalize(subject), param),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub kind: MessageKind,
    pub text: String,
    pub recipient: Option<CreatureId>,
    pub position: Option<Position>,
    pub time: GameTime,
}

/// Bounded log of recent messages, oldest first
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageLog {
    entries: VecDeque<Message>,
    limit: usize,
}

impl MessageLog {
    pub fn new(limit: usize) -> Self {
        Self {
            entries: VecDeque::new(),
            limit: limit.max(1),
        }
    }

    pub fn push(&mut self, message: Message) {
        log::trace!("[{:?}] {}", message.kind, message.text);
        if self.entries.len() == self.limit {
            self.entries.pop_front();
        }
        self.entries.push_back(message);
    }

    pub fn iter(&self) -> impl Iterator<Item = &Message> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn last(&self) -> Option<&Message> {
        self.entries.back()
    }

    /// Whether any message contains `needle`
    pub fn contains(&self, needle: &str) -> bool {
        self.entries.iter().any(|m| m.text.contains(needle))
    }

    /// Messages addressed to one creature
    pub fn for_creature(&self, id: CreatureId) -> impl Iterator<Item = &Message> {
        self.entries.iter().filter(move |m| m.recipient == Some(id))
    }

    /// Messages logged at or after `time`
    pub fn since(&self, time: GameTime) -> impl Iterator<Item = &Message> {
        self.entries.iter().filter(move |m| m.time >= time)
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

impl Default for MessageLog {
    fn default() -> Self {
        Self::new(DEFAULT_MESSAGE_LIMIT)
    }
}

/// Upper-case the first letter of a sentence
pub fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn message(text: &str) -> Message {
        Message {
            kind: MessageKind::Global,
            text: text.to_string(),
            recipient: None,
            position: None,
            time: GameTime(0),
        }
    }

    #[test]
    fn test_capitalize() {
        assert_eq!(capitalize("the boulder"), "The boulder");
        assert_eq!(capitalize(""), "");
    }

    #[test]
    fn test_limit_drops_oldest() {
        let mut log = MessageLog::new(2);
        log.push(message("one"));
        log.push(message("two"));
        log.push(message("three"));
        assert_eq!(log.len(), 2);
        assert!(!log.contains("one"));
        assert_eq!(log.last().map(|m| m.text.as_str()), Some("three"));
    }

    #[test]
    fn test_templates() {
        assert_eq!(
            MsgType::KilledBy.second_person("the boulder"),
            "You are killed by the boulder"
        );
        assert_eq!(
            MsgType::HappensTo.third_person("the goblin", "the kraken pulls"),
            "The kraken pulls the goblin"
        );
        assert_eq!(
            MsgType::Are.second_person("eaten by the kraken"),
            "You are eaten by the kraken"
        );
    }
}
