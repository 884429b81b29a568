// Copyright (c) 2026 bad-antics
// Licensed under the MIT License. See LICENSE file in the project root.
// https://github.com/bad-antics/fleetwatch

//! Capped rolling event log

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventKind {
    Info,
    Error,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SystemEvent {
    pub timestamp: DateTime<Utc>,
    #[serde(rename = "type")]
    pub kind: EventKind,
    pub message: String,
}

impl SystemEvent {
    pub fn now(kind: EventKind, message: impl Into<String>) -> Self {
        Self {
            timestamp: Utc::now(),
            kind,
            message: message.into(),
        }
    }
}

/// Newest entry always sits at index 0; the oldest falls off past capacity.
#[derive(Debug, Clone)]
pub struct EventLog {
    entries: VecDeque<SystemEvent>,
    capacity: usize,
}

impl EventLog {
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    pub fn push(&mut self, event: SystemEvent) {
        self.entries.push_front(event);
        self.entries.truncate(self.capacity);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &SystemEvent> {
        self.entries.iter()
    }

    pub fn to_vec(&self) -> Vec<SystemEvent> {
        self.entries.iter().cloned().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capped_at_ten_newest_first() {
        let mut log = EventLog::new(10);
        for i in 0..25 {
            log.push(SystemEvent::now(EventKind::Info, format!("event {}", i)));
            assert!(log.len() <= 10);
            assert_eq!(log.iter().next().unwrap().message, format!("event {}", i));
        }
        let messages: Vec<_> = log.iter().map(|e| e.message.clone()).collect();
        assert_eq!(messages.first().unwrap(), "event 24");
        assert_eq!(messages.last().unwrap(), "event 15");
    }

    #[test]
    fn test_serialized_shape() {
        let event = SystemEvent::now(EventKind::Error, "Data export failed");
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["type"], "error");
        assert_eq!(json["message"], "Data export failed");
        assert!(json["timestamp"].is_string());
    }
}
