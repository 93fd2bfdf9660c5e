//! Transient on-screen notifications
//!
//! Messages are stamped with the simulation clock when queued and dropped once
//! their duration has elapsed. Each anchor is an independent stack, drawn top
//! to bottom in the order messages were queued.

use std::time::Duration;

use crate::colors::{self, Rgb};

/// Vertical zone a message is stacked in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Anchor {
    Top,
    Center,
    #[default]
    Bottom,
}

/// A queued notification
#[derive(Debug, Clone, PartialEq)]
pub struct Message {
    pub text: String,
    pub color: Rgb,
    pub duration: Duration,
    pub anchor: Anchor,
    /// Clock reading when queued
    pub created: Duration,
}

impl Message {
    /// Still showing at `now`
    pub fn is_live(&self, now: Duration) -> bool {
        now.saturating_sub(self.created) < self.duration
    }
}

/// Default lifetime of a plain message
pub const DEFAULT_MESSAGE_DURATION: Duration = Duration::from_secs(3);
/// Lifetime of end-of-run banners
pub const BANNER_DURATION: Duration = Duration::from_secs(5);

/// Time-expiring notification queue
#[derive(Debug, Clone, Default)]
pub struct MessageQueue {
    messages: Vec<Message>,
}

impl MessageQueue {
    pub fn new() -> Self {
        Self {
            messages: Vec::new(),
        }
    }

    /// Queue a message
    pub fn push(
        &mut self,
        text: impl Into<String>,
        color: Rgb,
        duration: Duration,
        anchor: Anchor,
        now: Duration,
    ) {
        let text = text.into();
        log::debug!("message [{anchor:?}] {text}");
        self.messages.push(Message {
            text,
            color,
            duration,
            anchor,
            created: now,
        });
    }

    /// Drop every message whose duration has run out
    pub fn expire(&mut self, now: Duration) {
        self.messages.retain(|m| m.is_live(now));
    }

    /// Messages at one anchor, oldest first
    pub fn at(&self, anchor: Anchor) -> impl Iterator<Item = &Message> {
        self.messages.iter().filter(move |m| m.anchor == anchor)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Message> {
        self.messages.iter()
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// True if any live message has exactly this text
    pub fn contains(&self, text: &str) -> bool {
        self.messages.iter().any(|m| m.text == text)
    }

    pub fn add_game_over(&mut self, score: u64, now: Duration) {
        self.push("Game Over!", colors::RED, BANNER_DURATION, Anchor::Center, now);
        self.push(
            "Press R to restart",
            colors::WHITE,
            BANNER_DURATION,
            Anchor::Center,
            now,
        );
        self.add_final_score(score, now);
    }

    pub fn add_final_score(&mut self, score: u64, now: Duration) {
        self.push(
            format!("Final Score: {score}"),
            colors::GOLD,
            BANNER_DURATION,
            Anchor::Center,
            now,
        );
    }

    pub fn add_game_complete(&mut self, score: u64, now: Duration) {
        self.push(
            "Congratulations!",
            colors::GREEN,
            BANNER_DURATION,
            Anchor::Center,
            now,
        );
        self.push(
            "You completed all levels!",
            colors::GREEN,
            BANNER_DURATION,
            Anchor::Center,
            now,
        );
        self.add_final_score(score, now);
        self.push(
            "Want to play again? Press R",
            colors::WHITE,
            BANNER_DURATION,
            Anchor::Center,
            now,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn secs(s: f32) -> Duration {
        Duration::from_secs_f32(s)
    }

    #[test]
    fn test_expiry() {
        let mut q = MessageQueue::new();
        q.push("short", colors::WHITE, secs(1.0), Anchor::Bottom, secs(0.0));
        q.push("long", colors::WHITE, secs(3.0), Anchor::Bottom, secs(0.5));

        q.expire(secs(0.9));
        assert_eq!(q.len(), 2);

        // Exactly at the deadline the message is gone
        q.expire(secs(1.0));
        assert_eq!(q.len(), 1);
        assert!(q.contains("long"));

        q.expire(secs(3.5));
        assert!(q.is_empty());
    }

    #[test]
    fn test_anchors_keep_queue_order() {
        let mut q = MessageQueue::new();
        let now = Duration::ZERO;
        q.push("a", colors::WHITE, secs(1.0), Anchor::Center, now);
        q.push("b", colors::WHITE, secs(1.0), Anchor::Top, now);
        q.push("c", colors::WHITE, secs(1.0), Anchor::Center, now);

        let center: Vec<_> = q.at(Anchor::Center).map(|m| m.text.as_str()).collect();
        assert_eq!(center, ["a", "c"]);
        assert_eq!(q.at(Anchor::Top).count(), 1);
        assert_eq!(q.at(Anchor::Bottom).count(), 0);
    }

    #[test]
    fn test_game_over_banner() {
        let mut q = MessageQueue::new();
        q.add_game_over(120, Duration::ZERO);
        assert!(q.contains("Game Over!"));
        assert!(q.contains("Final Score: 120"));
        assert!(q.iter().all(|m| m.anchor == Anchor::Center));
    }

    #[test]
    fn test_game_complete_banner() {
        let mut q = MessageQueue::new();
        q.add_game_complete(450, Duration::ZERO);
        assert_eq!(q.len(), 4);
        assert!(q.contains("Final Score: 450"));
        assert!(q.contains("Want to play again? Press R"));
    }

    #[test]
    fn test_default_anchor_is_bottom() {
        assert_eq!(Anchor::default(), Anchor::Bottom);
    }
}
