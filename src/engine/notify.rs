use std::collections::VecDeque;
use std::time::{Duration, Instant};

pub const DISPLAY_DURATION: Duration = Duration::from_millis(2500);
pub const FADE_DURATION: Duration = Duration::from_millis(300);
const MAX_NOTIFICATIONS: usize = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NotificationKind {
    Success,
    Error,
    #[default]
    Info,
}

impl NotificationKind {
    /// Accent colour as RGB.
    pub fn accent(self) -> (u8, u8, u8) {
        match self {
            NotificationKind::Success => (0x4c, 0xaf, 0x50),
            NotificationKind::Error => (0xf4, 0x43, 0x36),
            NotificationKind::Info => (0x21, 0x96, 0xf3),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Visible,
    Fading,
    Expired,
}

#[derive(Debug, Clone)]
pub struct Notification {
    pub message: String,
    pub kind: NotificationKind,
    pub created_at: Instant,
}

/// Transient, non-blocking messages. Each one stays up for the display
/// duration, fades for the fade duration and is then dropped on `prune`.
#[derive(Debug, Clone)]
pub struct Notifier {
    display: Duration,
    fade: Duration,
    items: VecDeque<Notification>,
}

impl Default for Notifier {
    fn default() -> Self {
        Self::new(DISPLAY_DURATION, FADE_DURATION)
    }
}

impl Notifier {
    pub fn new(display: Duration, fade: Duration) -> Self {
        Self {
            display,
            fade,
            items: VecDeque::with_capacity(MAX_NOTIFICATIONS),
        }
    }

    pub fn push(&mut self, message: impl Into<String>, kind: NotificationKind, now: Instant) {
        if self.items.len() >= MAX_NOTIFICATIONS {
            self.items.pop_front();
        }
        self.items.push_back(Notification {
            message: message.into(),
            kind,
            created_at: now,
        });
    }

    pub fn phase(&self, n: &Notification, now: Instant) -> Phase {
        let age = now.saturating_duration_since(n.created_at);
        if age < self.display {
            Phase::Visible
        } else if age < self.display + self.fade {
            Phase::Fading
        } else {
            Phase::Expired
        }
    }

    /// Drop every expired notification. Returns how many were removed.
    pub fn prune(&mut self, now: Instant) -> usize {
        let before = self.items.len();
        let display = self.display;
        let fade = self.fade;
        self.items
            .retain(|n| now.saturating_duration_since(n.created_at) < display + fade);
        before - self.items.len()
    }

    /// Live notifications with their phase, newest first.
    pub fn active(&self, now: Instant) -> Vec<(&Notification, Phase)> {
        self.items
            .iter()
            .rev()
            .map(|n| (n, self.phase(n, now)))
            .filter(|(_, p)| *p != Phase::Expired)
            .collect()
    }

    /// When the next phase change after `now` happens, if anything is on screen.
    pub fn next_deadline(&self, now: Instant) -> Option<Instant> {
        self.items
            .iter()
            .flat_map(|n| [n.created_at + self.display, n.created_at + self.display + self.fade])
            .filter(|&at| at > now)
            .min()
    }
}
