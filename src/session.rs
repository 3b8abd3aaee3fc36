use crate::feedback::Tier;
use crate::history::History;
use crate::reaction::Status;

/// Everything the presentation layer is allowed to see of a session.
///
/// Read-only; commands still go through `ReactionTimer`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionSnapshot<'a> {
    pub status: Status,
    pub intro_countdown: u32,
    pub countdown_display_seconds: Option<u32>,
    pub last_reaction_ms: Option<u64>,
    pub history: &'a History,
    pub best: Option<u64>,
}

impl SessionSnapshot<'_> {
    /// One-line prompt for the current status
    pub fn headline(&self) -> &'static str {
        match self.status {
            Status::Intro => "Let's see how fast you are!",
            Status::Ready => "Press start when you're ready",
            Status::Countdown => "Get ready...",
            Status::Waiting => "Click now!",
            Status::Result => "Your reaction time",
            Status::TooEarly => "Oops! You clicked too early",
        }
    }

    pub fn feedback(&self) -> Option<Tier> {
        self.last_reaction_ms.map(Tier::classify)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot(status: Status, last: Option<u64>) -> SessionSnapshot<'static> {
        static EMPTY: History = History::new();
        SessionSnapshot {
            status,
            intro_countdown: 0,
            countdown_display_seconds: None,
            last_reaction_ms: last,
            history: &EMPTY,
            best: None,
        }
    }

    #[test]
    fn headline_per_status() {
        assert_eq!(snapshot(Status::Waiting, None).headline(), "Click now!");
        assert_eq!(
            snapshot(Status::TooEarly, None).headline(),
            "Oops! You clicked too early"
        );
    }

    #[test]
    fn feedback_follows_last_result() {
        assert_eq!(snapshot(Status::Ready, None).feedback(), None);
        assert_eq!(
            snapshot(Status::Result, Some(99)).feedback(),
            Some(Tier::PrettyGood)
        );
    }
}
