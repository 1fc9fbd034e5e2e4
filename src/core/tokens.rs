use std::sync::atomic::{AtomicU64, Ordering};

/// Actions whose responses write to a shared page region.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Upload,
    Match,
    LoadMatches,
    ViewMatch,
}

impl Action {
    const COUNT: usize = 4;

    fn index(self) -> usize {
        match self {
            Action::Upload => 0,
            Action::Match => 1,
            Action::LoadMatches => 2,
            Action::ViewMatch => 3,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestToken {
    action: Action,
    sequence: u64,
}

impl RequestToken {
    pub fn action(&self) -> Action {
        self.action
    }
}

/// Per-action request counters. Issuing a token supersedes every earlier
/// token of the same action, so only the latest response gets applied.
#[derive(Debug, Default)]
pub struct RequestTokens {
    latest: [AtomicU64; Action::COUNT],
}

impl RequestTokens {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn issue(&self, action: Action) -> RequestToken {
        let sequence = self.latest[action.index()].fetch_add(1, Ordering::SeqCst) + 1;
        RequestToken { action, sequence }
    }

    pub fn is_current(&self, token: &RequestToken) -> bool {
        self.latest[token.action.index()].load(Ordering::SeqCst) == token.sequence
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_newer_token_supersedes_older() {
        let tokens = RequestTokens::new();
        let first = tokens.issue(Action::LoadMatches);
        assert!(tokens.is_current(&first));

        let second = tokens.issue(Action::LoadMatches);
        assert!(!tokens.is_current(&first));
        assert!(tokens.is_current(&second));
    }

    #[test]
    fn test_actions_are_independent() {
        let tokens = RequestTokens::new();
        let view = tokens.issue(Action::ViewMatch);
        let upload = tokens.issue(Action::Upload);
        tokens.issue(Action::Match);

        assert!(tokens.is_current(&view));
        assert!(tokens.is_current(&upload));
        assert_eq!(view.action(), Action::ViewMatch);
    }
}
