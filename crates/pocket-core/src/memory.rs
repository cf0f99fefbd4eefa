//! Rolling, per-session transcript of chat turns.

use pocket_abi::backend::{ChatTurn, Role};

#[derive(Default, Debug, Clone)]
pub struct SessionMemory {
    turns: Vec<ChatTurn>,
}

impl SessionMemory {
    #[inline]
    pub fn new() -> Self {
        Self { turns: Vec::new() }
    }

    /// All stored turns (oldest → newest).
    #[inline]
    pub fn turns(&self) -> &[ChatTurn] {
        &self.turns
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.turns.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    #[inline]
    pub fn push_user<S: Into<String>>(&mut self, s: S) {
        self.turns.push(ChatTurn::user(s));
    }

    #[inline]
    pub fn push_assistant<S: Into<String>>(&mut self, s: S) {
        self.turns.push(ChatTurn::assistant(s));
    }

    /// Push a system turn (rare mid-session; usually set by the template).
    #[inline]
    pub fn push_system<S: Into<String>>(&mut self, s: S) {
        self.turns.push(ChatTurn::system(s));
    }

    /// Remove all history.
    #[inline]
    pub fn clear(&mut self) {
        self.turns.clear();
    }

    /// Number of non-system turns.
    pub fn dialog_len(&self) -> usize {
        self.turns
            .iter()
            .filter(|t| t.role != Role::System)
            .count()
    }

    /// Drop the oldest non-system turn(s) to make room.
    /// If the oldest is a (User, Assistant) pair, remove them together
    /// to keep dialog coherent. Returns true if something was removed.
    pub fn drop_oldest_pair(&mut self) -> bool {
        let Some(i) = self.turns.iter().position(|t| t.role != Role::System) else {
            return false;
        };

        if i + 1 < self.turns.len()
            && self.turns[i].role == Role::User
            && self.turns[i + 1].role == Role::Assistant
        {
            self.turns.drain(i..=i + 1);
        } else {
            self.turns.remove(i);
        }
        true
    }
}
