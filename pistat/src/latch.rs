//! One-way error latch. The first bad frame ends live processing for the session.

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LinkState {
    #[default]
    Live,
    Terminal(String),
}

#[derive(Debug, Clone, Default)]
pub struct ErrorLatch {
    state: LinkState,
}

impl ErrorLatch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Trip the latch. Returns false if it was already tripped; the first
    /// message is kept.
    pub fn trip(&mut self, message: impl Into<String>) -> bool {
        if self.is_tripped() {
            return false;
        }
        self.state = LinkState::Terminal(message.into());
        true
    }

    pub fn is_tripped(&self) -> bool {
        matches!(self.state, LinkState::Terminal(_))
    }

    pub fn message(&self) -> Option<&str> {
        match &self.state {
            LinkState::Live => None,
            LinkState::Terminal(m) => Some(m),
        }
    }

    pub fn state(&self) -> &LinkState {
        &self.state
    }
}
