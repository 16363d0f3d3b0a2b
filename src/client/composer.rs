//! Outgoing-message composer state.
//!
//! Pure draft/sending bookkeeping; the page owns the actual transmission.

/// Draft text and sending latch for the message input.
///
/// A submit is allowed only while the draft has visible content and no
/// earlier submit is still in flight.
#[derive(Debug, Default)]
pub struct Composer {
    draft: String,
    sending: bool,
}

impl Composer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_draft(&mut self, text: &str) {
        self.draft = text.to_string();
    }

    pub fn draft(&self) -> &str {
        &self.draft
    }

    /// Whether a submit would go through right now
    pub fn can_send(&self) -> bool {
        !self.draft.trim().is_empty() && !self.sending
    }

    /// Begin a submit: takes the draft, clears the input and raises the
    /// sending latch. Returns `None` when sending is not allowed.
    pub fn begin_submit(&mut self) -> Option<String> {
        if !self.can_send() {
            return None;
        }
        self.sending = true;
        Some(std::mem::take(&mut self.draft))
    }

    /// Finish the in-flight submit, releasing the latch
    pub fn finish_submit(&mut self) {
        self.sending = false;
    }
}
