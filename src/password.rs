//! Password entry with confirm-for-encryption semantics.
//!
//! Encryption requires the password twice; decryption commits on first
//! valid entry. The session owns the only copy of the bytes between the
//! two submissions and zeroes them on every exit path.

use crate::encoding::Encoding;
use crate::options::Operation;
use crate::secret::{self, SecretBytes};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfirmState {
    AwaitingEntry,
    AwaitingConfirmation,
    Committed,
}

/// Outcome of one submission.
#[derive(Debug, PartialEq, Eq)]
pub enum Submit {
    /// Input failed the strict password check; stay in entry.
    Rejected,
    /// First entry accepted; the caller must re-prompt. For base-N input
    /// the canonical re-encoding is provided for display.
    NeedsConfirmation { display: Option<String> },
    /// Confirmation differed; cached bytes discarded, back to entry.
    Mismatch,
    Committed,
}

#[derive(Debug)]
pub struct PasswordSession {
    operation: Operation,
    state: ConfirmState,
    cached: SecretBytes,
}

impl PasswordSession {
    pub fn new(operation: Operation) -> Self {
        Self {
            operation,
            state: ConfirmState::AwaitingEntry,
            cached: SecretBytes::new(),
        }
    }

    pub fn state(&self) -> ConfirmState {
        self.state
    }

    pub fn operation(&self) -> Operation {
        self.operation
    }

    /// Per-keystroke check; empty input is tolerated here.
    pub fn check_live(&self, input: &str, enc: Encoding) -> bool {
        secret::validate_password(input, enc, false).valid
    }

    pub fn submit(&mut self, input: &str, enc: Encoding) -> Submit {
        match self.state {
            ConfirmState::AwaitingEntry => {
                let v = secret::validate_password(input, enc, true);
                if !v.valid {
                    return Submit::Rejected;
                }
                self.cached = v.bytes;
                match self.operation {
                    Operation::Decrypt => {
                        self.state = ConfirmState::Committed;
                        Submit::Committed
                    }
                    Operation::Encrypt => {
                        self.state = ConfirmState::AwaitingConfirmation;
                        Submit::NeedsConfirmation { display: v.normalized }
                    }
                }
            }
            ConfirmState::AwaitingConfirmation => {
                let v = secret::validate_password(input, enc, true);
                if v.valid && v.bytes == self.cached {
                    self.state = ConfirmState::Committed;
                    Submit::Committed
                } else {
                    self.cached.clear();
                    self.state = ConfirmState::AwaitingEntry;
                    Submit::Mismatch
                }
            }
            ConfirmState::Committed => Submit::Committed,
        }
    }

    /// Cancel backs out of a pending confirmation without aborting the
    /// whole operation. Returns false when there was nothing to back out of.
    pub fn cancel(&mut self) -> bool {
        if self.state == ConfirmState::AwaitingConfirmation {
            self.cached.clear();
            self.state = ConfirmState::AwaitingEntry;
            true
        } else {
            false
        }
    }

    /// Move the committed password out. The session buffer is left empty
    /// and the state machine resets for any further use.
    pub fn take_password(&mut self) -> Option<SecretBytes> {
        if self.state != ConfirmState::Committed {
            return None;
        }
        self.state = ConfirmState::AwaitingEntry;
        Some(std::mem::take(&mut self.cached))
    }
}
