//! Session state store for copydesk.
//!
//! An explicit application-state container with one typed slice per tool:
//! generation, alignment, and optimize. Each slice is a loading/result/error
//! triple guarded by a monotonically increasing token. Updates are pure
//! reducer-style functions: `begin` issues a fresh token, and `resolve`/
//! `fail` apply only when the supplied token is still current, so a stale
//! response can never clobber newer state.
//!
//! The store persists at `.copydesk/state/session.yaml`, which is how results
//! survive between CLI invocations (an alignment check in one command feeds
//! an optimize request in the next).

use crate::align::AlignmentRecord;
use crate::context::WorkspaceContext;
use crate::error::{CopydeskError, Result};
use crate::fs::atomic_write_file;
use crate::optimize::OptimizeRecord;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[cfg(test)]
mod tests;

/// The state of a slice.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SliceState<T> {
    /// No request has run, or the slice was cleared.
    Idle,
    /// A request is in flight.
    Loading,
    /// The last request succeeded.
    Ready { value: T },
    /// The last request failed.
    Failed { message: String },
}

/// A per-tool loading/result/error triple with a request token.
///
/// The token increases on every `begin`; a `resolve` or `fail` carrying an
/// older token is ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Slice<T> {
    /// The most recently issued request token.
    pub token: u64,

    /// Current state.
    pub state: SliceState<T>,
}

impl<T> Default for Slice<T> {
    fn default() -> Self {
        Self {
            token: 0,
            state: SliceState::Idle,
        }
    }
}

impl<T> Slice<T> {
    /// Begin a request: issue a fresh token and enter `Loading`.
    ///
    /// Any still-unresolved older request is superseded; its eventual
    /// `resolve`/`fail` will carry a stale token and be dropped.
    pub fn begin(self) -> (Self, u64) {
        let token = self.token + 1;
        (
            Self {
                token,
                state: SliceState::Loading,
            },
            token,
        )
    }

    /// Resolve a request with its result.
    ///
    /// Applies only when `token` is the current in-flight token; returns
    /// whether the update was applied.
    pub fn resolve(self, token: u64, value: T) -> (Self, bool) {
        if token == self.token && matches!(self.state, SliceState::Loading) {
            (
                Self {
                    token,
                    state: SliceState::Ready { value },
                },
                true,
            )
        } else {
            (self, false)
        }
    }

    /// Fail a request with a message.
    ///
    /// Applies only when `token` is the current in-flight token; returns
    /// whether the update was applied.
    pub fn fail(self, token: u64, message: impl Into<String>) -> (Self, bool) {
        if token == self.token && matches!(self.state, SliceState::Loading) {
            (
                Self {
                    token,
                    state: SliceState::Failed {
                        message: message.into(),
                    },
                },
                true,
            )
        } else {
            (self, false)
        }
    }

    /// Clear the slice back to idle. The token is preserved so a response
    /// from before the clear still cannot apply.
    pub fn clear(self) -> Self {
        Self {
            token: self.token,
            state: SliceState::Idle,
        }
    }

    /// The ready value, if any.
    pub fn value(&self) -> Option<&T> {
        match &self.state {
            SliceState::Ready { value } => Some(value),
            _ => None,
        }
    }

    /// The failure message, if any.
    pub fn error(&self) -> Option<&str> {
        match &self.state {
            SliceState::Failed { message } => Some(message),
            _ => None,
        }
    }

    /// Whether a request is in flight.
    pub fn is_loading(&self) -> bool {
        matches!(self.state, SliceState::Loading)
    }

    /// Whether the slice is idle.
    pub fn is_idle(&self) -> bool {
        matches!(self.state, SliceState::Idle)
    }
}

/// Record of the last successful generation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationRecord {
    /// Template used.
    pub template_id: String,

    /// Document the copy was written to.
    pub doc_id: String,

    /// Size of the generated copy in characters.
    pub chars: usize,

    /// When generation completed.
    pub generated_at: DateTime<Utc>,
}

/// The persisted session state: one slice per tool.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionState {
    /// Generation slice.
    pub generation: Slice<GenerationRecord>,

    /// Alignment slice.
    pub alignment: Slice<AlignmentRecord>,

    /// Optimize slice.
    pub optimize: Slice<OptimizeRecord>,
}

impl SessionState {
    /// Load session state, returning the default when no file exists.
    pub fn load(ctx: &WorkspaceContext) -> Result<Self> {
        let path = ctx.session_path();
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(&path).map_err(|e| {
            CopydeskError::UserError(format!(
                "failed to read session state '{}': {}",
                path.display(),
                e
            ))
        })?;

        serde_yaml::from_str(&content).map_err(|e| {
            CopydeskError::UserError(format!(
                "failed to parse session state '{}': {}",
                path.display(),
                e
            ))
        })
    }

    /// Atomically save session state.
    pub fn save(&self, ctx: &WorkspaceContext) -> Result<()> {
        let yaml = serde_yaml::to_string(self).map_err(|e| {
            CopydeskError::UserError(format!("failed to serialize session state: {}", e))
        })?;
        atomic_write_file(ctx.session_path(), &yaml)
    }
}
