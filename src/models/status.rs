use crate::error::AppError;
use serde::{Deserialize, Serialize};

/// Completion state of a single enrichment target.
///
/// The detail payload lives inside the `Loaded` variant, so a target can
/// never be observed as "loaded" with its detail fields still unset, and a
/// readiness check always compares against an explicit state rather than a
/// mutable boolean.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "status", content = "data", rename_all = "snake_case")]
pub enum Enrichment<D> {
    /// No terminal outcome yet; a fetch may still be in flight
    Pending,

    /// The detail payload was applied
    Loaded(D),

    /// Enrichment ended without a payload and will not change further
    Failed(EnrichmentFailure),
}

impl<D> Enrichment<D> {
    /// True once the detail payload has been applied.
    pub fn is_loaded(&self) -> bool {
        matches!(self, Enrichment::Loaded(_))
    }

    /// True once the outcome is terminal (`Loaded` or `Failed`).
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Enrichment::Pending)
    }

    /// The applied detail payload, if any.
    pub fn detail(&self) -> Option<&D> {
        match self {
            Enrichment::Loaded(detail) => Some(detail),
            _ => None,
        }
    }

    /// The recorded failure, if any.
    pub fn failure(&self) -> Option<&EnrichmentFailure> {
        match self {
            Enrichment::Failed(failure) => Some(failure),
            _ => None,
        }
    }

    /// Transition `Pending -> Loaded`. The first terminal outcome wins;
    /// returns false if the state was already terminal.
    pub fn resolve_loaded(&mut self, detail: D) -> bool {
        if self.is_terminal() {
            return false;
        }
        *self = Enrichment::Loaded(detail);
        true
    }

    /// Transition `Pending -> Failed`. The first terminal outcome wins;
    /// returns false if the state was already terminal.
    pub fn resolve_failed(&mut self, failure: EnrichmentFailure) -> bool {
        if self.is_terminal() {
            return false;
        }
        *self = Enrichment::Failed(failure);
        true
    }
}

impl<D> Default for Enrichment<D> {
    fn default() -> Self {
        Enrichment::Pending
    }
}

/// Terminal failure recorded against a single target
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EnrichmentFailure {
    /// Failure classification
    pub kind: FailureKind,

    /// Human-readable description
    pub message: String,
}

impl EnrichmentFailure {
    pub fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    /// Classify a fetch error into a terminal failure record.
    pub fn from_error(err: &AppError) -> Self {
        let kind = match err {
            AppError::Timeout(_) => FailureKind::Timeout,
            AppError::EmptyResult(_) => FailureKind::NoMatch,
            _ => FailureKind::Transport,
        };
        Self::new(kind, err.to_string())
    }
}

/// Failure classification for a single target
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    /// The fetch exceeded its deadline
    Timeout,

    /// Network or protocol failure, or a malformed response
    Transport,

    /// The fetch succeeded but no detail data exists for this key
    NoMatch,
}

/// A record that can be enriched with a secondary detail payload.
///
/// The key identifies the target to the remote service and never changes
/// after creation; fetchers receive only the key, never the mutable record.
pub trait EnrichmentTarget: Send + Sync + 'static {
    /// Stable identity key
    type Key: Clone + Send + Sync + std::fmt::Display + 'static;

    /// Detail payload applied on success
    type Detail: Send + Sync + 'static;

    fn key(&self) -> Self::Key;

    /// Current completion state
    fn status(&self) -> &Enrichment<Self::Detail>;

    /// Apply a successful detail payload (first terminal outcome wins)
    fn apply(&mut self, detail: Self::Detail);

    /// Record a terminal failure (first terminal outcome wins)
    fn fail(&mut self, failure: EnrichmentFailure);
}
