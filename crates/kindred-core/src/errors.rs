use kindred_core_types::{RequestId, TraceId};
use thiserror::Error;

/// Result type alias using KindredError
pub type Result<T> = std::result::Result<T, KindredError>;

// ========== Error Facility ==========

/// Canonical error kind taxonomy
///
/// Every error that leaves the store is classified by one of these kinds.
/// The three constraint kinds are reported by the storage engine and are
/// surfaced unmodified; callers own any retry or recovery policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExErrorKind {
    // Storage-engine constraint failures
    /// Duplicate username/email, or a second mood entry for the same user and day
    UniquenessViolation,
    /// Reference to a user or post that does not exist
    ForeignKeyViolation,
    /// CHECK/NOT NULL/trigger rejection (mood score range, closed chat session)
    ConstraintViolation,

    // Lookup
    NotFound,

    // Input
    InvalidInput,

    // Integration/IO
    Io,
    Serialization,
    Persistence,
    Config,
}

impl ExErrorKind {
    /// Get the stable error code for this kind
    pub fn code(&self) -> &'static str {
        match self {
            ExErrorKind::UniquenessViolation => "ERR_UNIQUENESS_VIOLATION",
            ExErrorKind::ForeignKeyViolation => "ERR_FOREIGN_KEY_VIOLATION",
            ExErrorKind::ConstraintViolation => "ERR_CONSTRAINT_VIOLATION",
            ExErrorKind::NotFound => "ERR_NOT_FOUND",
            ExErrorKind::InvalidInput => "ERR_INVALID_INPUT",
            ExErrorKind::Io => "ERR_IO",
            ExErrorKind::Serialization => "ERR_SERIALIZATION",
            ExErrorKind::Persistence => "ERR_PERSISTENCE",
            ExErrorKind::Config => "ERR_CONFIG",
        }
    }

    /// True for the three kinds the storage engine reports on constraint failure
    pub fn is_constraint(&self) -> bool {
        matches!(
            self,
            ExErrorKind::UniquenessViolation
                | ExErrorKind::ForeignKeyViolation
                | ExErrorKind::ConstraintViolation
        )
    }
}

/// Canonical structured error type
///
/// Carries a classification kind for programmatic handling plus optional
/// context (operation, entity id, correlation ids) for diagnostics.
#[derive(Debug, Clone)]
pub struct ExError {
    kind: ExErrorKind,
    op: Option<String>,
    entity_id: Option<String>,
    request_id: Option<RequestId>,
    trace_id: Option<TraceId>,
    message: String,
    source: Option<Box<ExError>>,
}

impl ExError {
    /// Create a new error with the specified kind
    pub fn new(kind: ExErrorKind) -> Self {
        Self {
            kind,
            op: None,
            entity_id: None,
            request_id: None,
            trace_id: None,
            message: String::new(),
            source: None,
        }
    }

    /// Add operation context
    pub fn with_op(mut self, op: impl Into<String>) -> Self {
        self.op = Some(op.into());
        self
    }

    /// Add entity ID context
    pub fn with_entity_id(mut self, id: impl ToString) -> Self {
        self.entity_id = Some(id.to_string());
        self
    }

    pub fn with_request_id(mut self, request_id: RequestId) -> Self {
        self.request_id = Some(request_id);
        self
    }

    pub fn with_trace_id(mut self, trace_id: TraceId) -> Self {
        self.trace_id = Some(trace_id);
        self
    }

    /// Add custom message
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    /// Add source error
    pub fn with_source(mut self, source: ExError) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    pub fn kind(&self) -> ExErrorKind {
        self.kind
    }

    /// Get the stable error code
    pub fn code(&self) -> &'static str {
        self.kind.code()
    }

    pub fn op(&self) -> Option<&str> {
        self.op.as_deref()
    }

    pub fn entity_id(&self) -> Option<&str> {
        self.entity_id.as_deref()
    }

    pub fn request_id(&self) -> Option<&RequestId> {
        self.request_id.as_ref()
    }

    pub fn trace_id(&self) -> Option<&TraceId> {
        self.trace_id.as_ref()
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn source_error(&self) -> Option<&ExError> {
        self.source.as_deref()
    }
}

impl std::fmt::Display for ExError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}]", self.code())?;
        if let Some(op) = &self.op {
            write!(f, " in operation '{}'", op)?;
        }
        if !self.message.is_empty() {
            write!(f, ": {}", self.message)?;
        }
        if let Some(entity_id) = &self.entity_id {
            write!(f, " (entity_id: {})", entity_id)?;
        }
        if let Some(request_id) = &self.request_id {
            write!(f, " (request_id: {})", request_id)?;
        }
        Ok(())
    }
}

impl std::error::Error for ExError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_deref()
            .map(|e| e as &(dyn std::error::Error + 'static))
    }
}

// ========== End Error Facility ==========

/// Domain errors raised by Kindred before or after a storage round-trip
#[derive(Error, Debug, Clone, PartialEq)]
pub enum KindredError {
    #[error("User not found: {user_id}")]
    UserNotFound { user_id: i64 },

    #[error("Post not found: {post_id}")]
    PostNotFound { post_id: i64 },

    #[error("Comment not found: {comment_id}")]
    CommentNotFound { comment_id: i64 },

    #[error("Mood entry not found: {entry_id}")]
    MoodEntryNotFound { entry_id: i64 },

    #[error("Chat session not found: {session_id}")]
    ChatSessionNotFound { session_id: i64 },

    #[error("Resource not found: {resource_id}")]
    ResourceNotFound { resource_id: i64 },

    #[error("Mood score {score} is outside 1..=10")]
    MoodScoreOutOfRange { score: i64 },

    #[error("Invalid input: {reason}")]
    InvalidInput { reason: String },

    #[error("Serialization error: {message}")]
    Serialization { message: String },
}

impl From<KindredError> for ExError {
    fn from(err: KindredError) -> Self {
        match err {
            KindredError::UserNotFound { user_id } => ExError::new(ExErrorKind::NotFound)
                .with_entity_id(user_id)
                .with_message("User not found"),

            KindredError::PostNotFound { post_id } => ExError::new(ExErrorKind::NotFound)
                .with_entity_id(post_id)
                .with_message("Post not found"),

            KindredError::CommentNotFound { comment_id } => ExError::new(ExErrorKind::NotFound)
                .with_entity_id(comment_id)
                .with_message("Comment not found"),

            KindredError::MoodEntryNotFound { entry_id } => ExError::new(ExErrorKind::NotFound)
                .with_entity_id(entry_id)
                .with_message("Mood entry not found"),

            KindredError::ChatSessionNotFound { session_id } => {
                ExError::new(ExErrorKind::NotFound)
                    .with_entity_id(session_id)
                    .with_message("Chat session not found")
            }

            KindredError::ResourceNotFound { resource_id } => ExError::new(ExErrorKind::NotFound)
                .with_entity_id(resource_id)
                .with_message("Resource not found"),

            KindredError::MoodScoreOutOfRange { score } => {
                ExError::new(ExErrorKind::ConstraintViolation)
                    .with_op("validate_mood_score")
                    .with_message(format!("Mood score {} is outside 1..=10", score))
            }

            KindredError::InvalidInput { reason } => {
                ExError::new(ExErrorKind::InvalidInput).with_message(reason)
            }

            KindredError::Serialization { message } => {
                ExError::new(ExErrorKind::Serialization).with_message(message)
            }
        }
    }
}

impl From<serde_json::Error> for KindredError {
    fn from(err: serde_json::Error) -> Self {
        KindredError::Serialization {
            message: err.to_string(),
        }
    }
}
