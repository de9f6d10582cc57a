use sea_orm::DbErr;
use thiserror::Error;

/// Errors surfaced by the catalog services.
///
/// Repositories and the unit of work hand back raw [`DbErr`]; services wrap
/// them here and nowhere else.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("{entity} {id} not found.")]
    NotFound { entity: &'static str, id: i32 },
    #[error("{message}")]
    Storage {
        message: String,
        #[source]
        source: DbErr,
    },
    /// The row changed or vanished between read and write.
    #[error("{message}")]
    Concurrency {
        message: String,
        #[source]
        source: DbErr,
    },
    /// Search results whose parent chain could not be resolved.
    #[error("integrity violation: {0}")]
    Integrity(String),
}

impl ServiceError {
    pub fn not_found(entity: &'static str, id: i32) -> Self { Self::NotFound { entity, id } }

    pub fn storage(message: impl Into<String>, source: DbErr) -> Self {
        Self::Storage { message: message.into(), source }
    }

    /// Wrap a failed update, keeping optimistic-concurrency conflicts apart
    /// from every other store fault.
    pub fn from_update(message: impl Into<String>, source: DbErr) -> Self {
        let message = message.into();
        if is_concurrency_conflict(&source) {
            Self::Concurrency { message: format!("{} due to a concurrency issue.", message.trim_end_matches('.')), source }
        } else {
            Self::Storage { message, source }
        }
    }

    /// True for `Storage` and its `Concurrency` sub-case.
    pub fn is_storage_fault(&self) -> bool {
        matches!(self, Self::Storage { .. } | Self::Concurrency { .. })
    }
}

/// Zero rows touched by a keyed write means someone else got there first.
pub fn is_concurrency_conflict(err: &DbErr) -> bool {
    matches!(err, DbErr::RecordNotUpdated | DbErr::RecordNotFound(_))
}
