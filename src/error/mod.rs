use std::io;

use crate::editor::EditorError;
use crate::input::ScriptError;
use crate::storage::StorageError;
use thiserror::Error;

pub type AppResult<T> = std::result::Result<T, AppError>;

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Editor(#[from] EditorError),
    #[error(transparent)]
    Script(#[from] ScriptError),
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error("failed to read command script {origin}")]
    ReadScript {
        origin: String,
        #[source]
        source: io::Error,
    },
}
