use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed timestamp `{segment}` in revision file `{file_name}`")]
    MalformedTimestamp { file_name: String, segment: String },
}

pub type Result<T> = std::result::Result<T, CoreError>;
