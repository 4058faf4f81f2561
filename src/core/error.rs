use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("Erro de E/S: {0}")]
    Io(#[from] std::io::Error),

    #[error("Logo indisponível em {}: {source}", .path.display())]
    LogoUnavailable {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Logo inválido: {0}")]
    LogoDecode(String),

    #[error("Erro de geração: {0}")]
    Render(String),
}

pub type DocumentResult<T> = Result<T, DocumentError>;
