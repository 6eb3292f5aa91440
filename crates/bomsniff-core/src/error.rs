//! 文件嗅探错误
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// 单个文件嗅探失败的原因（Reader 本身不产生错误，只透传底层错误）
#[derive(Debug, Error)]
pub enum SniffError {
    #[error("failed to open {}: {source}", path.display())]
    Open { path: PathBuf, source: io::Error },

    #[error("failed to read {}: {source}", path.display())]
    Read { path: PathBuf, source: io::Error },
}
