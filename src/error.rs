//! # 统一错误处理模块
//!
//! 定义 comicutils 的所有错误类型，使用 `thiserror` 派生。
//!
//! ## 错误分类
//! - 前置条件错误（工作目录无效、打包源无效）：对当前调用致命
//! - 单条目错误（打包/解包失败）：在批处理边界被捕获并记录
//! - 预检错误（名称冲突）：对整个批次致命
//! - 外部协作者错误（7z / pdftoppm / zip）：包装为打包/解包错误
//!
//! ## 依赖关系
//! - 被所有其他模块使用
//! - 无外部模块依赖

use thiserror::Error;

/// comicutils 统一错误类型
#[derive(Error, Debug)]
pub enum ComicError {
    // ─────────────────────────────────────────────────────────────
    // I/O 错误
    // ─────────────────────────────────────────────────────────────
    #[error("Failed to read {path}: {source}")]
    FileReadError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write {path}: {source}")]
    FileWriteError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Directory not found: {path}")]
    DirectoryNotFound { path: String },

    #[error("Not a directory: {path}")]
    NotADirectory { path: String },

    // ─────────────────────────────────────────────────────────────
    // 前置条件 / 预检错误
    // ─────────────────────────────────────────────────────────────
    #[error("Invalid source {path}: {reason}")]
    InvalidSource { path: String, reason: String },

    #[error("The following files have a naming conflict:\n{}", names.join("\n"))]
    NameCollision { names: Vec<String> },

    // ─────────────────────────────────────────────────────────────
    // 打包 / 解包错误
    // ─────────────────────────────────────────────────────────────
    #[error("Could not pack {path}: {reason}")]
    Packing { path: String, reason: String },

    #[error("Could not unpack {path}: {reason}")]
    Unpacking { path: String, reason: String },

    #[error("Zip error: {0}")]
    Zip(#[from] zip::result::ZipError),

    #[error("Backup of {path} failed: {reason}")]
    Backup { path: String, reason: String },

    // ─────────────────────────────────────────────────────────────
    // 外部命令错误
    // ─────────────────────────────────────────────────────────────
    #[error("External command '{command}' not found in PATH")]
    CommandNotFound { command: String },

    #[error("External command failed: {command}\n{stderr}")]
    CommandFailed { command: String, stderr: String },

    // ─────────────────────────────────────────────────────────────
    // 参数 / 运行时错误
    // ─────────────────────────────────────────────────────────────
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Failed to build worker pool: {0}")]
    ThreadPool(String),

    #[error("{0}")]
    Other(String),
}

impl ComicError {
    /// 将任意错误包装为打包错误，保留协作者的诊断信息
    pub fn packing(path: &std::path::Path, cause: impl std::fmt::Display) -> Self {
        ComicError::Packing {
            path: path.display().to_string(),
            reason: cause.to_string(),
        }
    }

    /// 将任意错误包装为解包错误
    pub fn unpacking(path: &std::path::Path, cause: impl std::fmt::Display) -> Self {
        ComicError::Unpacking {
            path: path.display().to_string(),
            reason: cause.to_string(),
        }
    }

    pub fn read(path: &std::path::Path, source: std::io::Error) -> Self {
        ComicError::FileReadError {
            path: path.display().to_string(),
            source,
        }
    }

    pub fn write(path: &std::path::Path, source: std::io::Error) -> Self {
        ComicError::FileWriteError {
            path: path.display().to_string(),
            source,
        }
    }
}

/// Result 类型别名
pub type Result<T> = std::result::Result<T, ComicError>;
