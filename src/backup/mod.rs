//! # 备份模块
//!
//! 解包 / 转换成功后，原始文件被移出工作目录并保留一段时间。
//!
//! ## 依赖关系
//! - 被 `packer/unpacker.rs`、`commands/pdf2cbz.rs` 使用
//! - 子模块: retention

pub mod retention;

pub use retention::RetentionBackupStore;

use crate::error::Result;
use std::path::{Path, PathBuf};

/// 备份存储
pub trait BackupStore: Send + Sync {
    /// 将文件移入备份存储，返回备份后的路径
    fn store(&self, file: &Path) -> Result<PathBuf>;
}
