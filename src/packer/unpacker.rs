//! # 归档解包器
//!
//! 将归档解包到同级同名（去掉扩展名）目录，成功后把原始归档交给备份存储。
//!
//! ## 依赖关系
//! - 使用 `codec::ArchiveCodec` 解包
//! - 使用 `backup::BackupStore` 保存原始文件
//! - 被 `commands/unpack.rs`、`commands/repack.rs` 调用

use crate::backup::BackupStore;
use crate::codec::ArchiveCodec;
use crate::error::{ComicError, Result};
use crate::utils::fs::{is_symlink, remove_directory};

use std::path::{Path, PathBuf};

/// 归档解包器
pub struct Unpacker<'a> {
    codec: &'a dyn ArchiveCodec,
    backup: &'a dyn BackupStore,
}

impl<'a> Unpacker<'a> {
    pub fn new(codec: &'a dyn ArchiveCodec, backup: &'a dyn BackupStore) -> Self {
        Self { codec, backup }
    }

    /// 解包目标目录：`<父目录>/<文件名去掉扩展名>`
    pub fn target_for(archive: &Path) -> Result<PathBuf> {
        let stem = archive.file_stem().ok_or_else(|| {
            ComicError::unpacking(archive, "archive has no file name")
        })?;
        let parent = archive.parent().unwrap_or_else(|| Path::new("."));
        Ok(parent.join(stem))
    }

    /// 解包归档，返回解包目录
    pub fn unpack(&self, archive: &Path) -> Result<PathBuf> {
        if is_symlink(archive) {
            return Err(ComicError::unpacking(archive, "it is a symbolic link"));
        }
        if !archive.exists() {
            return Err(ComicError::unpacking(archive, "it does not exist"));
        }
        if archive.is_dir() {
            return Err(ComicError::unpacking(archive, "it is a directory"));
        }

        let target = Self::target_for(archive)?;
        if target.exists() {
            return Err(ComicError::unpacking(
                archive,
                format!("{} already exists", target.display()),
            ));
        }

        if let Err(e) = self.codec.extract(archive, &target) {
            // 清理已部分创建的目录，原始归档保持不变
            if target.is_dir() {
                if let Err(cleanup) = remove_directory(&target) {
                    tracing::warn!(target = %target.display(), error = %cleanup, "cannot remove partial extraction");
                }
            }
            return Err(ComicError::unpacking(archive, e));
        }

        let backup = self.backup.store(archive)?;
        tracing::info!(
            codec = self.codec.name(),
            archive = %archive.display(),
            backup = %backup.display(),
            "archive extracted"
        );

        Ok(target)
    }
}
