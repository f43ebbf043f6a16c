//! # 归档打包器
//!
//! 计算打包计划 -> 调用编解码器写入归档 -> 成功后删除源目录。
//! 任何前置条件或 I/O 失败都以打包错误返回，源目录保持不变。
//!
//! ## 依赖关系
//! - 使用 `packer/plan.rs` 计算计划
//! - 使用 `codec::ArchiveCodec` 写入归档
//! - 使用 `utils/fs.rs` 删除源目录

use super::garbage::GarbageClassifier;
use super::plan::{PackOptions, PackingPlan};
use crate::codec::ArchiveCodec;
use crate::error::{ComicError, Result};
use crate::utils::fs::{is_symlink, remove_directory};

use std::fs;
use std::path::{Path, PathBuf};

/// 归档打包器
pub struct ArchivePacker<'a> {
    codec: &'a dyn ArchiveCodec,
    options: PackOptions,
    classifier: GarbageClassifier,
}

impl<'a> ArchivePacker<'a> {
    pub fn new(codec: &'a dyn ArchiveCodec, options: PackOptions) -> Self {
        Self {
            codec,
            options,
            classifier: GarbageClassifier::default(),
        }
    }

    /// 源目录前置条件：存在、不是符号链接、是目录
    pub fn check_source(source: &Path) -> Result<()> {
        let reason = if is_symlink(source) {
            Some("it is a symbolic link")
        } else if !source.exists() {
            Some("it does not exist")
        } else if !source.is_dir() {
            Some("it is not a directory")
        } else {
            None
        };

        match reason {
            Some(reason) => Err(ComicError::InvalidSource {
                path: source.display().to_string(),
                reason: reason.to_string(),
            }),
            None => Ok(()),
        }
    }

    /// 只计算计划，不写入任何内容
    pub fn plan(&self, source: &Path) -> Result<PackingPlan> {
        Self::check_source(source)?;
        PackingPlan::compute(source, &self.options, &self.classifier)
    }

    /// 打包目录，返回生成的归档路径
    pub fn pack(&self, source: &Path) -> Result<PathBuf> {
        self.pack_directory(source).map_err(|e| match e {
            ComicError::Packing { .. } => e,
            other => ComicError::packing(source, other),
        })
    }

    fn pack_directory(&self, source: &Path) -> Result<PathBuf> {
        let plan = self.plan(source)?;

        if plan.output.exists() {
            return Err(ComicError::packing(
                source,
                format!("{} already exists", plan.output.display()),
            ));
        }

        for path in &plan.included {
            tracing::trace!(entry = %plan.entry_name(path), "including");
        }
        for path in &plan.excluded {
            tracing::debug!(entry = %plan.entry_name(path), "excluding");
        }

        let patterns = self.options.exclusions.to_patterns();
        if let Err(e) = self
            .codec
            .create(&plan.root, &plan.included, &patterns, &plan.output)
        {
            // 不留下半成品归档
            if plan.output.exists() {
                if let Err(cleanup) = fs::remove_file(&plan.output) {
                    tracing::warn!(output = %plan.output.display(), error = %cleanup, "cannot remove partial archive");
                }
            }
            return Err(e);
        }

        tracing::info!(
            codec = self.codec.name(),
            output = %plan.output.display(),
            files = plan.included.len(),
            "archive created"
        );

        // 归档生成成功，删除源目录
        remove_directory(&plan.source)?;
        Ok(plan.output)
    }
}
