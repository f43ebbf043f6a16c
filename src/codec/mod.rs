//! # 归档编解码器
//!
//! 打包 / 解包的字节级实现，以 trait 形式提供给 `packer/`。
//!
//! ## 实现
//! - `NativeZipCodec`: 纯 Rust zip 读写（STORED 无压缩写入）
//! - `SevenZipCodec`: 调用外部 `7z` 命令（支持 cbr/cb7 等格式）
//! - `AutoCodec`: 按文件签名选择解包实现，打包始终使用原生 zip
//!
//! ## 依赖关系
//! - 被 `packer/`、`commands/` 使用
//! - 使用 `zip` crate 与外部 `7z` 命令

pub mod native;
pub mod sevenzip;

pub use native::NativeZipCodec;
pub use sevenzip::SevenZipCodec;

use crate::cli::CodecChoice;
use crate::error::{ComicError, Result};

use std::path::{Path, PathBuf};

/// 归档编解码器
///
/// 失败必须以 `Err` 返回（而不是仅记录日志），以便调用方保留源目录。
pub trait ArchiveCodec: Send + Sync {
    /// 编解码器名称（用于日志）
    fn name(&self) -> &'static str;

    /// 将 `archive` 解包到 `target`
    fn extract(&self, archive: &Path, target: &Path) -> Result<()>;

    /// 以 `root` 为根，将 `included` 写入 `output`，跳过匹配 `excluded` 的条目
    fn create(
        &self,
        root: &Path,
        included: &[PathBuf],
        excluded: &[glob::Pattern],
        output: &Path,
    ) -> Result<()>;
}

/// 自动选择：zip 签名用原生实现，其他格式交给 7z
#[derive(Debug, Default)]
pub struct AutoCodec {
    native: NativeZipCodec,
    seven_zip: SevenZipCodec,
}

impl ArchiveCodec for AutoCodec {
    fn name(&self) -> &'static str {
        "auto"
    }

    fn extract(&self, archive: &Path, target: &Path) -> Result<()> {
        if native::is_zip_file(archive) {
            self.native.extract(archive, target)
        } else {
            tracing::debug!(archive = %archive.display(), "not a zip archive; using 7z");
            self.seven_zip.extract(archive, target)
        }
    }

    fn create(
        &self,
        root: &Path,
        included: &[PathBuf],
        excluded: &[glob::Pattern],
        output: &Path,
    ) -> Result<()> {
        self.native.create(root, included, excluded, output)
    }
}

/// 解包前检查：`auto` 缺少 7z 时只能读取 zip 格式归档，返回是否受限
///
/// 打包总是原生写入，不需要调用。
pub fn warn_if_extract_limited(choice: CodecChoice) -> bool {
    let limited = choice == CodecChoice::Auto && !SevenZipCodec::is_available();
    if limited {
        tracing::warn!("7z not found in PATH; only zip-based archives can be unpacked");
    }
    limited
}

/// 根据命令行选择构建编解码器
///
/// 选择 `seven-zip` 时会先检查 `7z` 是否可用。
pub fn from_choice(choice: CodecChoice) -> Result<Box<dyn ArchiveCodec>> {
    match choice {
        CodecChoice::Auto => Ok(Box::new(AutoCodec::default())),
        CodecChoice::Native => Ok(Box::new(NativeZipCodec)),
        CodecChoice::SevenZip => {
            if SevenZipCodec::is_available() {
                Ok(Box::new(SevenZipCodec))
            } else {
                Err(ComicError::Other(
                    "Compression engine is not ready!".to_string(),
                ))
            }
        }
    }
}
