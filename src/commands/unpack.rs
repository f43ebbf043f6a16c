//! # unpack 命令实现
//!
//! 将工作目录下的每个归档解包到同名目录，原始归档移入备份目录。
//!
//! ## 依赖关系
//! - 使用 `cli/unpack.rs` 定义的参数
//! - 使用 `batch/`, `packer/unpacker.rs`, `backup/`

use super::{summarize, working_directory};
use crate::backup::BackupStore;
use crate::batch::{BatchConfig, BatchRunner, Entry, ExecutionResult};
use crate::cli::unpack::UnpackArgs;
use crate::codec::{self, ArchiveCodec};
use crate::config::RunConfig;
use crate::error::Result;
use crate::naming::CollisionValidator;
use crate::packer::Unpacker;
use crate::utils::output;

use std::path::Path;

/// 可解包的扩展名
pub const ARCHIVE_EXTENSIONS: &[&str] = &["cbz", "cbr", "cb7", "zip"];

/// 执行 unpack 命令
pub fn execute(args: UnpackArgs, config: &RunConfig) -> Result<()> {
    output::print_header("Unpacking Comics");

    codec::warn_if_extract_limited(config.codec);
    let codec = codec::from_choice(config.codec)?;
    let cwd = working_directory(&args.dir)?;
    let backup = config.backup_store()?;

    output::print_info(&format!("Working directory: {}", cwd.display()));
    output::print_info(&format!("Originals are kept in {}", backup.base().display()));

    let result = unpack_archives(&cwd, codec.as_ref(), &backup, config.batch_config("Unpacking"))?;
    summarize(&result, "Unpacked", ("archive", "archives"));
    Ok(())
}

/// 解包 `cwd` 下的每个归档
pub fn unpack_archives(
    cwd: &Path,
    codec: &dyn ArchiveCodec,
    backup: &dyn BackupStore,
    batch: BatchConfig,
) -> Result<ExecutionResult> {
    let unpacker = Unpacker::new(codec, backup);
    let mut validator = CollisionValidator::for_unpacked_directories();

    BatchRunner::new(batch).run(
        cwd,
        |entry: &Entry| !entry.is_dir() && entry.has_extension(ARCHIVE_EXTENSIONS),
        |entry: &Entry| unpacker.unpack(entry.path()).map(|_| ()),
        Some(&mut validator),
    )
}
