//! # repack 命令实现
//!
//! 将每个 `.cbz`/`.cbr` 解包后重新打包为规范命名的 `.cbz`。
//!
//! ## 依赖关系
//! - 使用 `cli/repack.rs` 定义的参数
//! - 使用 `batch/`, `packer/`, `backup/`

use super::{summarize, working_directory};
use crate::backup::BackupStore;
use crate::batch::{BatchConfig, BatchRunner, Entry, ExecutionResult};
use crate::cli::repack::RepackArgs;
use crate::codec::{self, ArchiveCodec};
use crate::config::RunConfig;
use crate::error::Result;
use crate::naming::CollisionValidator;
use crate::packer::{ArchivePacker, PackOptions, Unpacker};
use crate::utils::output;

use std::path::Path;

/// 可重新打包的扩展名
const REPACK_EXTENSIONS: &[&str] = &["cbz", "cbr"];

/// 执行 repack 命令
pub fn execute(args: RepackArgs, config: &RunConfig) -> Result<()> {
    output::print_header("Repacking Comics");

    codec::warn_if_extract_limited(config.codec);
    let codec = codec::from_choice(config.codec)?;
    let cwd = working_directory(&args.dir)?;
    let backup = config.backup_store()?;
    let options = PackOptions::new(args.all, args.garbage_collector);

    output::print_info(&format!("Working directory: {}", cwd.display()));
    if !options.exclusions.is_empty() {
        output::print_info(&format!(
            "Excluding extensions: {}",
            options.exclusions.extensions().join(", ")
        ));
    }

    let result = repack_archives(
        &cwd,
        codec.as_ref(),
        &backup,
        options,
        config.batch_config("Repacking"),
    )?;
    summarize(&result, "Repacked", ("archive", "archives"));
    Ok(())
}

/// 重新打包 `cwd` 下的每个 `.cbz`/`.cbr`
pub fn repack_archives(
    cwd: &Path,
    codec: &dyn ArchiveCodec,
    backup: &dyn BackupStore,
    options: PackOptions,
    batch: BatchConfig,
) -> Result<ExecutionResult> {
    let mut validator = CollisionValidator::for_target_extension(&options.archive_extension);
    let unpacker = Unpacker::new(codec, backup);
    let packer = ArchivePacker::new(codec, options);

    BatchRunner::new(batch).run(
        cwd,
        |entry: &Entry| !entry.is_dir() && entry.has_extension(REPACK_EXTENSIONS),
        |entry: &Entry| {
            let directory = unpacker.unpack(entry.path())?;
            packer.pack(&directory).map(|_| ())
        },
        Some(&mut validator),
    )
}
