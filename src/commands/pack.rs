//! # pack 命令实现
//!
//! 将工作目录下的每个子目录打包为 `.cbz`，成功后删除源目录。
//!
//! ## 功能
//! - 预检：规范化后的目录名不得冲突
//! - 扩展名排除（`--all` 关闭）
//! - 可选垃圾过滤（`-g`）
//!
//! ## 依赖关系
//! - 使用 `cli/pack.rs` 定义的参数
//! - 使用 `batch/`, `packer/`, `naming/`

use super::{summarize, working_directory};
use crate::batch::{BatchConfig, BatchRunner, Entry, ExecutionResult};
use crate::cli::pack::PackArgs;
use crate::codec::{self, ArchiveCodec};
use crate::config::RunConfig;
use crate::error::Result;
use crate::naming::CollisionValidator;
use crate::packer::exclusion::ALWAYS_EXCLUDED_DIRS;
use crate::packer::{ArchivePacker, PackOptions};
use crate::utils::output;

use std::path::Path;

/// 执行 pack 命令
pub fn execute(args: PackArgs, config: &RunConfig) -> Result<()> {
    output::print_header("Packing Comics");

    let codec = codec::from_choice(config.codec)?;
    let cwd = working_directory(&args.dir)?;
    let options = PackOptions::new(args.all, args.garbage_collector);

    output::print_info(&format!("Working directory: {}", cwd.display()));
    if !options.exclusions.is_empty() {
        output::print_info(&format!(
            "Excluding extensions: {}",
            options.exclusions.extensions().join(", ")
        ));
    }
    if args.garbage_collector {
        output::print_info("Garbage collection enabled");
    }

    let result = pack_directories(&cwd, codec.as_ref(), options, config.batch_config("Packing"))?;
    summarize(&result, "Packed", ("comic", "comics"));
    Ok(())
}

/// 是否为待打包目录
fn is_comic_directory(entry: &Entry) -> bool {
    entry.is_dir() && !ALWAYS_EXCLUDED_DIRS.contains(&entry.name().as_str())
}

/// 打包 `cwd` 下的每个子目录
pub fn pack_directories(
    cwd: &Path,
    codec: &dyn ArchiveCodec,
    options: PackOptions,
    batch: BatchConfig,
) -> Result<ExecutionResult> {
    let mut validator = CollisionValidator::for_directories();
    let packer = ArchivePacker::new(codec, options);

    BatchRunner::new(batch).run(
        cwd,
        is_comic_directory,
        |entry: &Entry| packer.pack(entry.path()).map(|_| ()),
        Some(&mut validator),
    )
}
