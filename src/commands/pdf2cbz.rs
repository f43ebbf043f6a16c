//! # pdf2cbz 命令实现
//!
//! 每个 PDF：栅格化为图片目录 -> 原始 PDF 移入备份目录 -> 打包为 `.cbz`。
//!
//! ## 依赖关系
//! - 使用 `cli/pdf2cbz.rs` 定义的参数
//! - 使用 `batch/`, `raster/`, `packer/`, `backup/`

use super::{summarize, working_directory};
use crate::backup::BackupStore;
use crate::batch::{BatchConfig, BatchRunner, Entry, ExecutionResult};
use crate::cli::pdf2cbz::Pdf2cbzArgs;
use crate::codec::{self, ArchiveCodec};
use crate::config::RunConfig;
use crate::error::{ComicError, Result};
use crate::naming::CollisionValidator;
use crate::packer::{ArchivePacker, PackOptions};
use crate::raster::{PopplerRasterizer, Rasterizer};
use crate::utils::output;

use std::path::Path;

/// 执行 pdf2cbz 命令
pub fn execute(args: Pdf2cbzArgs, config: &RunConfig) -> Result<()> {
    output::print_header("Converting PDF Files");

    if !PopplerRasterizer::is_available() {
        return Err(ComicError::CommandNotFound {
            command: "pdftoppm".to_string(),
        });
    }

    let codec = codec::from_choice(config.codec)?;
    let cwd = working_directory(&args.dir)?;
    let backup = config.backup_store()?;
    let rasterizer = PopplerRasterizer::new(args.format);

    output::print_info(&format!("Working directory: {}", cwd.display()));
    output::print_info(&format!("Page format: {}", args.format));

    let result = convert_pdfs(
        &cwd,
        &rasterizer,
        codec.as_ref(),
        &backup,
        config.batch_config("Converting"),
    )?;
    summarize(&result, "Converted", ("PDF file", "PDF files"));
    Ok(())
}

/// 转换 `cwd` 下的每个 PDF
pub fn convert_pdfs(
    cwd: &Path,
    rasterizer: &dyn Rasterizer,
    codec: &dyn ArchiveCodec,
    backup: &dyn BackupStore,
    batch: BatchConfig,
) -> Result<ExecutionResult> {
    // 栅格化结果只含页面图片，不做排除
    let options = PackOptions::new(true, false);
    let mut validator = CollisionValidator::for_target_extension(&options.archive_extension);
    let packer = ArchivePacker::new(codec, options);

    BatchRunner::new(batch).run(
        cwd,
        |entry: &Entry| !entry.is_dir() && entry.has_extension(&["pdf"]),
        |entry: &Entry| {
            let directory = rasterizer.rasterize(entry.path())?;
            backup.store(entry.path())?;
            packer.pack(&directory).map(|_| ())
        },
        Some(&mut validator),
    )
}
