//! # pdf2cbz 子命令 CLI 定义
//!
//! ## 依赖关系
//! - 被 `cli/mod.rs` 使用
//! - 参数传递给 `commands/pdf2cbz.rs`

use crate::raster::ImageFormat;

use clap::Args;
use std::path::PathBuf;

/// pdf2cbz 子命令参数
#[derive(Args, Debug)]
pub struct Pdf2cbzArgs {
    /// Directory containing the PDF files
    #[arg(default_value = ".")]
    pub dir: PathBuf,

    /// Image format of the rasterized pages
    #[arg(short, long, value_enum, default_value_t = ImageFormat::Jpeg)]
    pub format: ImageFormat,
}
