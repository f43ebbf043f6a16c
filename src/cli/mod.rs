//! # CLI 模块
//!
//! 使用 `clap` 定义命令行参数和子命令。
//!
//! ## 命令结构
//! - `pack`: 将子目录打包为 .cbz
//! - `unpack`: 解包 .cbz/.cbr/.cb7/.zip
//! - `repack`: 解包后重新打包 .cbz/.cbr
//! - `pdf2cbz`: PDF 栅格化后打包
//!
//! ## 依赖关系
//! - 被 `main.rs` 使用
//! - 子模块: pack, unpack, repack, pdf2cbz

pub mod pack;
pub mod pdf2cbz;
pub mod repack;
pub mod unpack;

use crate::batch::runner::DEFAULT_JOBS;

use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// comicutils - 漫画归档批处理工具
#[derive(Parser, Debug)]
#[command(name = "comicutils")]
#[command(author = "Changjiang Wu")]
#[command(version)]
#[command(about = "Batch pack, unpack and convert comic archives", long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Commands,
}

/// 所有子命令共享的选项
#[derive(Args, Debug, Clone)]
pub struct GlobalArgs {
    /// Number of parallel jobs (0 = number of CPUs)
    #[arg(short, long, global = true, env = "COMICUTILS_JOBS", default_value_t = DEFAULT_JOBS)]
    pub jobs: usize,

    /// Disable the progress bar
    #[arg(long, global = true, env = "COMICUTILS_NO_PROGRESS", default_value_t = false)]
    pub no_progress: bool,

    /// Archive engine used to pack and unpack
    #[arg(long, global = true, value_enum, default_value_t = CodecChoice::Auto)]
    pub codec: CodecChoice,

    /// Directory where originals are kept after unpacking (default: $HOME/.comicutils)
    #[arg(long, global = true, env = "COMICUTILS_BACKUP_DIR")]
    pub backup_dir: Option<PathBuf>,

    /// Increase log verbosity (-v = debug, -vv = trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,
}

/// 归档引擎选择
#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq)]
pub enum CodecChoice {
    /// Native zip for zip-based archives, 7z for everything else
    Auto,
    /// Built-in zip support only
    Native,
    /// External 7z command for everything
    SevenZip,
}

impl std::fmt::Display for CodecChoice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CodecChoice::Auto => write!(f, "auto"),
            CodecChoice::Native => write!(f, "native"),
            CodecChoice::SevenZip => write!(f, "seven-zip"),
        }
    }
}

/// 可用的子命令
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Pack every sub-directory into a .cbz archive
    Pack(pack::PackArgs),

    /// Unpack every .cbz/.cbr/.cb7/.zip archive into a directory
    Unpack(unpack::UnpackArgs),

    /// Unpack and pack again every .cbz/.cbr archive
    Repack(repack::RepackArgs),

    /// Convert every .pdf file into a .cbz archive
    Pdf2cbz(pdf2cbz::Pdf2cbzArgs),
}
