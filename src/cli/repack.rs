//! # repack 子命令 CLI 定义
//!
//! ## 依赖关系
//! - 被 `cli/mod.rs` 使用
//! - 参数传递给 `commands/repack.rs`

use clap::Args;
use std::path::PathBuf;

/// repack 子命令参数
#[derive(Args, Debug)]
pub struct RepackArgs {
    /// Directory containing the archives
    #[arg(default_value = ".")]
    pub dir: PathBuf,

    /// Keep every file (do not exclude .txt/.xml/.db/.nfo)
    #[arg(short, long, default_value_t = false)]
    pub all: bool,

    /// Drop credit pages and other garbage images
    #[arg(short, long, default_value_t = false)]
    pub garbage_collector: bool,
}
