//! # unpack 子命令 CLI 定义
//!
//! ## 依赖关系
//! - 被 `cli/mod.rs` 使用
//! - 参数传递给 `commands/unpack.rs`

use clap::Args;
use std::path::PathBuf;

/// unpack 子命令参数
#[derive(Args, Debug)]
pub struct UnpackArgs {
    /// Directory containing the archives
    #[arg(default_value = ".")]
    pub dir: PathBuf,
}
