//! # 进度条工具
//!
//! 封装 `indicatif` 提供统一的进度条样式。
//!
//! ## 依赖关系
//! - 被 `batch/runner.rs` 使用
//! - 使用 `indicatif`、`console` crate

use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};

/// 创建标准进度条；`enabled` 为 false 时返回隐藏的进度条
pub fn create_progress_bar(len: u64, message: &str, enabled: bool) -> ProgressBar {
    if !enabled {
        return ProgressBar::hidden();
    }

    let pb = ProgressBar::with_draw_target(Some(len), ProgressDrawTarget::stderr());
    // 非 TERM 环境使用 ASCII 样式
    let chars = if console::Term::stderr().features().colors_supported() {
        "█▓░"
    } else {
        "#>-"
    };
    if let Ok(style) = ProgressStyle::with_template(
        "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta}) {msg}",
    ) {
        pb.set_style(style.progress_chars(chars));
    }
    pb.set_message(message.to_string());
    pb
}

/// 终端是否适合绘制进度条
pub fn is_interactive() -> bool {
    console::Term::stderr().is_term()
}
