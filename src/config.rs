//! # 运行配置
//!
//! 由全局命令行选项一次性构建，并显式传递给每个子命令（无全局可变状态）。
//!
//! ## 依赖关系
//! - 被 `main.rs`、`commands/` 使用
//! - 使用 `cli::GlobalArgs`、`utils/progress.rs`

use crate::backup::RetentionBackupStore;
use crate::batch::BatchConfig;
use crate::cli::{CodecChoice, GlobalArgs};
use crate::error::Result;
use crate::utils::progress;

use std::path::PathBuf;

/// 运行配置
#[derive(Debug, Clone)]
pub struct RunConfig {
    /// 并行作业数（0 = CPU 数）
    pub jobs: usize,
    /// 是否显示进度条
    pub show_progress: bool,
    /// 归档引擎
    pub codec: CodecChoice,
    /// 备份目录（`None` 时使用默认位置）
    pub backup_dir: Option<PathBuf>,
}

impl RunConfig {
    /// 从全局选项构建；非终端或开启详细日志时关闭进度条
    pub fn from_args(args: &GlobalArgs) -> Self {
        Self {
            jobs: args.jobs,
            show_progress: !args.no_progress && args.verbose == 0 && progress::is_interactive(),
            codec: args.codec,
            backup_dir: args.backup_dir.clone(),
        }
    }

    /// 给定进度条标题的批处理配置
    pub fn batch_config(&self, caption: &str) -> BatchConfig {
        BatchConfig {
            jobs: self.jobs,
            show_progress: self.show_progress,
            caption: caption.to_string(),
        }
    }

    /// 打开备份存储（会清理过期备份）
    pub fn backup_store(&self) -> Result<RetentionBackupStore> {
        let base = match &self.backup_dir {
            Some(dir) => dir.clone(),
            None => RetentionBackupStore::default_location()?,
        };
        RetentionBackupStore::new(base)
    }
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            jobs: crate::batch::runner::DEFAULT_JOBS,
            show_progress: false,
            codec: CodecChoice::Auto,
            backup_dir: None,
        }
    }
}
