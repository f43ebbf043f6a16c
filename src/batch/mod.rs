//! # 批量处理模块
//!
//! 驱动所有目录级操作（pack / unpack / repack / pdf2cbz）。
//!
//! ## 功能
//! - 枚举工作目录的直接子项并按选择器过滤
//! - 可选预检校验（名称冲突等）
//! - 固定大小线程池并行处理，单条目错误隔离
//! - 进度反馈与失败汇总
//!
//! ## 依赖关系
//! - 被各命令模块使用
//! - 使用 `rayon` 进行并行处理
//! - 使用 `indicatif` 显示进度

pub mod collector;
pub mod runner;

pub use collector::Entry;
pub use runner::{BatchConfig, BatchRunner, EntryValidator, ExecutionResult};
