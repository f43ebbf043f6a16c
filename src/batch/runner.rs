//! # 批量执行器
//!
//! 对工作目录中每个被选中的条目并行执行一次操作。
//!
//! ## 功能
//! - 可选预检（校验器在任何操作开始前运行）
//! - 基于 rayon 的固定大小线程池
//! - 单条目错误在工作线程边界被捕获，不影响其他条目
//! - 进度条显示与失败汇总报告
//!
//! ## 依赖关系
//! - 被 `commands/` 各子命令调用
//! - 使用 `batch/collector.rs` 收集条目
//! - 使用 `utils/progress.rs` 创建进度条
//! - 使用 `rayon` 进行并行处理

use super::collector::{Entry, EntryCollector, EntrySelector};
use crate::error::{ComicError, Result};
use crate::utils::{output, progress};

use rayon::prelude::*;
use std::collections::BTreeMap;
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};

/// 默认并行作业数
pub const DEFAULT_JOBS: usize = 8;

/// 单条目操作
pub trait EntryOperation: Sync {
    fn process(&self, entry: &Entry) -> Result<()>;
}

impl<F> EntryOperation for F
where
    F: Fn(&Entry) -> Result<()> + Sync,
{
    fn process(&self, entry: &Entry) -> Result<()> {
        self(entry)
    }
}

/// 预检校验器
///
/// `read_entry` 在并行开始前单线程调用；`validate` 失败则整个批次中止。
pub trait EntryValidator {
    fn read_entry(&mut self, entry: &Entry);
    fn validate(&self) -> Result<()>;
}

/// 批处理配置
#[derive(Debug, Clone)]
pub struct BatchConfig {
    /// 并行作业数
    pub jobs: usize,
    /// 是否显示进度条
    pub show_progress: bool,
    /// 进度条标题
    pub caption: String,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            jobs: DEFAULT_JOBS,
            show_progress: true,
            caption: "Processing".to_string(),
        }
    }
}

/// 批处理结果
#[derive(Debug, Default)]
pub struct ExecutionResult {
    /// 成功数量
    pub processed: usize,
    /// 失败详情（每个条目至多写入一次）
    pub failures: BTreeMap<Entry, ComicError>,
}

impl ExecutionResult {
    /// 合并单个条目的处理结果
    pub fn record(&mut self, entry: Entry, outcome: Result<()>) {
        match outcome {
            Ok(()) => self.processed += 1,
            Err(e) => {
                let previous = self.failures.insert(entry, e);
                debug_assert!(previous.is_none(), "entry recorded twice");
            }
        }
    }

    pub fn failed(&self) -> usize {
        self.failures.len()
    }

    /// 总处理数量
    pub fn total(&self) -> usize {
        self.processed + self.failed()
    }

    /// 失败汇总：每行 `<名称> - <错误信息>`
    pub fn failure_report(&self) -> Option<String> {
        if self.failures.is_empty() {
            return None;
        }
        let lines = self
            .failures
            .iter()
            .map(|(entry, err)| format!("{} - {}", entry.name(), err))
            .collect::<Vec<_>>()
            .join("\n");
        Some(format!("Could not process the following entries:\n{}", lines))
    }
}

/// 批量执行器
pub struct BatchRunner {
    config: BatchConfig,
}

impl BatchRunner {
    /// 创建新的批量执行器
    pub fn new(config: BatchConfig) -> Self {
        let jobs = if config.jobs == 0 {
            num_cpus::get()
        } else {
            config.jobs
        };
        Self {
            config: BatchConfig { jobs, ..config },
        }
    }

    pub fn jobs(&self) -> usize {
        self.config.jobs
    }

    /// 对工作目录的每个被选中条目执行操作
    ///
    /// 返回 `Err` 仅限两种情况：工作目录无效、校验器拒绝。
    /// 单条目失败记录在 `ExecutionResult::failures` 中。
    pub fn run<S, O>(
        &self,
        cwd: &Path,
        selector: S,
        operation: O,
        validator: Option<&mut dyn EntryValidator>,
    ) -> Result<ExecutionResult>
    where
        S: EntrySelector,
        O: EntryOperation,
    {
        let entries = EntryCollector::new(cwd).collect(&selector)?;
        tracing::debug!(cwd = %cwd.display(), count = entries.len(), "collected entries");

        if let Some(validator) = validator {
            for entry in &entries {
                validator.read_entry(entry);
            }
            validator.validate()?;
        }

        let result = self.execute(entries, &operation)?;

        if let Some(report) = result.failure_report() {
            output::print_warning(&report);
        }

        Ok(result)
    }

    /// 并行处理条目列表
    fn execute<O: EntryOperation>(
        &self,
        entries: Vec<Entry>,
        operation: &O,
    ) -> Result<ExecutionResult> {
        if entries.is_empty() {
            return Ok(ExecutionResult::default());
        }

        let total = entries.len();
        let pb = progress::create_progress_bar(
            total as u64,
            &self.config.caption,
            self.config.show_progress,
        );
        let counter = AtomicUsize::new(0);
        tracing::debug!(jobs = self.jobs(), total, "starting batch");

        // 配置 rayon 线程池
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(self.jobs())
            .thread_name(|i| format!("comicutils-worker-{}", i))
            .build()
            .map_err(|e| ComicError::ThreadPool(e.to_string()))?;

        let outcomes: Vec<(Entry, Result<()>)> = pool.install(|| {
            entries
                .into_par_iter()
                .map(|entry| {
                    let outcome = operation.process(&entry);
                    match &outcome {
                        Ok(()) => tracing::debug!(
                            "Processed entry {} [{}/{}]",
                            entry.path().display(),
                            counter.fetch_add(1, Ordering::Relaxed) + 1,
                            total
                        ),
                        Err(e) => tracing::debug!(entry = %entry.name(), error = %e, "entry failed"),
                    }
                    pb.inc(1);
                    (entry, outcome)
                })
                .collect()
        });

        pb.finish_and_clear();

        // 汇总结果
        let mut result = ExecutionResult::default();
        for (entry, outcome) in outcomes {
            result.record(entry, outcome);
        }

        Ok(result)
    }
}
