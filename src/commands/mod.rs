//! # 命令执行模块
//!
//! 实现各子命令的业务逻辑：把选择器、单条目操作与预检校验器交给批量执行器。
//!
//! ## 依赖关系
//! - 被 `main.rs` 调用
//! - 使用 `batch/`, `packer/`, `codec/`, `raster/`, `naming/`, `utils/`
//! - 子模块: pack, unpack, repack, pdf2cbz

pub mod pack;
pub mod pdf2cbz;
pub mod repack;
pub mod unpack;

use crate::batch::ExecutionResult;
use crate::cli::Commands;
use crate::config::RunConfig;
use crate::error::{ComicError, Result};
use crate::utils::output;

use std::path::{Path, PathBuf};

/// 执行命令
pub fn run(cmd: Commands, config: &RunConfig) -> Result<()> {
    match cmd {
        Commands::Pack(args) => pack::execute(args, config),
        Commands::Unpack(args) => unpack::execute(args, config),
        Commands::Repack(args) => repack::execute(args, config),
        Commands::Pdf2cbz(args) => pdf2cbz::execute(args, config),
    }
}

/// 将工作目录转换为绝对路径
fn working_directory(dir: &Path) -> Result<PathBuf> {
    if !dir.exists() {
        return Err(ComicError::DirectoryNotFound {
            path: dir.display().to_string(),
        });
    }
    if !dir.is_dir() {
        return Err(ComicError::NotADirectory {
            path: dir.display().to_string(),
        });
    }
    dir.canonicalize().map_err(|e| ComicError::read(dir, e))
}

/// 名词单复数：`(单数, 复数)`
type Noun = (&'static str, &'static str);

fn counted(count: usize, noun: Noun) -> String {
    format!("{} {}", count, if count == 1 { noun.0 } else { noun.1 })
}

/// 汇总行，例如 `Packed 1 of 2 comics`
fn summary_line(result: &ExecutionResult, verb: &str, noun: Noun) -> String {
    if result.total() == 0 {
        format!("No {} found", noun.1)
    } else if result.failed() == 0 {
        format!("{} {}", verb, counted(result.processed, noun))
    } else {
        format!(
            "{} {} of {}",
            verb,
            result.processed,
            counted(result.total(), noun)
        )
    }
}

/// 打印批处理汇总
///
/// 单条目失败已在失败报告中列出，不影响退出码。
fn summarize(result: &ExecutionResult, verb: &str, noun: Noun) {
    let line = summary_line(result, verb, noun);
    if result.total() > 0 && result.failed() == 0 {
        output::print_done(&line);
    } else {
        output::print_info(&line);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::batch::Entry;

    const COMICS: Noun = ("comic", "comics");

    fn result_with(processed: usize, failed: &[&str]) -> ExecutionResult {
        let mut result = ExecutionResult {
            processed,
            ..ExecutionResult::default()
        };
        for name in failed {
            result.record(
                Entry::new(Path::new("/library").join(name)),
                Err(ComicError::Other("boom".to_string())),
            );
        }
        result
    }

    #[test]
    fn test_summary_line_counts() {
        assert_eq!(summary_line(&result_with(0, &[]), "Packed", COMICS), "No comics found");
        assert_eq!(summary_line(&result_with(1, &[]), "Packed", COMICS), "Packed 1 comic");
        assert_eq!(summary_line(&result_with(3, &[]), "Packed", COMICS), "Packed 3 comics");
        assert_eq!(
            summary_line(&result_with(1, &["beta"]), "Packed", COMICS),
            "Packed 1 of 2 comics"
        );
        assert_eq!(
            summary_line(&result_with(0, &["beta"]), "Packed", COMICS),
            "Packed 0 of 1 comic"
        );
    }
}
