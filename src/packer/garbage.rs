//! # 垃圾文件识别
//!
//! 识别推广页、水印页等低价值文件（仅在开启垃圾回收模式时使用）。
//!
//! ## 规则
//! - 对文件名（含扩展名）做大小写不敏感的完整匹配
//! - 已按扩展名排除的文件不再参与判断
//!
//! ## 依赖关系
//! - 被 `packer/plan.rs` 调用
//! - 使用 `regex` crate

use super::exclusion::ExclusionSet;
use crate::error::{ComicError, Result};

use regex::Regex;
use std::collections::{BTreeSet, VecDeque};
use std::fs;
use std::path::{Path, PathBuf};

/// 默认垃圾文件名模式
pub const DEFAULT_GARBAGE_PATTERNS: &[&str] = &[
    "z.+",
    ".+nerd.+",
    ".+colab.+",
    ".+collab.+",
    ".+flyer.+",
];

/// 垃圾文件识别器
#[derive(Debug, Clone)]
pub struct GarbageClassifier {
    patterns: Vec<Regex>,
}

impl Default for GarbageClassifier {
    fn default() -> Self {
        Self::new(DEFAULT_GARBAGE_PATTERNS).expect("default garbage patterns are valid")
    }
}

impl GarbageClassifier {
    /// 编译模式（自动加上大小写不敏感与首尾锚定）
    pub fn new(patterns: &[&str]) -> Result<Self> {
        let patterns = patterns
            .iter()
            .map(|p| {
                Regex::new(&format!("(?i)^(?:{})$", p)).map_err(|e| {
                    ComicError::InvalidArgument(format!("Invalid garbage pattern '{}': {}", p, e))
                })
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { patterns })
    }

    /// 单个文件名是否为垃圾
    pub fn is_garbage_name(&self, file_name: &str) -> bool {
        self.patterns.iter().any(|p| p.is_match(file_name))
    }

    /// 广度优先遍历整个子树，返回所有垃圾文件
    pub fn classify(&self, root: &Path, exclusions: &ExclusionSet) -> Result<BTreeSet<PathBuf>> {
        let mut garbage = BTreeSet::new();
        let mut queue = VecDeque::from([root.to_path_buf()]);

        while let Some(dir) = queue.pop_front() {
            for item in fs::read_dir(&dir).map_err(|e| ComicError::read(&dir, e))? {
                let item = item.map_err(|e| ComicError::read(&dir, e))?;
                let file_type = item.file_type().map_err(|e| ComicError::read(&dir, e))?;
                let path = item.path();
                if file_type.is_dir() {
                    queue.push_back(path);
                } else if file_type.is_file() && !exclusions.is_excluded(&path) {
                    let name = path
                        .file_name()
                        .map(|n| n.to_string_lossy().into_owned())
                        .unwrap_or_default();
                    if self.is_garbage_name(&name) {
                        tracing::debug!(file = %path.display(), "garbage file");
                        garbage.insert(path);
                    }
                }
            }
        }

        Ok(garbage)
    }
}
