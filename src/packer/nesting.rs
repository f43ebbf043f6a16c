//! # 嵌套目录解析
//!
//! 检测“平凡嵌套”：所有有效文件都位于同一个目录下时，以该目录为打包根目录。
//!
//! ## 规则
//! - 只看每个有效文件的直接父目录，而不是公共路径前缀
//! - 恰好一个父目录 -> 该目录为根；零个或多个 -> 保持原目录
//! - 始终排除的目录（如 `__MACOSX`）不参与判断
//!
//! ## 依赖关系
//! - 被 `packer/plan.rs` 调用

use super::exclusion::{in_always_excluded_dir, ExclusionSet};
use crate::error::{ComicError, Result};

use std::collections::{BTreeMap, BTreeSet, VecDeque};
use std::fs;
use std::path::{Path, PathBuf};

/// 嵌套目录解析器
pub struct NestingResolver<'a> {
    exclusions: &'a ExclusionSet,
    garbage: &'a BTreeSet<PathBuf>,
}

impl<'a> NestingResolver<'a> {
    pub fn new(exclusions: &'a ExclusionSet, garbage: &'a BTreeSet<PathBuf>) -> Self {
        Self {
            exclusions,
            garbage,
        }
    }

    /// 按直接父目录分组有效文件（广度优先）
    pub fn group_by_parent(&self, root: &Path) -> Result<BTreeMap<PathBuf, Vec<PathBuf>>> {
        let mut groups: BTreeMap<PathBuf, Vec<PathBuf>> = BTreeMap::new();
        let mut queue = VecDeque::from([root.to_path_buf()]);

        while let Some(dir) = queue.pop_front() {
            for item in fs::read_dir(&dir).map_err(|e| ComicError::read(&dir, e))? {
                let item = item.map_err(|e| ComicError::read(&dir, e))?;
                // 不跟随符号链接，与打包计划一致
                let file_type = item.file_type().map_err(|e| ComicError::read(&dir, e))?;
                let path = item.path();
                if file_type.is_dir() {
                    if !in_always_excluded_dir(root, &path) {
                        queue.push_back(path);
                    }
                } else if file_type.is_file()
                    && !self.exclusions.is_excluded(&path)
                    && !self.garbage.contains(&path)
                {
                    groups.entry(dir.clone()).or_default().push(path);
                }
            }
        }

        Ok(groups)
    }

    /// 解析有效的打包根目录
    pub fn resolve(&self, root: &Path) -> Result<PathBuf> {
        let groups = self.group_by_parent(root)?;
        if groups.len() == 1 {
            if let Some(parent) = groups.into_keys().next() {
                if parent != root {
                    tracing::debug!(root = %root.display(), effective = %parent.display(), "trivial nesting");
                }
                return Ok(parent);
            }
        }
        Ok(root.to_path_buf())
    }
}
