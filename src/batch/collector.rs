//! # 条目收集器
//!
//! 列出工作目录的直接子项，并根据选择器决定本次批处理的条目列表。
//!
//! ## 功能
//! - 只遍历一层（不递归）
//! - 按文件名排序，保证条目列表稳定
//! - 选择器以 trait 形式传入（闭包自动实现）
//!
//! ## 依赖关系
//! - 被 `batch/runner.rs` 调用
//! - 使用 `walkdir` 遍历目录

use crate::error::{ComicError, Result};

use std::fmt;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// 条目类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum EntryKind {
    File,
    Directory,
}

/// 一次批处理中的单个条目（枚举后不可变）
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Entry {
    path: PathBuf,
    kind: EntryKind,
}

impl Entry {
    /// 根据路径创建条目（目录判断会跟随符号链接）
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let kind = if path.is_dir() {
            EntryKind::Directory
        } else {
            EntryKind::File
        };
        Self { path, kind }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn is_dir(&self) -> bool {
        self.kind == EntryKind::Directory
    }

    /// 显示名称（文件名部分）
    pub fn name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.path.display().to_string())
    }

    /// 小写扩展名（不含 `.`）
    pub fn extension(&self) -> Option<String> {
        self.path
            .extension()
            .map(|e| e.to_string_lossy().to_lowercase())
    }

    /// 检查扩展名是否属于给定列表（大小写不敏感）
    pub fn has_extension(&self, extensions: &[&str]) -> bool {
        self.extension()
            .map(|ext| extensions.iter().any(|e| e.eq_ignore_ascii_case(&ext)))
            .unwrap_or(false)
    }
}

impl fmt::Display for Entry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// 条目选择器
pub trait EntrySelector {
    fn select(&self, entry: &Entry) -> bool;
}

impl<F> EntrySelector for F
where
    F: Fn(&Entry) -> bool,
{
    fn select(&self, entry: &Entry) -> bool {
        self(entry)
    }
}

/// 条目收集器
pub struct EntryCollector {
    /// 工作目录
    cwd: PathBuf,
}

impl EntryCollector {
    /// 创建新的条目收集器
    pub fn new(cwd: impl Into<PathBuf>) -> Self {
        Self { cwd: cwd.into() }
    }

    /// 检查工作目录前置条件
    pub fn check(&self) -> Result<()> {
        if !self.cwd.exists() {
            return Err(ComicError::DirectoryNotFound {
                path: self.cwd.display().to_string(),
            });
        }
        if !self.cwd.is_dir() {
            return Err(ComicError::NotADirectory {
                path: self.cwd.display().to_string(),
            });
        }
        Ok(())
    }

    /// 收集所有被选中的直接子项
    pub fn collect<S: EntrySelector + ?Sized>(&self, selector: &S) -> Result<Vec<Entry>> {
        self.check()?;

        let mut entries = Vec::new();
        for item in WalkDir::new(&self.cwd)
            .min_depth(1)
            .max_depth(1)
            .sort_by_file_name()
        {
            let item = item.map_err(|e| {
                let path = e
                    .path()
                    .map(Path::to_path_buf)
                    .unwrap_or_else(|| self.cwd.clone());
                ComicError::read(&path, e.into())
            })?;
            let entry = Entry::new(item.into_path());
            if selector.select(&entry) {
                entries.push(entry);
            }
        }

        Ok(entries)
    }
}
