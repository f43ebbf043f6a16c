//! # 打包计划
//!
//! 在写入任何字节之前计算 (根目录, 包含文件, 排除文件) 三元组。
//! 计划是一个值，计算完成后不再修改。
//!
//! ## 依赖关系
//! - 被 `packer/packer.rs` 调用
//! - 使用 `packer/garbage.rs`、`packer/nesting.rs`、`naming/`
//! - 使用 `walkdir` 收集最终文件列表

use super::exclusion::{in_always_excluded_dir, ExclusionSet};
use super::garbage::GarbageClassifier;
use super::nesting::NestingResolver;
use crate::error::{ComicError, Result};
use crate::naming::normalizer::normalize_with_extension;

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// 默认输出归档扩展名
pub const DEFAULT_ARCHIVE_EXTENSION: &str = "cbz";

/// 打包选项
#[derive(Debug, Clone)]
pub struct PackOptions {
    /// 扩展名排除集合
    pub exclusions: ExclusionSet,
    /// 是否开启垃圾回收（严格可选，从不自动推断）
    pub garbage_collection: bool,
    /// 输出归档扩展名
    pub archive_extension: String,
}

impl Default for PackOptions {
    fn default() -> Self {
        Self {
            exclusions: ExclusionSet::defaults(),
            garbage_collection: false,
            archive_extension: DEFAULT_ARCHIVE_EXTENSION.to_string(),
        }
    }
}

impl PackOptions {
    /// `--all` 时不排除任何扩展名
    pub fn new(include_all: bool, garbage_collection: bool) -> Self {
        Self {
            exclusions: if include_all {
                ExclusionSet::none()
            } else {
                ExclusionSet::defaults()
            },
            garbage_collection,
            ..Self::default()
        }
    }
}

/// 打包计划
#[derive(Debug, Clone)]
pub struct PackingPlan {
    /// 声明的源目录（成功后删除）
    pub source: PathBuf,
    /// 实际打包根目录（可能是平凡嵌套的子目录）
    pub root: PathBuf,
    /// 写入归档的文件（绝对路径，按路径排序）
    pub included: Vec<PathBuf>,
    /// 被排除的文件
    pub excluded: Vec<PathBuf>,
    /// 输出归档路径
    pub output: PathBuf,
}

impl PackingPlan {
    /// 计算打包计划
    pub fn compute(
        source: &Path,
        options: &PackOptions,
        classifier: &GarbageClassifier,
    ) -> Result<Self> {
        let dir_name = source
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .ok_or_else(|| ComicError::InvalidSource {
                path: source.display().to_string(),
                reason: "directory has no name".to_string(),
            })?;
        let parent = source.parent().unwrap_or_else(|| Path::new("."));
        let output = parent.join(normalize_with_extension(&dir_name, &options.archive_extension));

        let garbage = if options.garbage_collection {
            classifier.classify(source, &options.exclusions)?
        } else {
            BTreeSet::new()
        };

        let root = NestingResolver::new(&options.exclusions, &garbage).resolve(source)?;

        let mut included = Vec::new();
        let mut excluded = Vec::new();
        for item in WalkDir::new(&root).sort_by_file_name() {
            let item = item.map_err(|e| ComicError::read(&root, e.into()))?;
            if !item.file_type().is_file() {
                continue;
            }
            let path = item.into_path();
            if options.exclusions.is_excluded(&path)
                || garbage.contains(&path)
                || in_always_excluded_dir(&root, &path)
            {
                excluded.push(path);
            } else {
                included.push(path);
            }
        }

        tracing::info!(
            source = %source.display(),
            root = %root.display(),
            included = included.len(),
            excluded = excluded.len(),
            "packing plan"
        );

        Ok(Self {
            source: source.to_path_buf(),
            root,
            included,
            excluded,
            output,
        })
    }

    /// 归档内条目名（相对根目录，`/` 分隔）
    pub fn entry_name(&self, path: &Path) -> String {
        relative_entry_name(&self.root, path)
    }
}

/// 将路径转换为相对 `root` 的归档条目名
pub fn relative_entry_name(root: &Path, path: &Path) -> String {
    let relative = path.strip_prefix(root).unwrap_or(path);
    relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy().into_owned())
        .collect::<Vec<_>>()
        .join("/")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn touch(path: &Path) {
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, b"data").unwrap();
    }

    fn names(plan: &PackingPlan) -> Vec<String> {
        plan.included.iter().map(|p| plan.entry_name(p)).collect()
    }

    #[test]
    fn test_plan_with_default_exclusions() {
        let tmp = tempfile::tempdir().unwrap();
        let source = tmp.path().join("some comic 3");
        for name in ["foo.txt", "up.jpg", "down.jpg", "thumbs.db", "something.nfo", "x.xml"] {
            touch(&source.join(name));
        }
        touch(&source.join("__MACOSX/._up.jpg"));

        let plan =
            PackingPlan::compute(&source, &PackOptions::default(), &GarbageClassifier::default())
                .unwrap();

        assert_eq!(plan.root, source);
        assert_eq!(plan.output, tmp.path().join("Some Comic - 3.cbz"));
        assert_eq!(names(&plan), vec!["down.jpg", "up.jpg"]);
        assert_eq!(plan.excluded.len(), 5);
    }

    #[test]
    fn test_garbage_only_when_requested() {
        let tmp = tempfile::tempdir().unwrap();
        let source = tmp.path().join("comic");
        for name in ["up.jpg", "z-something.jpg", "the collaborators of.jpg"] {
            touch(&source.join(name));
        }

        let off = PackingPlan::compute(
            &source,
            &PackOptions::new(false, false),
            &GarbageClassifier::default(),
        )
        .unwrap();
        assert_eq!(off.included.len(), 3);

        let on = PackingPlan::compute(
            &source,
            &PackOptions::new(false, true),
            &GarbageClassifier::default(),
        )
        .unwrap();
        assert_eq!(names(&on), vec!["up.jpg"]);
    }

    #[test]
    fn test_nested_sub_directories_keep_their_paths() {
        let tmp = tempfile::tempdir().unwrap();
        let source = tmp.path().join("comic");
        touch(&source.join("part 1/01.jpg"));
        touch(&source.join("part 2/01.jpg"));

        let plan =
            PackingPlan::compute(&source, &PackOptions::default(), &GarbageClassifier::default())
                .unwrap();
        assert_eq!(names(&plan), vec!["part 1/01.jpg", "part 2/01.jpg"]);
    }

    #[test]
    fn test_everything_excluded_yields_empty_plan() {
        let tmp = tempfile::tempdir().unwrap();
        let source = tmp.path().join("comic");
        touch(&source.join("foo.txt"));

        let plan =
            PackingPlan::compute(&source, &PackOptions::default(), &GarbageClassifier::default())
                .unwrap();
        assert!(plan.included.is_empty());
        assert_eq!(plan.root, source);
    }
}
