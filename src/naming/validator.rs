//! # 名称冲突校验器
//!
//! 在任何破坏性操作之前运行：若两个不同条目规范化后名称相同，整个批次失败，
//! 原始条目保持不变。
//!
//! ## 依赖关系
//! - 实现 `batch::EntryValidator`
//! - 使用 `naming/normalizer.rs`

use super::normalizer::{normalize_stem, normalize_with_extension};
use crate::batch::{Entry, EntryValidator};
use crate::error::{ComicError, Result};

use std::collections::{BTreeSet, HashMap};
use std::path::{Path, PathBuf};

/// 比较键
#[derive(Debug, Clone, PartialEq, Eq)]
enum CollisionKey {
    /// 规范化后的输出归档名（`stem.ext`）
    Archive(String),
    /// 规范化后的目录名（目录没有扩展名，整个名称参与规范化）
    Directory,
    /// 解包目录名（文件名去掉扩展名，不做规范化）
    Stem,
}

/// 名称冲突校验器
#[derive(Debug)]
pub struct CollisionValidator {
    paths: Vec<PathBuf>,
    key: CollisionKey,
}

impl CollisionValidator {
    /// 按输出归档名比较（适用于 repack / pdf2cbz）
    pub fn for_target_extension(extension: &str) -> Self {
        Self {
            paths: Vec::new(),
            key: CollisionKey::Archive(extension.to_string()),
        }
    }

    /// 按规范化目录名比较（适用于 pack）
    pub fn for_directories() -> Self {
        Self {
            paths: Vec::new(),
            key: CollisionKey::Directory,
        }
    }

    /// 按解包目录名比较（`a.cbz` 与 `a.cbr` 会解包到同一目录）
    pub fn for_unpacked_directories() -> Self {
        Self {
            paths: Vec::new(),
            key: CollisionKey::Stem,
        }
    }

    pub fn add_path(&mut self, path: impl Into<PathBuf>) {
        self.paths.push(path.into());
    }

    fn key(&self, path: &Path) -> String {
        let stem = || {
            path.file_stem()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_default()
        };
        let name = || {
            path.file_name()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_default()
        };
        match &self.key {
            CollisionKey::Archive(ext) => normalize_with_extension(&stem(), ext),
            CollisionKey::Directory => normalize_stem(&name()),
            CollisionKey::Stem => stem(),
        }
    }

    /// 返回所有重复的规范化名称（去重、排序）
    pub fn collisions(&self) -> Vec<String> {
        let mut frequency: HashMap<String, usize> = HashMap::new();
        for path in &self.paths {
            *frequency.entry(self.key(path)).or_default() += 1;
        }
        frequency
            .into_iter()
            .filter(|(_, count)| *count > 1)
            .map(|(name, _)| name)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }
}

impl EntryValidator for CollisionValidator {
    fn read_entry(&mut self, entry: &Entry) {
        self.add_path(entry.path());
    }

    fn validate(&self) -> Result<()> {
        let names = self.collisions();
        if names.is_empty() {
            Ok(())
        } else {
            tracing::debug!(?names, "naming conflict detected");
            Err(ComicError::NameCollision { names })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn validator_for(names: &[&str]) -> CollisionValidator {
        let mut validator = CollisionValidator::for_directories();
        for name in names {
            validator.add_path(Path::new("/library").join(name));
        }
        validator
    }

    #[test]
    fn test_no_repetition() {
        let validator = validator_for(&["dir1", "dir2", "dir 3"]);
        assert!(validator.validate().is_ok());
    }

    #[test]
    fn test_repetition_reports_single_group() {
        let validator = validator_for(&["dir 1", "dir 2", "dir 1 [by some guy]"]);
        match validator.validate() {
            Err(ComicError::NameCollision { names }) => assert_eq!(names, vec!["Dir - 1"]),
            other => panic!("expected a collision, got {:?}", other),
        }
    }

    #[test]
    fn test_three_way_collision_is_listed_once() {
        let validator = validator_for(&[
            "some directory",
            "some directory [by some guy]",
            "SOME DIRECTORY (2001)",
            "other 2",
            "Other #2",
        ]);
        let err = validator.validate().unwrap_err();
        assert_eq!(
            err.to_string(),
            "The following files have a naming conflict:\nOther - 2\nSome Directory"
        );
    }

    #[test]
    fn test_target_extension_compares_output_names() {
        let mut validator = CollisionValidator::for_target_extension("cbz");
        validator.add_path("/library/test 1.cbr");
        validator.add_path("/library/Test - 1.cbz");
        assert_eq!(validator.collisions(), vec!["Test - 1.cbz"]);
    }

    #[test]
    fn test_directories_keep_dotted_names() {
        let mut validator = CollisionValidator::for_directories();
        validator.add_path("/library/some.comic.2");
        validator.add_path("/library/some.comic.3");
        validator.add_path("/library/Some Comic 3 (2001)");
        assert_eq!(validator.collisions(), vec!["Some Comic - 3"]);
    }

    #[test]
    fn test_unpacked_directories_compare_stems() {
        let mut validator = CollisionValidator::for_unpacked_directories();
        validator.add_path("/library/comic.cbz");
        validator.add_path("/library/comic.cbr");
        validator.add_path("/library/Comic.cb7");
        assert_eq!(validator.collisions(), vec!["comic"]);
    }

    #[test]
    fn test_order_independent() {
        let a = validator_for(&["dir 1 [x]", "dir 1"]);
        let b = validator_for(&["dir 1", "dir 1 [x]"]);
        assert_eq!(a.collisions(), b.collisions());
    }
}
