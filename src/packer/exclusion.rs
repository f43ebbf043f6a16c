//! # 排除规则
//!
//! 扩展名排除集合（大小写不敏感）以及始终排除的目录名。
//!
//! ## 依赖关系
//! - 被 `packer/` 各子模块使用
//! - 使用 `glob` 生成传给编解码器的排除模式

use std::path::Path;

/// 默认排除的扩展名
pub const DEFAULT_EXCLUSIONS: &[&str] = &["txt", "xml", "db", "nfo"];

/// 始终不打包的目录（归档工具自身的元数据目录）
pub const ALWAYS_EXCLUDED_DIRS: &[&str] = &["__MACOSX"];

/// 扩展名排除集合（保持插入顺序，去重）
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExclusionSet {
    extensions: Vec<String>,
}

impl ExclusionSet {
    /// 空集合：包含所有文件
    pub fn none() -> Self {
        Self::default()
    }

    /// 默认集合：txt, xml, db, nfo
    pub fn defaults() -> Self {
        Self::new(DEFAULT_EXCLUSIONS.iter().copied())
    }

    pub fn new<I, S>(extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut set = Self::default();
        for ext in extensions {
            set.insert(ext.as_ref());
        }
        set
    }

    /// 插入扩展名（忽略前导 `.`，统一小写）
    pub fn insert(&mut self, extension: &str) {
        let ext = extension.trim().trim_start_matches('.').to_lowercase();
        if !ext.is_empty() && !self.extensions.contains(&ext) {
            self.extensions.push(ext);
        }
    }

    pub fn extensions(&self) -> &[String] {
        &self.extensions
    }

    pub fn is_empty(&self) -> bool {
        self.extensions.is_empty()
    }

    /// 文件名以 `.<ext>` 结尾即视为排除
    pub fn is_excluded(&self, path: &Path) -> bool {
        let name = match path.file_name() {
            Some(name) => name.to_string_lossy().to_lowercase(),
            None => return false,
        };
        self.extensions
            .iter()
            .any(|ext| name.ends_with(&format!(".{}", ext)))
    }

    /// 转换为 glob 排除模式（`*.txt` 等），附带始终排除的目录
    pub fn to_patterns(&self) -> Vec<glob::Pattern> {
        self.extensions
            .iter()
            .map(|ext| format!("*.{}", ext))
            .chain(ALWAYS_EXCLUDED_DIRS.iter().map(|d| format!("{}/*", d)))
            .filter_map(|p| glob::Pattern::new(&p).ok())
            .collect()
    }
}

/// 路径（相对 `root`）是否位于始终排除的目录之下
pub fn in_always_excluded_dir(root: &Path, path: &Path) -> bool {
    let relative = path.strip_prefix(root).unwrap_or(path);
    relative.components().any(|c| {
        let name = c.as_os_str().to_string_lossy();
        ALWAYS_EXCLUDED_DIRS.iter().any(|d| *d == name)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_case_insensitive() {
        let set = ExclusionSet::new([".TXT", "nfo", "txt"]);
        assert_eq!(set.extensions(), &["txt".to_string(), "nfo".to_string()]);
        assert!(set.is_excluded(Path::new("comic/Foo.Txt")));
        assert!(set.is_excluded(Path::new("something.NFO")));
        assert!(!set.is_excluded(Path::new("up.jpg")));
        assert!(!set.is_excluded(Path::new("txt")));
    }

    #[test]
    fn test_none_excludes_nothing() {
        assert!(!ExclusionSet::none().is_excluded(Path::new("foo.txt")));
    }

    #[test]
    fn test_patterns() {
        let patterns = ExclusionSet::defaults().to_patterns();
        assert!(patterns.iter().any(|p| p.matches("foo.txt")));
        assert!(patterns.iter().any(|p| p.matches("thumbs.db")));
        assert!(patterns.iter().any(|p| p.matches("__MACOSX/._up.jpg")));
        assert!(!patterns.iter().any(|p| p.matches("up.jpg")));
    }

    #[test]
    fn test_always_excluded_dirs() {
        let root = Path::new("/lib/comic");
        assert!(in_always_excluded_dir(root, Path::new("/lib/comic/__MACOSX/._up.jpg")));
        assert!(!in_always_excluded_dir(root, Path::new("/lib/comic/up.jpg")));
    }
}
