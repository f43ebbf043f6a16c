//! # 文件系统工具
//!
//! 目录删除、符号链接检查、跨文件系统移动。
//!
//! ## 依赖关系
//! - 被 `packer/`、`backup/`、`raster/` 使用
//! - 使用 `walkdir` 做深度优先（内容优先）遍历

use crate::error::{ComicError, Result};

use std::fs;
use std::path::Path;
use walkdir::WalkDir;

/// 是否为符号链接（不跟随）
pub fn is_symlink(path: &Path) -> bool {
    fs::symlink_metadata(path)
        .map(|m| m.file_type().is_symlink())
        .unwrap_or(false)
}

/// 递归删除目录（最深的条目最先删除）
pub fn remove_directory(directory: &Path) -> Result<()> {
    if is_symlink(directory) || !directory.is_dir() {
        return Err(ComicError::NotADirectory {
            path: directory.display().to_string(),
        });
    }

    for item in WalkDir::new(directory).contents_first(true) {
        let item = item.map_err(|e| ComicError::read(directory, e.into()))?;
        let path = item.path();
        let removed = if item.file_type().is_dir() {
            fs::remove_dir(path)
        } else {
            fs::remove_file(path)
        };
        removed.map_err(|e| ComicError::write(path, e))?;
    }

    Ok(())
}

/// 移动文件（覆盖目标）；跨文件系统时退化为复制 + 删除
pub fn move_file(from: &Path, to: &Path) -> Result<()> {
    if fs::rename(from, to).is_ok() {
        return Ok(());
    }
    fs::copy(from, to).map_err(|e| ComicError::write(to, e))?;
    fs::remove_file(from).map_err(|e| ComicError::write(from, e))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_remove_directory_recursively() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = tmp.path().join("comic");
        fs::create_dir_all(dir.join("a/b/c")).unwrap();
        fs::write(dir.join("a/b/c/01.jpg"), b"x").unwrap();
        fs::write(dir.join("02.jpg"), b"y").unwrap();

        remove_directory(&dir).unwrap();
        assert!(!dir.exists());
        assert!(tmp.path().exists());
    }

    #[test]
    fn test_remove_directory_rejects_files() {
        let tmp = tempfile::tempdir().unwrap();
        let file = tmp.path().join("file");
        fs::write(&file, b"x").unwrap();
        assert!(remove_directory(&file).is_err());
        assert!(file.exists());
    }

    #[test]
    fn test_move_file_replaces_existing() {
        let tmp = tempfile::tempdir().unwrap();
        let from = tmp.path().join("a.cbz");
        let to = tmp.path().join("b.cbz");
        fs::write(&from, b"new").unwrap();
        fs::write(&to, b"old").unwrap();

        move_file(&from, &to).unwrap();
        assert!(!from.exists());
        assert_eq!(fs::read(&to).unwrap(), b"new");
    }
}
