//! # 按日期保留的备份存储
//!
//! 备份目录结构：`<base>/<YYYY-MM-DD>/<文件名>`。
//! 创建存储时删除超过保留期（默认 7 天）的日期目录。
//!
//! ## 依赖关系
//! - 使用 `time` 解析 / 格式化日期
//! - 使用 `directories` 定位用户主目录
//! - 使用 `utils/fs.rs` 移动文件与删除目录

use super::BackupStore;
use crate::error::{ComicError, Result};
use crate::utils::fs::{is_symlink, move_file, remove_directory};

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use time::format_description::BorrowedFormatItem;
use time::macros::format_description;
use time::{Date, Duration, OffsetDateTime};

/// 备份目录名（位于用户主目录下）
pub const BACKUP_DIRECTORY_NAME: &str = ".comicutils";

/// 默认保留天数
pub const MAX_TENURE_DAYS: i64 = 7;

const DATE_FORMAT: &[BorrowedFormatItem<'static>] = format_description!("[year]-[month]-[day]");

/// 按日期保留的备份存储
#[derive(Debug)]
pub struct RetentionBackupStore {
    base: PathBuf,
    tenure_days: i64,
    /// 多个工作线程可能同时创建当天的目录
    lock: Mutex<()>,
}

impl RetentionBackupStore {
    /// 在 `base` 创建备份存储，并清理过期目录
    pub fn new(base: impl Into<PathBuf>) -> Result<Self> {
        Self::with_tenure(base, MAX_TENURE_DAYS)
    }

    pub fn with_tenure(base: impl Into<PathBuf>, tenure_days: i64) -> Result<Self> {
        let store = Self {
            base: base.into(),
            tenure_days,
            lock: Mutex::new(()),
        };
        store.cleanup(today())?;
        Ok(store)
    }

    /// 默认位置：`$HOME/.comicutils`
    pub fn default_location() -> Result<PathBuf> {
        directories::BaseDirs::new()
            .map(|dirs| dirs.home_dir().join(BACKUP_DIRECTORY_NAME))
            .ok_or_else(|| ComicError::Other("Cannot determine the home directory".to_string()))
    }

    pub fn base(&self) -> &Path {
        &self.base
    }

    /// 删除早于保留期的日期目录；非日期命名的目录保持不变
    pub fn cleanup(&self, today: Date) -> Result<usize> {
        if !self.base.is_dir() {
            return Ok(0);
        }

        let mut removed = 0;
        for item in fs::read_dir(&self.base).map_err(|e| ComicError::read(&self.base, e))? {
            let path = item.map_err(|e| ComicError::read(&self.base, e))?.path();
            if !path.is_dir() || is_symlink(&path) {
                continue;
            }
            let name = path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default();
            let date = match Date::parse(&name, DATE_FORMAT) {
                Ok(date) => date,
                Err(_) => continue,
            };
            if today - date >= Duration::days(self.tenure_days) {
                match remove_directory(&path) {
                    Ok(()) => {
                        tracing::info!(dir = %path.display(), "removed expired backup directory");
                        removed += 1;
                    }
                    Err(e) => tracing::error!(dir = %path.display(), error = %e, "cannot remove expired backup"),
                }
            }
        }

        Ok(removed)
    }

    /// 当天的备份目录
    fn day_directory(&self) -> Result<PathBuf> {
        if self.base.exists() && !self.base.is_dir() {
            return Err(ComicError::Backup {
                path: self.base.display().to_string(),
                reason: "exists and is not a directory".to_string(),
            });
        }
        let name = today()
            .format(DATE_FORMAT)
            .map_err(|e| ComicError::Other(e.to_string()))?;
        Ok(self.base.join(name))
    }
}

impl BackupStore for RetentionBackupStore {
    fn store(&self, file: &Path) -> Result<PathBuf> {
        if !file.exists() || file.is_dir() || is_symlink(file) {
            return Err(ComicError::Backup {
                path: file.display().to_string(),
                reason: "only existing regular files can be backed up".to_string(),
            });
        }

        let dir = self.day_directory()?;
        {
            let _guard = self.lock.lock().unwrap_or_else(|e| e.into_inner());
            fs::create_dir_all(&dir).map_err(|e| ComicError::write(&dir, e))?;
        }

        let file_name = file.file_name().ok_or_else(|| ComicError::Backup {
            path: file.display().to_string(),
            reason: "file has no name".to_string(),
        })?;
        let target = dir.join(file_name);
        move_file(file, &target).map_err(|e| ComicError::Backup {
            path: file.display().to_string(),
            reason: e.to_string(),
        })?;

        tracing::debug!(from = %file.display(), to = %target.display(), "moved to backup directory");
        Ok(target)
    }
}

fn today() -> Date {
    OffsetDateTime::now_utc().date()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_moves_file_into_dated_directory() {
        let tmp = tempfile::tempdir().unwrap();
        let store = RetentionBackupStore::new(tmp.path().join(".comicutils")).unwrap();
        let comic = tmp.path().join("test.cbr");
        fs::write(&comic, b"original").unwrap();

        let backup = store.store(&comic).unwrap();

        assert!(!comic.exists());
        let expected = tmp
            .path()
            .join(".comicutils")
            .join(today().format(DATE_FORMAT).unwrap())
            .join("test.cbr");
        assert_eq!(backup, expected);
        assert_eq!(fs::read(&backup).unwrap(), b"original");
    }

    #[test]
    fn test_store_replaces_previous_backup() {
        let tmp = tempfile::tempdir().unwrap();
        let store = RetentionBackupStore::new(tmp.path().join("backup")).unwrap();
        let comic = tmp.path().join("test.cbz");

        fs::write(&comic, b"first").unwrap();
        store.store(&comic).unwrap();
        fs::write(&comic, b"second").unwrap();
        let backup = store.store(&comic).unwrap();

        assert_eq!(fs::read(backup).unwrap(), b"second");
    }

    #[test]
    fn test_store_rejects_directories() {
        let tmp = tempfile::tempdir().unwrap();
        let store = RetentionBackupStore::new(tmp.path().join("backup")).unwrap();
        let result = store.store(tmp.path());
        assert!(matches!(result, Err(ComicError::Backup { .. })));
    }

    #[test]
    fn test_cleanup_removes_only_expired_dated_directories() {
        let tmp = tempfile::tempdir().unwrap();
        let base = tmp.path().join("backup");
        for name in ["2024-01-01", "2024-01-05", "2024-01-08", "keep me"] {
            fs::create_dir_all(base.join(name)).unwrap();
            fs::write(base.join(name).join("file.cbz"), b"x").unwrap();
        }
        let store = RetentionBackupStore {
            base: base.clone(),
            tenure_days: MAX_TENURE_DAYS,
            lock: Mutex::new(()),
        };

        let today = Date::parse("2024-01-10", DATE_FORMAT).unwrap();
        let removed = store.cleanup(today).unwrap();

        assert_eq!(removed, 1);
        assert!(!base.join("2024-01-01").exists());
        assert!(base.join("2024-01-05").exists());
        assert!(base.join("2024-01-08").exists());
        assert!(base.join("keep me").exists());
    }

    #[test]
    fn test_base_that_is_a_file_is_reported() {
        let tmp = tempfile::tempdir().unwrap();
        let base = tmp.path().join("backup");
        fs::write(&base, b"not a dir").unwrap();
        let store = RetentionBackupStore::new(&base).unwrap();
        let comic = tmp.path().join("a.cbz");
        fs::write(&comic, b"x").unwrap();
        assert!(store.store(&comic).is_err());
        assert!(comic.exists());
    }
}
