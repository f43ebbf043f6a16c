//! # 7z 命令行编解码器
//!
//! 调用外部 `7z` 命令处理原生实现不支持的格式（cbr / cb7 等）。
//!
//! ## 依赖关系
//! - 被 `codec/mod.rs` 使用
//! - 需要 `7z` 在 PATH 中

use super::{ArchiveCodec, NativeZipCodec};
use crate::error::{ComicError, Result};
use crate::packer::plan::relative_entry_name;

use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Output, Stdio};
use tempfile::NamedTempFile;

const SEVEN_ZIP: &str = "7z";

/// 7z 命令行编解码器
#[derive(Debug, Default, Clone, Copy)]
pub struct SevenZipCodec;

impl SevenZipCodec {
    /// 检查 7z 是否可运行
    pub fn is_available() -> bool {
        Command::new(SEVEN_ZIP)
            .arg("--help")
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .map(|s| s.success())
            .unwrap_or(false)
    }

    /// 运行 7z，非零退出码转换为 `CommandFailed`
    fn run(command: &mut Command, description: String) -> Result<Output> {
        let output = command.output().map_err(|_| ComicError::CommandNotFound {
            command: SEVEN_ZIP.to_string(),
        })?;

        if output.status.success() {
            Ok(output)
        } else {
            let mut diagnostic = String::from_utf8_lossy(&output.stderr).trim().to_string();
            if diagnostic.is_empty() {
                diagnostic = String::from_utf8_lossy(&output.stdout).trim().to_string();
            }
            Err(ComicError::CommandFailed {
                command: format!(
                    "{} (exit code: {})",
                    description,
                    output.status.code().unwrap_or(-1)
                ),
                stderr: diagnostic,
            })
        }
    }

    /// 把条目名写入 7z 列表文件（UTF-8，每行一个相对路径）
    ///
    /// 文件名不经过命令行传递，不受参数长度限制。
    fn write_list_file(root: &Path, included: &[PathBuf]) -> Result<NamedTempFile> {
        let mut list = NamedTempFile::new().map_err(|e| ComicError::write(root, e))?;
        for path in included {
            writeln!(list, "{}", relative_entry_name(root, path))
                .map_err(|e| ComicError::write(list.path(), e))?;
        }
        list.flush().map_err(|e| ComicError::write(list.path(), e))?;
        Ok(list)
    }
}

impl ArchiveCodec for SevenZipCodec {
    fn name(&self) -> &'static str {
        "7z"
    }

    fn extract(&self, archive: &Path, target: &Path) -> Result<()> {
        let mut command = Command::new(SEVEN_ZIP);
        command
            .arg("x")
            .arg(archive)
            .arg(format!("-o{}", target.display()))
            .arg("-y");
        Self::run(&mut command, format!("7z x {}", archive.display()))?;
        Ok(())
    }

    fn create(
        &self,
        root: &Path,
        included: &[PathBuf],
        excluded: &[glob::Pattern],
        output: &Path,
    ) -> Result<()> {
        // 没有文件名时 7z 会打包整个 root
        if included.is_empty() {
            return NativeZipCodec.create(root, included, excluded, output);
        }

        // 7z 在 root 中运行，输出路径必须是绝对路径
        let output = std::path::absolute(output).map_err(|e| ComicError::write(output, e))?;
        let list = Self::write_list_file(root, included)?;
        let mut command = Command::new(SEVEN_ZIP);
        command
            .current_dir(root)
            .arg("a")
            .arg("-tzip")
            .arg("-mx=0")
            .arg("-scsUTF-8")
            .arg(&output);
        for pattern in excluded {
            command.arg(format!("-xr!{}", pattern.as_str()));
        }
        command.arg(format!("@{}", list.path().display()));
        Self::run(&mut command, format!("7z a {}", output.display()))?;
        Ok(())
    }
}
