//! # pdftoppm 栅格化器
//!
//! 调用 poppler 的 `pdftoppm` 生成 `image-<n>.<ext>`，再统一重命名为
//! `image_<n>.<ext>`，编号按总页数宽度补零，保证字典序即页序。
//!
//! ## 依赖关系
//! - 需要 `pdftoppm` 在 PATH 中
//! - 使用 `regex` 匹配生成的页面文件名

use super::{ImageFormat, Rasterizer};
use crate::error::{ComicError, Result};
use crate::utils::fs::remove_directory;

use regex::Regex;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use std::sync::LazyLock;

const PDFTOPPM: &str = "pdftoppm";

/// 页面文件名前缀
const PAGE_PREFIX: &str = "image";

static GENERATED_PAGE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^image-(\d+)\.(jpg|png)$").unwrap());

/// pdftoppm 栅格化器
#[derive(Debug, Default, Clone, Copy)]
pub struct PopplerRasterizer {
    format: ImageFormat,
}

impl PopplerRasterizer {
    pub fn new(format: ImageFormat) -> Self {
        Self { format }
    }

    /// 检查 pdftoppm 是否可运行
    pub fn is_available() -> bool {
        Command::new(PDFTOPPM)
            .arg("-v")
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .is_ok()
    }

    fn run(&self, pdf: &Path, target: &Path) -> Result<()> {
        let output = Command::new(PDFTOPPM)
            .arg(self.format.flag())
            .arg(pdf)
            .arg(target.join(PAGE_PREFIX))
            .output()
            .map_err(|_| ComicError::CommandNotFound {
                command: PDFTOPPM.to_string(),
            })?;

        if output.status.success() {
            Ok(())
        } else {
            Err(ComicError::CommandFailed {
                command: format!(
                    "{} {} (exit code: {})",
                    PDFTOPPM,
                    pdf.display(),
                    output.status.code().unwrap_or(-1)
                ),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            })
        }
    }
}

impl Rasterizer for PopplerRasterizer {
    fn rasterize(&self, pdf: &Path) -> Result<PathBuf> {
        let stem = pdf
            .file_stem()
            .ok_or_else(|| ComicError::InvalidSource {
                path: pdf.display().to_string(),
                reason: "file has no name".to_string(),
            })?;
        let target = pdf.parent().unwrap_or_else(|| Path::new(".")).join(stem);
        if target.exists() {
            return Err(ComicError::InvalidSource {
                path: pdf.display().to_string(),
                reason: format!("{} already exists", target.display()),
            });
        }

        fs::create_dir(&target).map_err(|e| ComicError::write(&target, e))?;
        let result = self
            .run(pdf, &target)
            .and_then(|()| rename_pages(&target));

        match result {
            Ok(pages) => {
                tracing::info!(pdf = %pdf.display(), pages, "pdf rasterized");
                Ok(target)
            }
            Err(e) => {
                if let Err(cleanup) = remove_directory(&target) {
                    tracing::warn!(target = %target.display(), error = %cleanup, "cannot remove partial rasterization");
                }
                Err(e)
            }
        }
    }
}

/// 将 `image-<n>.<ext>` 重命名为补零的 `image_<n>.<ext>`，返回页数
pub fn rename_pages(directory: &Path) -> Result<usize> {
    let mut pages = Vec::new();
    for item in fs::read_dir(directory).map_err(|e| ComicError::read(directory, e))? {
        let path = item.map_err(|e| ComicError::read(directory, e))?.path();
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        if let Some(caps) = GENERATED_PAGE.captures(&name) {
            let number: u64 = caps[1]
                .parse()
                .map_err(|_| ComicError::Other(format!("Invalid page number in {}", name)))?;
            pages.push((path, number, caps[2].to_string()));
        }
    }

    let width = pages.len().to_string().len();
    for (path, number, extension) in &pages {
        let renamed = directory.join(format!(
            "{}_{:0width$}.{}",
            PAGE_PREFIX,
            number,
            extension,
            width = width
        ));
        fs::rename(path, &renamed).map_err(|e| ComicError::write(&renamed, e))?;
    }

    Ok(pages.len())
}
