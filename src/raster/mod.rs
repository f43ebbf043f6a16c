//! # PDF 栅格化模块
//!
//! 将 PDF 转换为按页编号的图片目录，随后作为普通源目录交给打包器。
//!
//! ## 依赖关系
//! - 被 `commands/pdf2cbz.rs` 使用
//! - 子模块: poppler

pub mod poppler;

pub use poppler::PopplerRasterizer;

use crate::error::Result;
use std::path::{Path, PathBuf};

/// 输出图片格式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum ImageFormat {
    #[default]
    Jpeg,
    Png,
}

impl ImageFormat {
    /// `pdftoppm` 的格式参数
    pub fn flag(self) -> &'static str {
        match self {
            ImageFormat::Jpeg => "-jpeg",
            ImageFormat::Png => "-png",
        }
    }
}

impl std::fmt::Display for ImageFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ImageFormat::Jpeg => write!(f, "jpeg"),
            ImageFormat::Png => write!(f, "png"),
        }
    }
}

/// PDF 栅格化器
pub trait Rasterizer: Send + Sync {
    /// 将 `pdf` 栅格化到同级同名目录，返回该目录
    fn rasterize(&self, pdf: &Path) -> Result<PathBuf>;
}
