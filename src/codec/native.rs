//! # 原生 zip 编解码器
//!
//! 使用 `zip` crate 读写 cbz。写入时使用 STORED（图片本身已压缩）。
//!
//! ## 依赖关系
//! - 被 `codec/mod.rs` 使用
//! - 使用 `packer/plan.rs` 计算条目名

use super::ArchiveCodec;
use crate::error::{ComicError, Result};
use crate::packer::plan::relative_entry_name;

use std::fs::{self, File, OpenOptions};
use std::io::{self, BufReader, BufWriter, Read};
use std::path::{Path, PathBuf};
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipArchive, ZipWriter};

/// 本地文件头 / 空归档的结束记录
const ZIP_SIGNATURES: [[u8; 4]; 2] = [*b"PK\x03\x04", *b"PK\x05\x06"];

/// 按文件签名判断是否为 zip
pub fn is_zip_file(path: &Path) -> bool {
    let mut magic = [0u8; 4];
    match File::open(path).and_then(|mut f| f.read_exact(&mut magic)) {
        Ok(()) => ZIP_SIGNATURES.contains(&magic),
        Err(_) => false,
    }
}

/// 原生 zip 编解码器
#[derive(Debug, Default, Clone, Copy)]
pub struct NativeZipCodec;

impl ArchiveCodec for NativeZipCodec {
    fn name(&self) -> &'static str {
        "zip"
    }

    fn extract(&self, archive: &Path, target: &Path) -> Result<()> {
        let file = File::open(archive).map_err(|e| ComicError::read(archive, e))?;
        let mut zip = ZipArchive::new(BufReader::new(file))?;

        for i in 0..zip.len() {
            let mut entry = zip.by_index(i)?;
            if entry.is_dir() {
                continue;
            }
            let relative = match entry.enclosed_name() {
                Some(path) => path,
                None => {
                    tracing::warn!(name = entry.name(), "skipping unsafe archive path");
                    continue;
                }
            };

            // 目标目录按需创建：空归档不产生目录
            let out_path = target.join(relative);
            if let Some(parent) = out_path.parent() {
                fs::create_dir_all(parent).map_err(|e| ComicError::write(parent, e))?;
            }
            let mut out_file = File::create(&out_path).map_err(|e| ComicError::write(&out_path, e))?;
            io::copy(&mut entry, &mut out_file).map_err(|e| ComicError::write(&out_path, e))?;
        }

        Ok(())
    }

    fn create(
        &self,
        root: &Path,
        included: &[PathBuf],
        excluded: &[glob::Pattern],
        output: &Path,
    ) -> Result<()> {
        // 不覆盖已存在的归档
        let file = OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(output)
            .map_err(|e| ComicError::write(output, e))?;
        let mut writer = ZipWriter::new(BufWriter::new(file));
        let options =
            SimpleFileOptions::default().compression_method(CompressionMethod::Stored);

        for path in included {
            let name = relative_entry_name(root, path);
            if excluded.iter().any(|p| p.matches(&name)) {
                continue;
            }
            writer.start_file(name, options)?;
            let mut input = File::open(path).map_err(|e| ComicError::read(path, e))?;
            io::copy(&mut input, &mut writer).map_err(|e| ComicError::write(output, e))?;
        }

        writer.finish()?;
        Ok(())
    }
}
