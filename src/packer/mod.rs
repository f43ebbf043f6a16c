//! # 打包模块
//!
//! 决定哪些文件进入归档（嵌套展平、垃圾过滤、扩展名排除），
//! 并把字节级写入交给 `codec/`。
//!
//! ## 依赖关系
//! - 被 `commands/` 使用
//! - 使用 `codec/`、`backup/`、`naming/`
//! - 子模块: exclusion, garbage, nesting, plan, packer, unpacker

pub mod exclusion;
pub mod garbage;
pub mod nesting;
pub mod packer;
pub mod plan;
pub mod unpacker;

pub use packer::ArchivePacker;
pub use plan::PackOptions;
pub use unpacker::Unpacker;
