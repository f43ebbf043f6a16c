//! # 名称规范化模块
//!
//! 生成漫画的规范显示名称，并在批处理开始前检测名称冲突。
//!
//! ## 依赖关系
//! - 被 `packer/`、`commands/` 使用
//! - `validator` 实现 `batch::EntryValidator`
//! - 使用 `regex` crate

pub mod normalizer;
pub mod validator;

pub use validator::CollisionValidator;
