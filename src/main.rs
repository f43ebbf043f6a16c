//! # comicutils - 漫画归档批处理工具
//!
//! 在打包形式（单个归档）与解包形式（图片目录）之间批量转换漫画，并规范化名称。
//!
//! ## 子命令
//! - `pack`    - 将子目录打包为 .cbz
//! - `unpack`  - 解包 .cbz/.cbr/.cb7/.zip
//! - `repack`  - 解包后重新打包
//! - `pdf2cbz` - PDF 转 .cbz
//!
//! ## 依赖关系
//! ```text
//! main.rs
//!   ├── cli/        (命令行参数定义)
//!   ├── config.rs   (运行配置)
//!   ├── commands/   (命令执行逻辑)
//!   │     ├── batch/     (批量执行器)
//!   │     ├── packer/    (打包计划、打包 / 解包)
//!   │     ├── naming/    (名称规范化与冲突检测)
//!   │     ├── codec/     (zip / 7z 编解码器)
//!   │     ├── raster/    (PDF 栅格化)
//!   │     └── backup/    (原始文件备份)
//!   ├── utils/      (工具函数)
//!   └── error.rs    (错误处理)
//! ```

mod backup;
mod batch;
mod cli;
mod codec;
mod commands;
mod config;
mod error;
mod naming;
mod packer;
mod raster;
mod utils;

use clap::Parser;
use cli::Cli;
use config::RunConfig;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// 日志过滤环境变量
const LOG_ENV: &str = "COMICUTILS_LOG";

/// 初始化日志：`COMICUTILS_LOG` 优先，否则由 `-v` 次数决定
fn init_logging(verbose: u8) -> anyhow::Result<()> {
    let filter = match std::env::var(LOG_ENV) {
        Ok(directives) => EnvFilter::try_new(directives)?,
        Err(_) => {
            let level = match verbose {
                0 => "warn",
                1 => "comicutils=debug",
                _ => "comicutils=trace",
            };
            EnvFilter::try_new(level)?
        }
    };

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .try_init()?;
    Ok(())
}

fn main() {
    // Initialize colored output for Windows compatibility
    #[cfg(windows)]
    colored::control::set_virtual_terminal(true).ok();

    let cli = Cli::parse();

    if let Err(e) = init_logging(cli.global.verbose) {
        utils::output::print_warning(&format!("Logging is disabled: {}", e));
    }

    let config = RunConfig::from_args(&cli.global);

    if let Err(e) = commands::run(cli.command, &config) {
        utils::output::print_error(&format!("{}", e));
        std::process::exit(1);
    }
}
