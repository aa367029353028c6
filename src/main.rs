use clap::Parser;
use log::LevelFilter;
use simple_logger::SimpleLogger;

use lowbyte_hide::{
    cli::{Cli, Operation},
    handler::{handle_decode, handle_encode},
};

/// 程序的主入口点
///
/// 负责解析命令行参数、初始化日志，并根据指定的操作（`encode` 或 `decode`）
/// 将执行分派到相应的处理函数
fn main() -> anyhow::Result<()> {
    // 解析命令行参数
    let cli = Cli::parse();

    let level = if cli.verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    };
    SimpleLogger::new().with_level(level).init()?;

    // 根据操作调用相应的处理函数
    match cli.operation {
        Operation::Encode => handle_encode(&cli),
        Operation::Decode => handle_decode(&cli),
    }
}
