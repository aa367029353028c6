//! # 命令行接口模块
//!
//! 使用 `clap` 定义程序的配置结构。解析结果 [`Cli`] 会被直接传给
//! 命令处理函数，程序中不存在任何全局可变配置。

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// 将任意文件隐藏在 PNG 图像 16 位颜色通道的低字节中，或从中恢复。
#[derive(Parser, Debug, Clone)]
#[command(
    version,
    about,
    long_about = "将任意文件隐藏在 PNG 图像 16 位 RGBA 颜色通道的低字节中，或从隐写后的图像中恢复。\n第一个像素保存载荷长度，其后每个像素保存 4 个字节。"
)]
pub struct Cli {
    /// 要执行的操作。
    #[arg(long = "op", value_enum, default_value_t = Operation::Encode)]
    pub operation: Operation,

    /// 输入图像路径：encode 时为载体图像，decode 时为隐写后的图像。
    #[arg(short, long)]
    pub input: PathBuf,

    /// encode 输出的 PNG 图像路径。decode 时忽略。
    #[arg(
        short,
        long,
        required_if_eq("operation", "encode"),
        required_unless_present = "operation"
    )]
    pub output: Option<PathBuf>,

    /// 载荷文件路径：encode 时从中读取；decode 时写入，省略则写到标准输出。
    #[arg(
        short = 'f',
        long = "file",
        required_if_eq("operation", "encode"),
        required_unless_present = "operation"
    )]
    pub payload: Option<PathBuf>,

    /// 输出调试日志。
    #[arg(short, long)]
    pub verbose: bool,
}

/// 可用的操作：encode (隐藏) 和 decode (恢复)。
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Operation {
    /// 将载荷文件隐藏到图像中。
    #[default]
    Encode,

    /// 从图像中恢复载荷。
    Decode,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_encode_is_the_default_operation() {
        let cli = Cli::try_parse_from([
            "lowbyte_hide",
            "-i",
            "in.png",
            "-o",
            "out.png",
            "-f",
            "secret.bin",
        ])
        .unwrap();
        assert_eq!(cli.operation, Operation::Encode);
        assert_eq!(cli.payload, Some(PathBuf::from("secret.bin")));
    }

    #[test]
    fn test_decode_without_payload_path() {
        let cli =
            Cli::try_parse_from(["lowbyte_hide", "--op", "decode", "-i", "steg.png"]).unwrap();
        assert_eq!(cli.operation, Operation::Decode);
        assert!(cli.payload.is_none());
        assert!(cli.output.is_none());
    }

    #[test]
    fn test_encode_requires_output_and_payload() {
        let result = Cli::try_parse_from(["lowbyte_hide", "--op", "encode", "-i", "in.png"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_default_operation_requires_output_and_payload() {
        let result = Cli::try_parse_from(["lowbyte_hide", "-i", "in.png"]);
        assert!(result.is_err());

        let result = Cli::try_parse_from(["lowbyte_hide", "-i", "in.png", "-o", "out.png"]);
        assert!(result.is_err());

        let result = Cli::try_parse_from(["lowbyte_hide", "-i", "in.png", "-f", "secret.bin"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_input_is_required() {
        let result = Cli::try_parse_from(["lowbyte_hide", "--op", "decode"]);
        assert!(result.is_err());
    }
}
