//! # 错误类型模块
//!
//! [`StegoError`] 覆盖隐写核心 (容量检查、像素扫描、数据流) 的全部失败情形。
//! 命令处理层再通过 `anyhow` 为其附加上下文信息。

use image::ColorType;
use std::io;
use thiserror::Error;

/// 嵌入或提取载荷时可能出现的错误。
#[derive(Debug, Error)]
pub enum StegoError {
    /// 载荷长度超过图像可用容量 (`4 * W * H - 4` 字节)。
    #[error("payload needs {required} bytes but the image can only hold {available} bytes")]
    CapacityExceeded { required: u64, available: u64 },

    /// 图像不是 16 位 RGBA 像素格式，无法按通道低字节解读。
    #[error("expected a 16-bit RGBA image, found {found:?}")]
    FormatMismatch { found: ColorType },

    /// 长度头部声明的字节数超过图像实际能承载的字节数。
    #[error("length header declares {declared} bytes but the image can only hold {available} bytes")]
    LengthExceedsImage { declared: u32, available: u64 },

    /// 载荷数据源在达到声明长度之前就结束了。
    #[error("payload source ended after {supplied} of {declared} bytes")]
    SourceExhausted { declared: u32, supplied: u64 },

    /// 图像没有任何像素，无法存放长度头部。
    #[error("image has no pixels to hold the length header")]
    EmptyImage,

    /// 读取载荷或写出恢复数据时发生 I/O 错误。
    #[error(transparent)]
    Io(#[from] io::Error),
}
