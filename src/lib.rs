//! # lowbyte_hide 库
//!
//! 本库包含低字节隐写工具的核心逻辑：每个 16 位颜色通道的低 8 位承载一个载荷字节。

// 声明库包含的所有模块。

pub mod cli;
pub mod codec;
pub mod constants;
pub mod error;
pub mod handler;
pub mod steganography;
pub mod stream;

pub use error::StegoError;
