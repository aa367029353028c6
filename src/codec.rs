//! # 通道编解码模块
//!
//! 在单个 16 位颜色通道的低字节中写入或读出一个载荷字节，
//! 高字节始终保持不变。

/// 通道值中承载载荷的低 8 位。
pub const LOW_BYTE_MASK: u16 = 0x00FF;

/// 将 `byte` 写入 `channel` 的低字节，并保留其高字节。
pub fn embed(channel: u16, byte: u8) -> u16 {
    (channel & !LOW_BYTE_MASK) | u16::from(byte)
}

/// 取出 `channel` 的低字节。
pub fn extract(channel: u16) -> u8 {
    (channel & LOW_BYTE_MASK) as u8
}

/// 将载荷长度拆分为 4 个字节，最高有效字节在前 (依次对应 R, G, B, A)。
pub fn split_length(len: u32) -> [u8; 4] {
    len.to_be_bytes()
}

/// `split_length` 的逆运算。
pub fn join_length(bytes: [u8; 4]) -> u32 {
    u32::from_be_bytes(bytes)
}
