/// 每个像素的通道数 (R, G, B, A)。
/// 每个通道的低字节承载一个载荷字节，因此每个像素可隐藏 4 字节。
pub const CHANNELS_PER_PIXEL: usize = 4;

/// 载荷长度头部占用的字节数。
/// 长度为 `u32`，按大端顺序拆分到第一个像素的四个通道中。
pub const HEADER_BYTES: usize = 4;

/// 读取载荷文件、批量写出恢复数据时使用的缓冲区大小 (字节)。
pub const BYTE_BUFFER_LEN: usize = 256;

/// 生产者与消费者线程之间有界队列的深度。
pub const QUEUE_DEPTH: usize = BYTE_BUFFER_LEN;
