//! # 隐写核心模块
//!
//! 按行优先顺序扫描像素：第一个像素的四个通道低字节存放大端序的载荷长度，
//! 其后每个像素的 R, G, B, A 通道低字节依次承载一个载荷字节。
//!
//! 嵌入与提取共享同一个状态序列：先处理头部像素 (即使长度为 0)，
//! 然后逐像素、逐通道流式处理，直到载荷结束或像素耗尽。

use crate::codec;
use crate::constants::{CHANNELS_PER_PIXEL, HEADER_BYTES};
use crate::error::StegoError;
use image::{DynamicImage, ImageBuffer, Rgba};

/// 16 位 RGBA 图像，嵌入结果总是这种像素格式。
pub type Rgba16Image = ImageBuffer<Rgba<u16>, Vec<u16>>;

/// 计算 `width` x `height` 图像可隐藏的最大载荷字节数 (头部像素除外)。
pub fn capacity(width: u32, height: u32) -> u64 {
    (u64::from(width) * u64::from(height) * CHANNELS_PER_PIXEL as u64)
        .saturating_sub(HEADER_BYTES as u64)
}

/// 检查 `payload_len` 字节的载荷能否放入给定尺寸的图像。
///
/// 成功时返回可写入长度头部的 `u32` 长度。
///
/// # Errors
///
/// * 图像没有像素时返回 [`StegoError::EmptyImage`]。
/// * 载荷超过容量，或长度无法用 `u32` 表示时返回 [`StegoError::CapacityExceeded`]。
pub fn check_capacity(payload_len: u64, width: u32, height: u32) -> Result<u32, StegoError> {
    if width == 0 || height == 0 {
        return Err(StegoError::EmptyImage);
    }

    let available = capacity(width, height);
    let exceeded = StegoError::CapacityExceeded {
        required: payload_len,
        available,
    };
    if payload_len > available {
        return Err(exceeded);
    }

    u32::try_from(payload_len).map_err(|_| exceeded)
}

/// 将载荷嵌入载体图像，返回一幅新的 16 位 RGBA 图像。
///
/// 载体先被完整复制为 16 位 RGBA，然后写入长度头部，再从 `payload`
/// 中最多取 `payload_len` 个字节依次写入后续通道的低字节。
/// 载荷结束后剩余的通道与像素保持载体原值。载体本身不会被修改。
///
/// # Errors
///
/// * 容量不足时返回 [`StegoError::CapacityExceeded`]，此时不会产生任何输出。
/// * `payload` 提供的字节少于 `payload_len` 时返回 [`StegoError::SourceExhausted`]。
pub fn embed<I>(
    carrier: &DynamicImage,
    payload_len: u32,
    payload: I,
) -> Result<Rgba16Image, StegoError>
where
    I: IntoIterator<Item = u8>,
{
    let (width, height) = (carrier.width(), carrier.height());
    check_capacity(u64::from(payload_len), width, height)?;
    log::debug!(
        "embedding {payload_len} bytes into a {width}x{height} carrier (capacity {})",
        capacity(width, height)
    );

    let mut output = carrier.to_rgba16();
    let (header, body) = output.split_at_mut(HEADER_BYTES);

    header
        .iter_mut()
        .zip(codec::split_length(payload_len))
        .for_each(|(channel, byte)| *channel = codec::embed(*channel, byte));

    let mut supplied: u64 = 0;
    for (channel, byte) in body.iter_mut().zip(payload.into_iter().take(payload_len as usize)) {
        *channel = codec::embed(*channel, byte);
        supplied += 1;
    }

    if supplied < u64::from(payload_len) {
        return Err(StegoError::SourceExhausted {
            declared: payload_len,
            supplied,
        });
    }

    Ok(output)
}

/// 从嵌入过载荷的图像中恢复载荷，按提取顺序逐字节交给 `sink`。
///
/// 恰好在输出头部声明的字节数之后停止，不会读取多余的通道。
/// 返回头部声明的载荷长度。
///
/// # Errors
///
/// * 图像不是 16 位 RGBA 时返回 [`StegoError::FormatMismatch`]。
/// * 头部声明的长度超过图像容量时返回 [`StegoError::LengthExceedsImage`]，此时不会调用 `sink`。
/// * `sink` 返回的任何错误都会中止提取并原样返回。
pub fn extract<F>(image: &DynamicImage, mut sink: F) -> Result<u32, StegoError>
where
    F: FnMut(u8) -> Result<(), StegoError>,
{
    let DynamicImage::ImageRgba16(buffer) = image else {
        return Err(StegoError::FormatMismatch {
            found: image.color(),
        });
    };

    let (width, height) = buffer.dimensions();
    if width == 0 || height == 0 {
        return Err(StegoError::EmptyImage);
    }

    let (header, body) = buffer.split_at(HEADER_BYTES);
    let declared = codec::join_length(std::array::from_fn(|i| codec::extract(header[i])));

    let available = capacity(width, height);
    if u64::from(declared) > available {
        return Err(StegoError::LengthExceedsImage {
            declared,
            available,
        });
    }
    log::debug!("length header declares {declared} bytes (capacity {available})");

    body.iter()
        .take(declared as usize)
        .try_for_each(|&channel| sink(codec::extract(channel)))?;

    Ok(declared)
}

/// 将恢复的载荷收集到内存中。
pub fn extract_to_vec(image: &DynamicImage) -> Result<Vec<u8>, StegoError> {
    let mut payload = Vec::new();
    extract(image, |byte| {
        payload.push(byte);
        Ok(())
    })?;
    Ok(payload)
}
