//! # 命令处理逻辑模块
//!
//! 包含处理 `encode` 和 `decode` 操作的高级业务逻辑。
//! 本模块负责协调文件 I/O、PNG 编解码、调用核心隐写算法以及向用户报告结果。
//! 状态信息输出到标准错误，以免混入写到标准输出的载荷数据。

use crate::cli::Cli;
use crate::steganography::{capacity, check_capacity};
use crate::stream::{embed_from_reader, extract_to_writer};
use anyhow::{Context, Result};
use colored::Colorize;
use image::{DynamicImage, ImageFormat};
use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

/// 处理 `encode` 操作。
///
/// 读取载体图像和载荷文件、检查容量是否足够、嵌入载荷，
/// 最后将结果以 PNG 格式写入输出路径。只有嵌入成功后才会创建输出文件。
///
/// # Errors
///
/// 如果发生以下任一情况，将返回错误：
/// * 缺少输出路径或载荷路径。
/// * 无法读取载体图像或载荷文件。
/// * 图像容量不足以容纳载荷。
/// * 无法写入输出图像。
pub fn handle_encode(cli: &Cli) -> Result<()> {
    let output = cli
        .output
        .as_deref()
        .context("Encoding requires an output image path (-o).")?;
    let payload_path = cli
        .payload
        .as_deref()
        .context("Encoding requires a payload file (-f).")?;

    let payload = File::open(payload_path).with_context(|| {
        format!(
            "Unable to open payload file: {}",
            payload_path.to_string_lossy().red().bold()
        )
    })?;
    let payload_len = payload
        .metadata()
        .with_context(|| {
            format!(
                "Unable to read the size of payload file: {}",
                payload_path.to_string_lossy().red().bold()
            )
        })?
        .len();
    eprintln!("Payload is {} bytes", payload_len.to_string().green().bold());

    let carrier = read_image(&cli.input)?;
    let (width, height) = (carrier.width(), carrier.height());
    eprintln!(
        "Image can hide up to {} bytes",
        capacity(width, height).to_string().green().bold()
    );

    let payload_len = check_capacity(payload_len, width, height).with_context(|| {
        format!(
            "Not enough space in {} to hide the payload.",
            cli.input.to_string_lossy().red().bold()
        )
    })?;

    let embedded = embed_from_reader(&carrier, payload_len, payload).with_context(|| {
        format!(
            "Failed to hide {} in the image.",
            payload_path.to_string_lossy().red().bold()
        )
    })?;

    embedded
        .save_with_format(output, ImageFormat::Png)
        .with_context(|| {
            format!(
                "Unable to write output image: {}",
                output.to_string_lossy().red().bold()
            )
        })?;

    eprintln!(
        "The payload has been successfully hidden and saved: {}",
        output.to_string_lossy().green().bold()
    );

    Ok(())
}

/// 处理 `decode` 操作。
///
/// 读取隐写后的图像并恢复载荷。指定了 `-f` 时写入该文件，否则写到标准输出。
/// 提取中途失败时，已经写出的数据会保留。
///
/// # Errors
///
/// 如果发生以下任一情况，将返回错误：
/// * 无法读取输入图像或创建输出文件。
/// * 图像不是 16 位 RGBA，或长度头部超出图像容量。
/// * 写出恢复数据失败。
pub fn handle_decode(cli: &Cli) -> Result<()> {
    handle_decode_to(cli, io::stdout())
}

/// 与 [`handle_decode`] 相同，但未指定 `-f` 时把载荷写到 `stdout` 而不是进程的标准输出。
///
/// `stdout` 只会收到载荷字节，状态信息始终写到标准错误。
///
/// # Errors
///
/// 同 [`handle_decode`]。
pub fn handle_decode_to<W>(cli: &Cli, stdout: W) -> Result<()>
where
    W: Write + Send,
{
    if let Some(output) = &cli.output {
        log::warn!(
            "ignoring output image path {} while decoding",
            output.display()
        );
    }

    let image = read_image(&cli.input)?;

    let recovered = match cli.payload.as_deref() {
        Some(path) => {
            eprintln!(
                "Decoding contents to {}",
                path.to_string_lossy().green().bold()
            );
            let file = File::create(path).with_context(|| {
                format!(
                    "Unable to create payload file: {}",
                    path.to_string_lossy().red().bold()
                )
            })?;
            extract_to_writer(&image, file)
        }
        None => {
            eprintln!("Decoding to {}", "standard output".green().bold());
            extract_to_writer(&image, stdout)
        }
    }
    .with_context(|| {
        format!(
            "Failed to recover a payload from '{}'. \nThe image may not contain hidden data or is corrupted.",
            cli.input.to_string_lossy().red().bold()
        )
    })?;

    eprintln!("Recovered {} bytes", recovered.to_string().green().bold());

    Ok(())
}

fn read_image(path: &Path) -> Result<DynamicImage> {
    image::open(path).with_context(|| {
        format!(
            "Unable to read image file: {}",
            path.to_string_lossy().red().bold()
        )
    })
}
