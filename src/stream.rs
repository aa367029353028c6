//! # 数据流模块
//!
//! 用有界队列连接后台线程与像素扫描：嵌入时由后台线程分块读取载荷并逐字节入队，
//! 提取时由后台线程从队列取出字节、攒满缓冲区后写出。
//! 队列是单生产者/单消费者的 FIFO，字节顺序从头到尾保持不变。

use crate::constants::{BYTE_BUFFER_LEN, QUEUE_DEPTH};
use crate::error::StegoError;
use crate::steganography::{self, Rgba16Image};
use image::DynamicImage;
use std::io::{self, ErrorKind, Read, Write};
use std::sync::mpsc::{self, Receiver, SyncSender};
use std::thread::{self, ScopedJoinHandle};

/// 从 `reader` 读取 `payload_len` 字节并嵌入载体图像。
///
/// 读取在后台线程中进行，扫描像素的当前线程从队列中取字节。
///
/// # Errors
///
/// 读取失败时返回 [`StegoError::Io`]，其余错误同 [`steganography::embed`]。
pub fn embed_from_reader<R>(
    carrier: &DynamicImage,
    payload_len: u32,
    reader: R,
) -> Result<Rgba16Image, StegoError>
where
    R: Read + Send,
{
    thread::scope(|scope| {
        let (tx, rx) = mpsc::sync_channel(QUEUE_DEPTH);
        let producer = scope.spawn(move || feed(reader, tx));

        let embedded = steganography::embed(carrier, payload_len, rx.iter());
        // 让仍阻塞在发送上的生产者退出
        drop(rx);

        join(producer)?;
        embedded
    })
}

/// 从图像中提取载荷并写入 `writer`，返回恢复的字节数。
///
/// 写出在后台线程中进行。返回前会等待该线程把缓冲区全部刷新。
/// 出错时已经写出的数据不会回滚。
///
/// # Errors
///
/// 写入失败时返回 [`StegoError::Io`]，其余错误同 [`steganography::extract`]。
pub fn extract_to_writer<W>(image: &DynamicImage, writer: W) -> Result<u32, StegoError>
where
    W: Write + Send,
{
    thread::scope(|scope| {
        let (tx, rx) = mpsc::sync_channel(QUEUE_DEPTH);
        let consumer = scope.spawn(move || drain(rx, writer));

        let extracted = steganography::extract(image, |byte| {
            tx.send(byte).map_err(|_| {
                StegoError::Io(io::Error::new(
                    ErrorKind::BrokenPipe,
                    "payload writer stopped before extraction finished",
                ))
            })
        });
        // 关闭队列，通知消费者数据已结束
        drop(tx);

        join(consumer)?;
        extracted
    })
}

/// 生产者：按 `BYTE_BUFFER_LEN` 分块读取，逐字节入队。
///
/// 接收端关闭说明扫描已拿到所需的全部字节，此时正常返回。
fn feed<R: Read>(mut reader: R, tx: SyncSender<u8>) -> io::Result<()> {
    let mut chunk = [0u8; BYTE_BUFFER_LEN];
    loop {
        let n = match reader.read(&mut chunk) {
            Ok(0) => return Ok(()),
            Ok(n) => n,
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        };

        for &byte in &chunk[..n] {
            if tx.send(byte).is_err() {
                return Ok(());
            }
        }
    }
}

/// 消费者：攒满 `BYTE_BUFFER_LEN` 字节写出一次，队列关闭后写出剩余部分并刷新。
fn drain<W: Write>(rx: Receiver<u8>, mut writer: W) -> io::Result<()> {
    let mut buffer = Vec::with_capacity(BYTE_BUFFER_LEN);
    for byte in rx {
        buffer.push(byte);
        if buffer.len() == BYTE_BUFFER_LEN {
            writer.write_all(&buffer)?;
            buffer.clear();
        }
    }

    writer.write_all(&buffer)?;
    writer.flush()
}

fn join(handle: ScopedJoinHandle<'_, io::Result<()>>) -> Result<(), StegoError> {
    handle
        .join()
        .unwrap_or_else(|panic| std::panic::resume_unwind(panic))
        .map_err(StegoError::from)
}
