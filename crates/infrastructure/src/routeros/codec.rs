//! RouterOS API word framing.
//!
//! A word is a variable-length length prefix followed by that many bytes; a
//! sentence is a run of words closed by an empty word.

use routewatch_domain::DomainError;
use tokio::io::{AsyncReadExt, AsyncWriteExt};

pub const MAX_WORD_SIZE: usize = 1 << 20;

pub fn encode_length(len: usize) -> Vec<u8> {
    let len = len as u32;
    if len < 0x80 {
        vec![len as u8]
    } else if len < 0x4000 {
        (len | 0x8000).to_be_bytes()[2..].to_vec()
    } else if len < 0x20_0000 {
        (len | 0xC0_0000).to_be_bytes()[1..].to_vec()
    } else if len < 0x1000_0000 {
        (len | 0xE000_0000).to_be_bytes().to_vec()
    } else {
        let mut out = vec![0xF0];
        out.extend_from_slice(&len.to_be_bytes());
        out
    }
}

pub fn encode_sentence<S: AsRef<str>>(words: &[S]) -> Vec<u8> {
    let mut buf = Vec::new();
    for word in words {
        let bytes = word.as_ref().as_bytes();
        buf.extend_from_slice(&encode_length(bytes.len()));
        buf.extend_from_slice(bytes);
    }
    buf.push(0);
    buf
}

pub async fn write_sentence<W, S>(stream: &mut W, words: &[S]) -> Result<(), DomainError>
where
    W: AsyncWriteExt + Unpin,
    S: AsRef<str>,
{
    let buf = encode_sentence(words);
    stream
        .write_all(&buf)
        .await
        .map_err(|e| DomainError::IoError(format!("Failed to write API sentence: {}", e)))?;
    stream
        .flush()
        .await
        .map_err(|e| DomainError::IoError(format!("Failed to flush stream: {}", e)))?;
    Ok(())
}

async fn read_byte<R>(stream: &mut R) -> Result<u8, DomainError>
where
    R: AsyncReadExt + Unpin,
{
    stream
        .read_u8()
        .await
        .map_err(|e| DomainError::IoError(format!("Failed to read word length: {}", e)))
}

pub async fn read_length<R>(stream: &mut R) -> Result<usize, DomainError>
where
    R: AsyncReadExt + Unpin,
{
    let first = read_byte(stream).await?;

    let (mut len, extra) = if first & 0x80 == 0x00 {
        (u32::from(first), 0)
    } else if first & 0xC0 == 0x80 {
        (u32::from(first & 0x3F), 1)
    } else if first & 0xE0 == 0xC0 {
        (u32::from(first & 0x1F), 2)
    } else if first & 0xF0 == 0xE0 {
        (u32::from(first & 0x0F), 3)
    } else if first == 0xF0 {
        (0, 4)
    } else {
        return Err(DomainError::ProtocolError(format!(
            "Unexpected control byte 0x{:02X}",
            first
        )));
    };

    for _ in 0..extra {
        len = (len << 8) | u32::from(read_byte(stream).await?);
    }

    Ok(len as usize)
}

pub async fn read_word<R>(stream: &mut R) -> Result<String, DomainError>
where
    R: AsyncReadExt + Unpin,
{
    let len = read_length(stream).await?;

    if len > MAX_WORD_SIZE {
        return Err(DomainError::ProtocolError(format!(
            "Word too large: {} bytes (max {})",
            len, MAX_WORD_SIZE
        )));
    }

    let mut buf = vec![0u8; len];
    stream
        .read_exact(&mut buf)
        .await
        .map_err(|e| DomainError::IoError(format!("Failed to read word body: {}", e)))?;

    Ok(String::from_utf8_lossy(&buf).into_owned())
}

pub async fn read_sentence<R>(stream: &mut R) -> Result<Vec<String>, DomainError>
where
    R: AsyncReadExt + Unpin,
{
    let mut words = Vec::new();
    loop {
        let word = read_word(stream).await?;
        if word.is_empty() {
            return Ok(words);
        }
        words.push(word);
    }
}
