//! Container layout.
//!
//! ```text
//! Container := Frame* SizeTable ChunkCount [Extension]
//! SizeTable := FrameByteLength(u32 LE){ChunkCount}
//! ChunkCount:= u8
//! Extension := original file extension, leading '.' included
//! ```
//!
//! There is no magic number, version or checksum. Size fields are pinned to
//! little-endian.

use crate::config::MAX_CHUNKS;
use lzwpar_core::error::{LzwparError, Result};
use lzwpar_core::read_u32_le;

/// Width of one size-table entry.
pub const SIZE_FIELD_LEN: usize = 4;

/// Concatenate `frames`, then append the size table and chunk count.
pub fn write_container<F: AsRef<[u8]>>(frames: &[F]) -> Result<Vec<u8>> {
    if frames.is_empty() || frames.len() > MAX_CHUNKS {
        return Err(LzwparError::InvalidChunkCount {
            count: frames.len(),
        });
    }

    let payload: usize = frames.iter().map(|f| f.as_ref().len()).sum();
    let mut out = Vec::with_capacity(payload + frames.len() * SIZE_FIELD_LEN + 1);

    for frame in frames {
        out.extend_from_slice(frame.as_ref());
    }
    for frame in frames {
        let len = frame.as_ref().len();
        let size = u32::try_from(len).map_err(|_| LzwparError::FrameTooLarge {
            bits: len as u64 * 8,
        })?;
        out.extend_from_slice(&size.to_le_bytes());
    }
    out.push(frames.len() as u8);

    Ok(out)
}

/// Slice a container body back into its frames, in index order.
///
/// The size table must account for every payload byte exactly.
pub fn parse_container(body: &[u8]) -> Result<Vec<&[u8]>> {
    let Some((&count, rest)) = body.split_last() else {
        return Err(LzwparError::malformed("empty container"));
    };
    let count = count as usize;
    if count == 0 {
        return Err(LzwparError::malformed("chunk count is zero"));
    }

    let table_len = count * SIZE_FIELD_LEN;
    let Some(payload_len) = rest.len().checked_sub(table_len) else {
        return Err(LzwparError::malformed(format!(
            "{count} chunks need a {table_len}-byte size table, only {} bytes present",
            rest.len()
        )));
    };
    let (payload, table) = rest.split_at(payload_len);

    let mut frames = Vec::with_capacity(count);
    let mut start = 0usize;
    for entry in table.chunks_exact(SIZE_FIELD_LEN) {
        let size =
            read_u32_le(entry).ok_or_else(|| LzwparError::unexpected_eof(4, entry.len()))?;
        let size = size as usize;
        let end = start
            .checked_add(size)
            .filter(|&end| end <= payload.len())
            .ok_or_else(|| {
                LzwparError::malformed(format!(
                    "frame {} of {size} bytes at offset {start} overruns the {}-byte payload",
                    frames.len(),
                    payload.len()
                ))
            })?;
        frames.push(&payload[start..end]);
        start = end;
    }

    if start != payload.len() {
        return Err(LzwparError::malformed(format!(
            "size table covers {start} bytes but the payload is {} bytes",
            payload.len()
        )));
    }

    Ok(frames)
}

/// Check that `extension` is empty or a single `.`-prefixed suffix.
pub fn validate_extension(extension: &str) -> Result<()> {
    if extension.is_empty() {
        return Ok(());
    }
    if !extension.starts_with('.') || extension[1..].contains('.') {
        return Err(LzwparError::invalid_argument(format!(
            "extension {extension:?} must start with its only '.'"
        )));
    }
    Ok(())
}

/// Append the original extension to a finished container.
pub fn append_extension(container: &mut Vec<u8>, extension: &str) -> Result<()> {
    validate_extension(extension)?;
    container.extend_from_slice(extension.as_bytes());
    Ok(())
}

/// Separate a stored artifact into container body and extension.
///
/// The extension candidate starts at the last `.` byte. It is accepted when
/// the bytes before it form a valid container; otherwise the whole artifact
/// must be an extension-less container.
///
/// An artifact written without an extension is ambiguous when its trailing
/// bytes from some `.` onward also look like an extension in front of a valid
/// container. Such an artifact is split at that `.`. Artifacts that carry an
/// extension always split correctly, since the extension holds the last `.`.
pub fn split_artifact(artifact: &[u8]) -> Result<(&[u8], String)> {
    if let Some(dot) = artifact.iter().rposition(|&b| b == b'.') {
        let (body, extension) = artifact.split_at(dot);
        let extension = std::str::from_utf8(extension).ok();
        if let Some(extension) = extension.filter(|e| validate_extension(e).is_ok()) {
            if parse_container(body).is_ok() {
                return Ok((body, extension.to_owned()));
            }
        }
    }

    parse_container(artifact)?;
    Ok((artifact, String::new()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout() {
        let container = write_container(&[vec![1u8, 2, 3], vec![], vec![9]]).unwrap();
        assert_eq!(
            container,
            vec![1, 2, 3, 9, 3, 0, 0, 0, 0, 0, 0, 0, 1, 0, 0, 0, 3]
        );

        let frames = parse_container(&container).unwrap();
        assert_eq!(frames, vec![&[1u8, 2, 3][..], &[][..], &[9][..]]);
    }

    #[test]
    fn test_chunk_count_bounds() {
        let none: [Vec<u8>; 0] = [];
        assert!(write_container(&none).is_err());
        let many = vec![Vec::<u8>::new(); 256];
        assert!(matches!(
            write_container(&many),
            Err(LzwparError::InvalidChunkCount { count: 256 })
        ));
    }

    #[test]
    fn test_malformed_rejected() {
        // Empty, zero count, missing table, overrun, unaccounted bytes.
        for body in [
            &[][..],
            &[0][..],
            &[5, 0, 0, 2][..],
            &[1, 2, 9, 0, 0, 0, 1][..],
            &[1, 2, 3, 2, 0, 0, 0, 1][..],
        ] {
            let err = parse_container(body).unwrap_err();
            assert!(
                matches!(err, LzwparError::MalformedContainer { .. }),
                "{body:?} gave {err}"
            );
        }
    }

    #[test]
    fn test_extension_roundtrip() {
        let mut artifact = write_container(&[vec![b'.', b'x', 0, 0]]).unwrap();
        append_extension(&mut artifact, ".txt").unwrap();

        let (body, extension) = split_artifact(&artifact).unwrap();
        assert_eq!(extension, ".txt");
        assert_eq!(parse_container(body).unwrap(), vec![&[b'.', b'x', 0, 0][..]]);
    }

    #[test]
    fn test_extensionless_artifact() {
        // A '.' inside the payload must not be mistaken for an extension.
        let artifact = write_container(&[vec![b'a', b'.', b'b']]).unwrap();
        let (body, extension) = split_artifact(&artifact).unwrap();
        assert_eq!(body, &artifact[..]);
        assert!(extension.is_empty());
    }

    #[test]
    fn test_validate_extension() {
        assert!(validate_extension("").is_ok());
        assert!(validate_extension(".tar").is_ok());
        assert!(validate_extension("txt").is_err());
        assert!(validate_extension(".tar.gz").is_err());
    }
}
