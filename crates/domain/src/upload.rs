//! Chunked file uploads.
//!
//! Files are cut into fixed-size pieces and posted one at a time in index
//! order. There is no resumption: an upload either sends every chunk or
//! is reported as failed at the first chunk the server refused.

use std::num::NonZeroUsize;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::request::{FilePart, MultipartForm};

/// Size of every chunk but the last: 1 MiB.
pub const CHUNK_SIZE: NonZeroUsize = match NonZeroUsize::new(1024 * 1024) {
    Some(size) => size,
    None => unreachable!(),
};

/// Splits `buffer` into consecutive slices of `size` bytes.
///
/// The last slice may be shorter. An empty buffer yields no slices, and
/// concatenating the slices in order gives back `buffer`.
pub fn chunk(buffer: &[u8], size: NonZeroUsize) -> std::slice::Chunks<'_, u8> {
    buffer.chunks(size.get())
}

/// A file picked for upload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attachment {
    /// File name reported to the server
    pub filename: String,
    /// MIME type
    pub mime_type: String,
    /// Content
    #[serde(skip)]
    pub bytes: Vec<u8>,
}

impl Attachment {
    /// Creates an attachment.
    #[must_use]
    pub fn new(filename: impl Into<String>, mime_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            filename: filename.into(),
            mime_type: mime_type.into(),
            bytes,
        }
    }

    /// Cuts the attachment into upload chunks sharing `upload_id`.
    ///
    /// An empty file still produces one empty chunk so the server learns
    /// about it.
    #[must_use]
    pub fn chunks(&self, upload_id: Uuid, size: NonZeroUsize) -> Vec<UploadChunk<'_>> {
        let pieces: Vec<&[u8]> = if self.bytes.is_empty() {
            vec![&self.bytes[..]]
        } else {
            chunk(&self.bytes, size).collect()
        };
        let total_chunks = pieces.len();

        pieces
            .into_iter()
            .enumerate()
            .map(|(index, bytes)| UploadChunk {
                index,
                total_chunks,
                bytes,
                upload_id,
                filename: &self.filename,
                mime_type: &self.mime_type,
            })
            .collect()
    }
}

/// One piece of an attachment plus its position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UploadChunk<'a> {
    /// Zero-based position
    pub index: usize,
    /// Number of chunks in the upload
    pub total_chunks: usize,
    /// Bytes of this chunk
    pub bytes: &'a [u8],
    /// Identifier shared by all chunks of one upload
    pub upload_id: Uuid,
    /// File name
    pub filename: &'a str,
    /// MIME type
    pub mime_type: &'a str,
}

impl UploadChunk<'_> {
    /// Builds the multipart body for this chunk.
    #[must_use]
    pub fn to_multipart(&self) -> MultipartForm {
        MultipartForm::new()
            .text("chunk_index", self.index.to_string())
            .text("total_chunks", self.total_chunks.to_string())
            .text("upload_uuid", self.upload_id.to_string())
            .text("filename", self.filename)
            .file(FilePart {
                field: "file".to_string(),
                filename: self.filename.to_string(),
                mime_type: self.mime_type.to_string(),
                bytes: self.bytes.to_vec(),
            })
    }
}

/// Outcome of uploading every chunk of one attachment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadReport {
    /// Identifier sent with every chunk
    pub upload_id: Uuid,
    /// Number of chunks the file was cut into
    pub total_chunks: usize,
    /// Chunks the server accepted
    pub chunks_sent: usize,
    /// True only if every chunk was accepted
    pub completed: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    fn size(n: usize) -> NonZeroUsize {
        NonZeroUsize::new(n).unwrap_or(NonZeroUsize::MIN)
    }

    #[test]
    fn test_chunk_size_is_one_mebibyte() {
        assert_eq!(CHUNK_SIZE.get(), 1_048_576);
    }

    #[test]
    fn test_chunk_exact_multiple() {
        let data = [1u8, 2, 3, 4, 5, 6];
        let pieces: Vec<&[u8]> = chunk(&data, size(3)).collect();
        assert_eq!(pieces, vec![&[1u8, 2, 3][..], &[4, 5, 6][..]]);
    }

    #[test]
    fn test_chunk_empty_buffer() {
        assert_eq!(chunk(&[], size(4)).count(), 0);
    }

    #[test]
    fn test_attachment_chunks_carry_positions() {
        let attachment = Attachment::new("bonalu.jpg", "image/jpeg", vec![0; 5]);
        let id = Uuid::nil();
        let chunks = attachment.chunks(id, size(2));
        assert_eq!(chunks.len(), 3);
        assert_eq!(chunks[2].index, 2);
        assert_eq!(chunks[2].total_chunks, 3);
        assert_eq!(chunks[2].bytes.len(), 1);
        assert!(chunks.iter().all(|c| c.upload_id == id));
    }

    #[test]
    fn test_empty_attachment_is_one_empty_chunk() {
        let attachment = Attachment::new("empty.txt", "text/plain", Vec::new());
        let chunks = attachment.chunks(Uuid::nil(), CHUNK_SIZE);
        assert_eq!(chunks.len(), 1);
        assert_eq!(chunks[0].total_chunks, 1);
        assert!(chunks[0].bytes.is_empty());
    }

    #[test]
    fn test_multipart_fields() {
        let attachment = Attachment::new("a.png", "image/png", vec![9, 9]);
        let chunks = attachment.chunks(Uuid::nil(), CHUNK_SIZE);
        let form = chunks[0].to_multipart();
        assert_eq!(
            form.fields,
            vec![
                ("chunk_index".to_string(), "0".to_string()),
                ("total_chunks".to_string(), "1".to_string()),
                ("upload_uuid".to_string(), Uuid::nil().to_string()),
                ("filename".to_string(), "a.png".to_string()),
            ]
        );
        let file = form.file.unwrap_or_else(|| unreachable!());
        assert_eq!(file.field, "file");
        assert_eq!(file.bytes, vec![9, 9]);
    }

    proptest! {
        #[test]
        fn prop_chunks_cover_buffer_exactly(
            data in proptest::collection::vec(any::<u8>(), 0..2048),
            s in 1usize..300,
        ) {
            let pieces: Vec<&[u8]> = chunk(&data, size(s)).collect();

            prop_assert_eq!(pieces.len(), data.len().div_ceil(s));
            if let Some((last, init)) = pieces.split_last() {
                prop_assert!(init.iter().all(|p| p.len() == s));
                let expected_last = if data.len() % s == 0 { s } else { data.len() % s };
                prop_assert_eq!(last.len(), expected_last);
            }
            prop_assert_eq!(pieces.concat(), data.clone());
        }
    }
}
