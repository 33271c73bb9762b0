//! Streaming chunk planning and pooled chunk decoding.
//!
//! A recording is never loaded whole: [`ChunkPlan`] describes fixed-duration
//! byte ranges computed from the header alone, and [`StreamingChunker`]
//! decodes one range at a time into scratch buffers that grow to the largest
//! chunk seen and are freed when the run ends. Peak memory is one chunk of
//! raw bytes plus one chunk of decoded samples, independent of file length.

use std::fs::File;
use std::io::{Read, Seek, SeekFrom};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::{ChunkError, FormatError, WavHeader, DEFAULT_CHUNK_SECONDS};

/// Byte-range descriptor for one chunk of a WAV payload.
///
/// Holds no sample data. `start_offset..end_offset` is frame-aligned and
/// lies inside the data region described by `header`.
#[derive(Debug, Clone)]
pub struct StreamingChunk {
    pub start_offset: u64,
    pub end_offset: u64,
    pub header: Arc<WavHeader>,
}

impl StreamingChunk {
    pub fn byte_len(&self) -> u64 {
        self.end_offset - self.start_offset
    }

    /// Wall-clock span covered by this chunk.
    pub fn duration_seconds(&self) -> f64 {
        self.byte_len() as f64 / self.header.bytes_per_second() as f64
    }
}

/// Lazy, finite, restartable sequence of chunk descriptors.
///
/// Pure byte math over the parsed header: ranges are contiguous,
/// non-overlapping, and their union is exactly the data region. Cloning
/// restarts the sequence; iterating twice yields identical descriptors.
#[derive(Debug, Clone)]
pub struct ChunkPlan {
    header: Arc<WavHeader>,
    bytes_per_chunk: u64,
    next_offset: u64,
    end_offset: u64,
}

impl ChunkPlan {
    fn new(header: Arc<WavHeader>, bytes_per_chunk: u64) -> Self {
        let next_offset = header.data_offset;
        let end_offset = header.data_offset + header.data_len;
        Self {
            header,
            bytes_per_chunk,
            next_offset,
            end_offset,
        }
    }

    pub fn header(&self) -> &Arc<WavHeader> {
        &self.header
    }
}

impl Iterator for ChunkPlan {
    type Item = StreamingChunk;

    fn next(&mut self) -> Option<StreamingChunk> {
        if self.next_offset >= self.end_offset {
            return None;
        }
        let start_offset = self.next_offset;
        let end_offset = (start_offset + self.bytes_per_chunk).min(self.end_offset);
        self.next_offset = end_offset;
        Some(StreamingChunk {
            start_offset,
            end_offset,
            header: Arc::clone(&self.header),
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.end_offset.saturating_sub(self.next_offset);
        let n = remaining.div_ceil(self.bytes_per_chunk) as usize;
        (n, Some(n))
    }
}

impl ExactSizeIterator for ChunkPlan {}

/// Splits one WAV file into chunks and decodes them through reusable
/// scratch buffers.
///
/// One chunker serves one transcription run. Scratch growth is monotonic
/// within the run; [`StreamingChunker::release_buffers`] frees both buffers
/// and is called on every exit path, including stop and failure.
pub struct StreamingChunker {
    path: PathBuf,
    header: Arc<WavHeader>,
    target_chunk_secs: u32,
    byte_buf: Vec<u8>,
    sample_buf: Vec<f32>,
}

impl StreamingChunker {
    /// Parses the header at `path` and prepares a chunker with the given
    /// target chunk duration (clamped to at least one second).
    pub fn open(path: impl AsRef<Path>, target_chunk_secs: u32) -> Result<Self, FormatError> {
        let path = path.as_ref().to_path_buf();
        let header = Arc::new(WavHeader::parse(&path)?);
        tracing::debug!(
            path = %path.display(),
            sample_rate = header.sample_rate,
            channels = header.channels,
            bits = header.bits_per_sample,
            data_len = header.data_len,
            "opened wav for chunked reading"
        );
        Ok(Self {
            path,
            header,
            target_chunk_secs: target_chunk_secs.max(1),
            byte_buf: Vec::new(),
            sample_buf: Vec::new(),
        })
    }

    /// Opens with the default 30-second target.
    pub fn open_default(path: impl AsRef<Path>) -> Result<Self, FormatError> {
        Self::open(path, DEFAULT_CHUNK_SECONDS)
    }

    pub fn header(&self) -> &Arc<WavHeader> {
        &self.header
    }

    /// Plans the chunk sequence for the opened file.
    ///
    /// `bytes_per_chunk` is the target duration times the byte rate,
    /// floored to a whole-frame boundary; the last chunk may be shorter.
    pub fn chunks(&self) -> ChunkPlan {
        let raw = self.target_chunk_secs as u64 * self.header.bytes_per_second();
        let aligned = raw - raw % self.header.block_align();
        let bytes_per_chunk = aligned.max(self.header.block_align());
        ChunkPlan::new(Arc::clone(&self.header), bytes_per_chunk)
    }

    /// Reads and decodes one chunk into the sample scratch buffer.
    ///
    /// Opens the file, seeks to the chunk's start offset, reads its raw
    /// bytes, and decodes them to normalized floats in [-1.0, 1.0)
    /// according to the header's bit depth. The returned slice borrows the
    /// scratch and is valid until the next call.
    pub fn read_chunk(&mut self, chunk: &StreamingChunk) -> Result<&[f32], ChunkError> {
        let byte_len = chunk.byte_len() as usize;
        let sample_len = byte_len / self.header.bytes_per_sample() as usize;

        ensure_scratch(&mut self.byte_buf, byte_len)?;
        ensure_scratch(&mut self.sample_buf, sample_len)?;

        let mut file = File::open(&self.path)?;
        file.seek(SeekFrom::Start(chunk.start_offset))?;
        file.read_exact(&mut self.byte_buf[..byte_len])?;

        decode_samples(
            &self.byte_buf[..byte_len],
            self.header.bits_per_sample,
            &mut self.sample_buf[..sample_len],
        );
        Ok(&self.sample_buf[..sample_len])
    }

    /// Frees both scratch buffers.
    pub fn release_buffers(&mut self) {
        let (bytes, samples) = self.scratch_capacities();
        self.byte_buf = Vec::new();
        self.sample_buf = Vec::new();
        tracing::debug!(bytes, samples, "released chunk scratch buffers");
    }

    /// Current scratch capacities as (raw bytes, decoded samples).
    pub fn scratch_capacities(&self) -> (usize, usize) {
        (self.byte_buf.capacity(), self.sample_buf.capacity())
    }
}

/// Grows `buf` to hold `needed` elements without ever shrinking it.
/// Allocation failure is reported instead of aborting the process.
fn ensure_scratch<T: Copy + Default>(buf: &mut Vec<T>, needed: usize) -> Result<(), ChunkError> {
    if buf.capacity() < needed {
        let additional = needed - buf.len();
        buf.try_reserve_exact(additional)
            .map_err(|_| ChunkError::OutOfMemory {
                needed: needed * std::mem::size_of::<T>(),
            })?;
    }
    if buf.len() < needed {
        buf.resize(needed, T::default());
    }
    Ok(())
}

fn decode_samples(bytes: &[u8], bits_per_sample: u16, out: &mut [f32]) {
    match bits_per_sample {
        // 8-bit WAV is unsigned, centered on 128.
        8 => {
            for (i, b) in bytes.iter().enumerate() {
                out[i] = (*b as f32 - 128.0) / 128.0;
            }
        }
        16 => {
            for (i, pair) in bytes.chunks_exact(2).enumerate() {
                out[i] = i16::from_le_bytes([pair[0], pair[1]]) as f32 / 32768.0;
            }
        }
        24 => {
            for (i, tri) in bytes.chunks_exact(3).enumerate() {
                let raw = i32::from_le_bytes([0, tri[0], tri[1], tri[2]]) >> 8;
                out[i] = raw as f32 / 8_388_608.0;
            }
        }
        32 => {
            for (i, quad) in bytes.chunks_exact(4).enumerate() {
                out[i] = i32::from_le_bytes([quad[0], quad[1], quad[2], quad[3]]) as f32
                    / 2_147_483_648.0;
            }
        }
        // Unreachable: header validation restricts the depth.
        _ => out.fill(0.0),
    }
}
