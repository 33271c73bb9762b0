//! WAV header parsing.
//!
//! Reads just enough of the RIFF container to locate and describe the PCM
//! payload. The payload itself is never read here; chunk decoding happens
//! in [`crate::StreamingChunker`] from the byte offsets recorded in the
//! header.

use std::fs::File;
use std::io::{ErrorKind, Read, Seek, SeekFrom};
use std::path::Path;

use crate::FormatError;

const PCM_FORMAT_TAG: u16 = 1;

/// Parsed PCM format and payload location for one WAV file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WavHeader {
    /// Samples per second per channel.
    pub sample_rate: u32,
    /// Interleaved channel count.
    pub channels: u16,
    /// Bits per sample: 8, 16, 24 or 32.
    pub bits_per_sample: u16,
    /// Absolute byte offset of the first payload byte.
    pub data_offset: u64,
    /// Byte length of the payload.
    pub data_len: u64,
}

impl WavHeader {
    /// Parses the header of the WAV file at `path`.
    ///
    /// Walks the RIFF sub-chunks until both `fmt ` and `data` are found,
    /// skipping anything else. Every malformation maps to a
    /// [`FormatError`]; a file that fails here produces no chunks.
    pub fn parse(path: impl AsRef<Path>) -> Result<Self, FormatError> {
        let mut file = File::open(path.as_ref())?;
        let file_len = file.metadata()?.len();

        let mut riff = [0u8; 12];
        file.read_exact(&mut riff)?;
        if &riff[0..4] != b"RIFF" {
            return Err(FormatError::MissingRiff);
        }
        if &riff[8..12] != b"WAVE" {
            return Err(FormatError::MissingWave);
        }

        let mut fmt: Option<(u16, u16, u32, u16)> = None;
        let mut data: Option<(u64, u64)> = None;

        let mut chunk_head = [0u8; 8];
        while fmt.is_none() || data.is_none() {
            match file.read_exact(&mut chunk_head) {
                Ok(()) => {}
                Err(e) if e.kind() == ErrorKind::UnexpectedEof => break,
                Err(e) => return Err(e.into()),
            }
            let size = u32::from_le_bytes([
                chunk_head[4],
                chunk_head[5],
                chunk_head[6],
                chunk_head[7],
            ]) as u64;
            // Sub-chunks are word-aligned; odd sizes carry a pad byte.
            let padded = size + (size & 1);

            match &chunk_head[0..4] {
                b"fmt " => {
                    if size < 16 {
                        return Err(FormatError::MalformedFmt);
                    }
                    let mut buf = [0u8; 16];
                    file.read_exact(&mut buf)?;
                    let format_tag = u16::from_le_bytes([buf[0], buf[1]]);
                    let channels = u16::from_le_bytes([buf[2], buf[3]]);
                    let sample_rate = u32::from_le_bytes([buf[4], buf[5], buf[6], buf[7]]);
                    let bits_per_sample = u16::from_le_bytes([buf[14], buf[15]]);
                    fmt = Some((format_tag, channels, sample_rate, bits_per_sample));
                    file.seek(SeekFrom::Current((padded - 16) as i64))?;
                }
                b"data" => {
                    let offset = file.stream_position()?;
                    data = Some((offset, size));
                    file.seek(SeekFrom::Current(padded as i64))?;
                }
                _ => {
                    file.seek(SeekFrom::Current(padded as i64))?;
                }
            }
        }

        let (format_tag, channels, sample_rate, bits_per_sample) =
            fmt.ok_or(FormatError::MissingFmt)?;
        let (data_offset, data_len) = data.ok_or(FormatError::MissingData)?;

        if format_tag != PCM_FORMAT_TAG {
            return Err(FormatError::UnsupportedEncoding(format_tag));
        }
        if channels == 0 {
            return Err(FormatError::InvalidChannels(channels));
        }
        if sample_rate == 0 {
            return Err(FormatError::InvalidSampleRate(sample_rate));
        }
        if !matches!(bits_per_sample, 8 | 16 | 24 | 32) {
            return Err(FormatError::UnsupportedBitDepth(bits_per_sample));
        }
        if data_offset + data_len > file_len {
            return Err(FormatError::TruncatedData {
                declared: data_len,
                available: file_len - data_offset,
            });
        }

        Ok(Self {
            sample_rate,
            channels,
            bits_per_sample,
            data_offset,
            data_len,
        })
    }

    /// Bytes per single-channel sample.
    pub fn bytes_per_sample(&self) -> u64 {
        (self.bits_per_sample / 8) as u64
    }

    /// Bytes per frame (one sample across all channels).
    pub fn block_align(&self) -> u64 {
        self.bytes_per_sample() * self.channels as u64
    }

    pub fn bytes_per_second(&self) -> u64 {
        self.block_align() * self.sample_rate as u64
    }

    /// Total interleaved samples in the payload.
    pub fn sample_count(&self) -> u64 {
        self.data_len / self.bytes_per_sample()
    }

    pub fn duration_seconds(&self) -> f64 {
        self.data_len as f64 / self.bytes_per_second() as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Builds a minimal PCM WAV byte image with a standard 44-byte header.
    fn pcm_wav_bytes(channels: u16, sample_rate: u32, bits: u16, data: &[u8]) -> Vec<u8> {
        let block = channels as u32 * (bits as u32 / 8);
        let mut out = Vec::new();
        out.extend_from_slice(b"RIFF");
        out.extend_from_slice(&((36 + data.len()) as u32).to_le_bytes());
        out.extend_from_slice(b"WAVE");
        out.extend_from_slice(b"fmt ");
        out.extend_from_slice(&16u32.to_le_bytes());
        out.extend_from_slice(&1u16.to_le_bytes());
        out.extend_from_slice(&channels.to_le_bytes());
        out.extend_from_slice(&sample_rate.to_le_bytes());
        out.extend_from_slice(&(sample_rate * block).to_le_bytes());
        out.extend_from_slice(&(block as u16).to_le_bytes());
        out.extend_from_slice(&bits.to_le_bytes());
        out.extend_from_slice(b"data");
        out.extend_from_slice(&(data.len() as u32).to_le_bytes());
        out.extend_from_slice(data);
        out
    }

    fn write_temp(bytes: &[u8]) -> (tempfile::TempDir, std::path::PathBuf) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sample.wav");
        std::fs::write(&path, bytes).unwrap();
        (dir, path)
    }

    #[test]
    fn test_parse_reads_fmt_and_data() {
        let data = vec![0u8; 32000];
        let (_dir, path) = write_temp(&pcm_wav_bytes(1, 16000, 16, &data));

        let header = WavHeader::parse(&path).unwrap();
        assert_eq!(header.sample_rate, 16000);
        assert_eq!(header.channels, 1);
        assert_eq!(header.bits_per_sample, 16);
        assert_eq!(header.data_offset, 44);
        assert_eq!(header.data_len, 32000);
        assert_eq!(header.sample_count(), 16000);
        assert!((header.duration_seconds() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_parse_skips_unknown_subchunks() {
        let data = vec![0u8; 100];
        let mut bytes = Vec::new();
        bytes.extend_from_slice(b"RIFF");
        bytes.extend_from_slice(&0u32.to_le_bytes());
        bytes.extend_from_slice(b"WAVE");
        // LIST chunk with an odd size to exercise pad-byte skipping.
        bytes.extend_from_slice(b"LIST");
        bytes.extend_from_slice(&5u32.to_le_bytes());
        bytes.extend_from_slice(&[1, 2, 3, 4, 5, 0]);
        let tail = pcm_wav_bytes(2, 44100, 16, &data);
        bytes.extend_from_slice(&tail[12..]);
        let (_dir, path) = write_temp(&bytes);

        let header = WavHeader::parse(&path).unwrap();
        assert_eq!(header.channels, 2);
        assert_eq!(header.sample_rate, 44100);
        assert_eq!(header.data_len, 100);
    }

    #[test]
    fn test_parse_rejects_bad_magic() {
        let (_dir, path) = write_temp(b"RIFX\x00\x00\x00\x00WAVEfmt ");
        assert!(matches!(
            WavHeader::parse(&path),
            Err(FormatError::MissingRiff)
        ));

        let (_dir2, path2) = write_temp(b"RIFF\x00\x00\x00\x00WEVAfmt ");
        assert!(matches!(
            WavHeader::parse(&path2),
            Err(FormatError::MissingWave)
        ));
    }

    #[test]
    fn test_parse_rejects_missing_fmt() {
        let mut bytes = Vec::new();
        bytes.extend_from_slice(b"RIFF");
        bytes.extend_from_slice(&20u32.to_le_bytes());
        bytes.extend_from_slice(b"WAVE");
        bytes.extend_from_slice(b"data");
        bytes.extend_from_slice(&4u32.to_le_bytes());
        bytes.extend_from_slice(&[0, 0, 0, 0]);
        let (_dir, path) = write_temp(&bytes);

        assert!(matches!(
            WavHeader::parse(&path),
            Err(FormatError::MissingFmt)
        ));
    }

    #[test]
    fn test_parse_rejects_non_pcm_encoding() {
        let mut bytes = pcm_wav_bytes(1, 16000, 32, &[0u8; 8]);
        // Overwrite the format tag with IEEE float.
        bytes[20] = 3;
        let (_dir, path) = write_temp(&bytes);

        assert!(matches!(
            WavHeader::parse(&path),
            Err(FormatError::UnsupportedEncoding(3))
        ));
    }

    #[test]
    fn test_parse_rejects_unsupported_bit_depth() {
        let mut bytes = pcm_wav_bytes(1, 16000, 16, &[0u8; 8]);
        bytes[34] = 12;
        let (_dir, path) = write_temp(&bytes);

        assert!(matches!(
            WavHeader::parse(&path),
            Err(FormatError::UnsupportedBitDepth(12))
        ));
    }

    #[test]
    fn test_parse_rejects_truncated_data() {
        let mut bytes = pcm_wav_bytes(1, 16000, 16, &[0u8; 16]);
        let declared = 4096u32;
        let len = bytes.len();
        bytes[len - 16 - 4..len - 16].copy_from_slice(&declared.to_le_bytes());
        let (_dir, path) = write_temp(&bytes);

        match WavHeader::parse(&path) {
            Err(FormatError::TruncatedData {
                declared,
                available,
            }) => {
                assert_eq!(declared, 4096);
                assert_eq!(available, 16);
            }
            other => panic!("expected TruncatedData, got {other:?}"),
        }
    }

    #[test]
    fn test_parse_rejects_zero_channels() {
        let bytes = pcm_wav_bytes(1, 16000, 16, &[0u8; 4]);
        let mut bytes = bytes;
        bytes[22] = 0;
        bytes[23] = 0;
        let (_dir, path) = write_temp(&bytes);

        assert!(matches!(
            WavHeader::parse(&path),
            Err(FormatError::InvalidChannels(0))
        ));
    }
}
