//! Bounds-checked report reading and building
//!
//! Wire reports are decoded with explicit byte offsets. [`ReportReader`] never
//! indexes out of range: every accessor returns [`ReportError::TooShort`]
//! instead.

use crate::{ReportError, ReportResult};

#[derive(Debug, Clone, Copy)]
pub struct ReportReader<'a> {
    data: &'a [u8],
}

impl<'a> ReportReader<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data }
    }

    /// Wrap `data`, failing unless it holds at least `need` bytes.
    pub fn with_min_len(data: &'a [u8], need: usize) -> ReportResult<Self> {
        if data.len() < need {
            return Err(ReportError::TooShort {
                need,
                got: data.len(),
            });
        }
        Ok(Self { data })
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn as_slice(&self) -> &'a [u8] {
        self.data
    }

    /// First byte of the report, which is the report id for every supported family.
    pub fn report_id(&self) -> ReportResult<u8> {
        self.u8_at(0)
    }

    /// Fail with `UnexpectedReportId` unless byte 0 is `expected`.
    pub fn expect_report_id(&self, expected: u8) -> ReportResult<()> {
        let got = self.report_id()?;
        if got != expected {
            return Err(ReportError::UnexpectedReportId { expected, got });
        }
        Ok(())
    }

    pub fn slice_at(&self, offset: usize, len: usize) -> ReportResult<&'a [u8]> {
        let end = offset.checked_add(len).ok_or(ReportError::TooShort {
            need: usize::MAX,
            got: self.data.len(),
        })?;
        self.data.get(offset..end).ok_or(ReportError::TooShort {
            need: end,
            got: self.data.len(),
        })
    }

    pub fn bytes_at<const N: usize>(&self, offset: usize) -> ReportResult<[u8; N]> {
        let mut out = [0u8; N];
        out.copy_from_slice(self.slice_at(offset, N)?);
        Ok(out)
    }

    pub fn u8_at(&self, offset: usize) -> ReportResult<u8> {
        let [b] = self.bytes_at::<1>(offset)?;
        Ok(b)
    }

    pub fn u16_le_at(&self, offset: usize) -> ReportResult<u16> {
        Ok(u16::from_le_bytes(self.bytes_at(offset)?))
    }

    pub fn u16_be_at(&self, offset: usize) -> ReportResult<u16> {
        Ok(u16::from_be_bytes(self.bytes_at(offset)?))
    }

    /// Three bytes, least significant first, zero-extended.
    pub fn u24_le_at(&self, offset: usize) -> ReportResult<u32> {
        let [b0, b1, b2] = self.bytes_at::<3>(offset)?;
        Ok(u32::from_le_bytes([b0, b1, b2, 0]))
    }

    pub fn u32_le_at(&self, offset: usize) -> ReportResult<u32> {
        Ok(u32::from_le_bytes(self.bytes_at(offset)?))
    }

    /// Sub-reader over `len` bytes starting at `offset`.
    pub fn sub_reader(&self, offset: usize, len: usize) -> ReportResult<ReportReader<'a>> {
        Ok(ReportReader::new(self.slice_at(offset, len)?))
    }
}

/// Little builder for outgoing reports.
#[derive(Debug, Clone, Default)]
pub struct ReportBuilder {
    buffer: Vec<u8>,
}

impl ReportBuilder {
    pub fn new() -> Self {
        Self { buffer: Vec::new() }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buffer: Vec::with_capacity(capacity),
        }
    }

    pub fn write_u8(&mut self, value: u8) -> &mut Self {
        self.buffer.push(value);
        self
    }

    pub fn write_u16_le(&mut self, value: u16) -> &mut Self {
        self.buffer.extend_from_slice(&value.to_le_bytes());
        self
    }

    pub fn write_u16_be(&mut self, value: u16) -> &mut Self {
        self.buffer.extend_from_slice(&value.to_be_bytes());
        self
    }

    /// Low 24 bits of `value`, most significant first.
    pub fn write_u24_be(&mut self, value: u32) -> &mut Self {
        let [_, b2, b1, b0] = value.to_be_bytes();
        self.buffer.extend_from_slice(&[b2, b1, b0]);
        self
    }

    pub fn write_bytes(&mut self, data: &[u8]) -> &mut Self {
        self.buffer.extend_from_slice(data);
        self
    }

    /// Append `count` zero bytes.
    pub fn write_zeros(&mut self, count: usize) -> &mut Self {
        self.buffer.resize(self.buffer.len().saturating_add(count), 0);
        self
    }

    /// Zero-pad up to `len` bytes. Never truncates.
    pub fn pad_to(&mut self, len: usize) -> &mut Self {
        if self.buffer.len() < len {
            self.buffer.resize(len, 0);
        }
        self
    }

    pub fn into_inner(self) -> Vec<u8> {
        self.buffer
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.buffer
    }

    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reader_u8_bounds() -> ReportResult<()> {
        let data = [0x01, 0x02, 0x03];
        let reader = ReportReader::new(&data);

        assert_eq!(reader.u8_at(0)?, 0x01);
        assert_eq!(reader.u8_at(2)?, 0x03);
        assert_eq!(
            reader.u8_at(3),
            Err(ReportError::TooShort { need: 4, got: 3 })
        );
        Ok(())
    }

    #[test]
    fn test_reader_multi_byte() -> ReportResult<()> {
        let data = [0x34, 0x12, 0x78, 0x56, 0x34, 0x12];
        let reader = ReportReader::new(&data);

        assert_eq!(reader.u16_le_at(0)?, 0x1234);
        assert_eq!(reader.u16_be_at(0)?, 0x3412);
        assert_eq!(reader.u24_le_at(0)?, 0x78_1234);
        assert_eq!(reader.u32_le_at(2)?, 0x1234_5678);
        Ok(())
    }

    #[test]
    fn test_min_len() {
        let data = [0u8; 8];
        assert!(ReportReader::with_min_len(&data, 8).is_ok());
        assert_eq!(
            ReportReader::with_min_len(&data, 9).map(|r| r.len()),
            Err(ReportError::TooShort { need: 9, got: 8 })
        );
    }

    #[test]
    fn test_expect_report_id() {
        let data = [0x21, 0x00];
        let reader = ReportReader::new(&data);
        assert_eq!(reader.expect_report_id(0x21), Ok(()));
        assert_eq!(
            reader.expect_report_id(0x30),
            Err(ReportError::UnexpectedReportId {
                expected: 0x30,
                got: 0x21
            })
        );
        assert!(ReportReader::new(&[]).report_id().is_err());
    }

    #[test]
    fn test_slice_overflow_is_error() {
        let data = [0u8; 4];
        let reader = ReportReader::new(&data);
        assert!(reader.slice_at(usize::MAX, 2).is_err());
        assert!(reader.slice_at(2, 3).is_err());
    }

    #[test]
    fn test_builder() {
        let mut builder = ReportBuilder::new();
        builder
            .write_u8(0x16)
            .write_u24_be(0xA4_00F0)
            .write_u16_be(0x0006)
            .write_u16_le(0x1234)
            .write_bytes(&[0xAA])
            .pad_to(12);

        assert_eq!(
            builder.into_inner(),
            vec![0x16, 0xA4, 0x00, 0xF0, 0x00, 0x06, 0x34, 0x12, 0xAA, 0, 0, 0]
        );
    }

    #[test]
    fn test_pad_never_truncates() {
        let mut builder = ReportBuilder::with_capacity(4);
        builder.write_bytes(&[1, 2, 3]).pad_to(2).write_zeros(1);
        assert_eq!(builder.as_slice(), &[1, 2, 3, 0]);
        assert_eq!(builder.len(), 4);
        assert!(!builder.is_empty());
    }
}
