//! Binary serialization primitives.
//!
//! Fixed-width integers are little-endian. Variable-length data is prefixed
//! with a var-int: values below `0xFD` take one byte, larger values are
//! marked with `0xFD`/`0xFE`/`0xFF` followed by 2, 4 or 8 bytes.

use thiserror::Error;

/// Errors raised while reading serialized data.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum IoError {
    /// The input ended before the value was complete.
    #[error("unexpected end of data at offset {0}")]
    EndOfStream(usize),

    /// A length prefix exceeded the caller's bound.
    #[error("length {len} exceeds maximum {max}")]
    TooLarge {
        /// Decoded length.
        len: u64,
        /// Caller bound.
        max: u64,
    },

    /// The data was structurally invalid.
    #[error("invalid format: {0}")]
    Format(String),
}

/// Result type for IO operations.
pub type IoResult<T> = std::result::Result<T, IoError>;

/// Objects with a canonical binary form.
pub trait Serializable {
    /// Writes the object.
    fn serialize(&self, writer: &mut BinaryWriter);

    /// Reads the object.
    fn deserialize(reader: &mut MemoryReader) -> IoResult<Self>
    where
        Self: Sized;
}

/// Conversions between serializable objects and byte arrays.
pub trait SerializableExt: Serializable {
    /// Encodes the object into a fresh byte array.
    fn to_array(&self) -> Vec<u8> {
        let mut writer = BinaryWriter::new();
        self.serialize(&mut writer);
        writer.into_bytes()
    }

    /// Decodes an object, rejecting trailing bytes.
    fn from_array(data: &[u8]) -> IoResult<Self>
    where
        Self: Sized,
    {
        let mut reader = MemoryReader::new(data);
        let value = Self::deserialize(&mut reader)?;
        if reader.remaining() != 0 {
            return Err(IoError::Format(format!(
                "{} trailing bytes",
                reader.remaining()
            )));
        }
        Ok(value)
    }
}

impl<T: Serializable> SerializableExt for T {}

/// Append-only byte buffer writer.
#[derive(Debug, Default, Clone)]
pub struct BinaryWriter {
    buffer: Vec<u8>,
}

impl BinaryWriter {
    /// Creates an empty writer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Writes a single byte.
    pub fn write_u8(&mut self, value: u8) {
        self.buffer.push(value);
    }

    /// Writes a boolean as one byte.
    pub fn write_bool(&mut self, value: bool) {
        self.write_u8(u8::from(value));
    }

    /// Writes a little-endian u16.
    pub fn write_u16(&mut self, value: u16) {
        self.buffer.extend_from_slice(&value.to_le_bytes());
    }

    /// Writes a little-endian u32.
    pub fn write_u32(&mut self, value: u32) {
        self.buffer.extend_from_slice(&value.to_le_bytes());
    }

    /// Writes a little-endian u64.
    pub fn write_u64(&mut self, value: u64) {
        self.buffer.extend_from_slice(&value.to_le_bytes());
    }

    /// Writes raw bytes without a prefix.
    pub fn write_bytes(&mut self, value: &[u8]) {
        self.buffer.extend_from_slice(value);
    }

    /// Writes a variable-length integer.
    pub fn write_var_int(&mut self, value: u64) {
        if value < 0xFD {
            self.write_u8(value as u8);
        } else if value <= 0xFFFF {
            self.write_u8(0xFD);
            self.write_u16(value as u16);
        } else if value <= 0xFFFF_FFFF {
            self.write_u8(0xFE);
            self.write_u32(value as u32);
        } else {
            self.write_u8(0xFF);
            self.write_u64(value);
        }
    }

    /// Writes length-prefixed bytes.
    pub fn write_var_bytes(&mut self, value: &[u8]) {
        self.write_var_int(value.len() as u64);
        self.write_bytes(value);
    }

    /// Writes a length-prefixed UTF-8 string.
    pub fn write_var_string(&mut self, value: &str) {
        self.write_var_bytes(value.as_bytes());
    }

    /// Writes `None` as `0` and `Some` as `1` followed by the value.
    pub fn write_optional<T: Serializable>(&mut self, value: Option<&T>) {
        match value {
            Some(inner) => {
                self.write_bool(true);
                inner.serialize(self);
            }
            None => self.write_bool(false),
        }
    }

    /// Bytes written so far.
    pub fn as_bytes(&self) -> &[u8] {
        &self.buffer
    }

    /// Consumes the writer.
    pub fn into_bytes(self) -> Vec<u8> {
        self.buffer
    }
}

/// Cursor over a borrowed byte slice.
#[derive(Debug, Clone)]
pub struct MemoryReader<'a> {
    data: &'a [u8],
    position: usize,
}

impl<'a> MemoryReader<'a> {
    /// Creates a reader positioned at the start of `data`.
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, position: 0 }
    }

    /// Current offset.
    pub fn position(&self) -> usize {
        self.position
    }

    /// Bytes left to read.
    pub fn remaining(&self) -> usize {
        self.data.len() - self.position
    }

    /// Reads exactly `count` bytes.
    pub fn read_bytes(&mut self, count: usize) -> IoResult<&'a [u8]> {
        if self.remaining() < count {
            return Err(IoError::EndOfStream(self.position));
        }
        let slice = &self.data[self.position..self.position + count];
        self.position += count;
        Ok(slice)
    }

    /// Reads a fixed-size array.
    pub fn read_array<const N: usize>(&mut self) -> IoResult<[u8; N]> {
        let mut out = [0u8; N];
        out.copy_from_slice(self.read_bytes(N)?);
        Ok(out)
    }

    /// Reads one byte.
    pub fn read_u8(&mut self) -> IoResult<u8> {
        Ok(self.read_array::<1>()?[0])
    }

    /// Reads a boolean, rejecting anything other than 0 or 1.
    pub fn read_bool(&mut self) -> IoResult<bool> {
        match self.read_u8()? {
            0 => Ok(false),
            1 => Ok(true),
            other => Err(IoError::Format(format!("invalid boolean byte {other}"))),
        }
    }

    /// Reads a little-endian u16.
    pub fn read_u16(&mut self) -> IoResult<u16> {
        Ok(u16::from_le_bytes(self.read_array()?))
    }

    /// Reads a little-endian u32.
    pub fn read_u32(&mut self) -> IoResult<u32> {
        Ok(u32::from_le_bytes(self.read_array()?))
    }

    /// Reads a little-endian u64.
    pub fn read_u64(&mut self) -> IoResult<u64> {
        Ok(u64::from_le_bytes(self.read_array()?))
    }

    /// Reads a variable-length integer no larger than `max`.
    pub fn read_var_int(&mut self, max: u64) -> IoResult<u64> {
        let value = match self.read_u8()? {
            0xFD => u64::from(self.read_u16()?),
            0xFE => u64::from(self.read_u32()?),
            0xFF => self.read_u64()?,
            small => u64::from(small),
        };
        if value > max {
            return Err(IoError::TooLarge { len: value, max });
        }
        Ok(value)
    }

    /// Reads length-prefixed bytes no longer than `max`.
    pub fn read_var_bytes(&mut self, max: usize) -> IoResult<Vec<u8>> {
        let len = self.read_var_int(max as u64)? as usize;
        Ok(self.read_bytes(len)?.to_vec())
    }

    /// Reads a length-prefixed UTF-8 string no longer than `max` bytes.
    pub fn read_var_string(&mut self, max: usize) -> IoResult<String> {
        let bytes = self.read_var_bytes(max)?;
        String::from_utf8(bytes).map_err(|_| IoError::Format("invalid UTF-8 string".to_string()))
    }

    /// Reads a value written by [`BinaryWriter::write_optional`].
    pub fn read_optional<T: Serializable>(&mut self) -> IoResult<Option<T>> {
        if self.read_bool()? {
            Ok(Some(T::deserialize(self)?))
        } else {
            Ok(None)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq)]
    struct Pair {
        id: u64,
        label: String,
    }

    impl Serializable for Pair {
        fn serialize(&self, writer: &mut BinaryWriter) {
            writer.write_u64(self.id);
            writer.write_var_string(&self.label);
        }

        fn deserialize(reader: &mut MemoryReader) -> IoResult<Self> {
            Ok(Self {
                id: reader.read_u64()?,
                label: reader.read_var_string(64)?,
            })
        }
    }

    #[test]
    fn var_int_boundaries_use_expected_widths() {
        for (value, width) in [(0xFCu64, 1usize), (0xFD, 3), (0xFFFF, 3), (0x1_0000, 5), (0x1_0000_0000, 9)] {
            let mut writer = BinaryWriter::new();
            writer.write_var_int(value);
            assert_eq!(writer.as_bytes().len(), width, "value {value:#x}");
            let mut reader = MemoryReader::new(writer.as_bytes());
            assert_eq!(reader.read_var_int(u64::MAX).unwrap(), value);
        }
    }

    #[test]
    fn read_var_int_enforces_bound() {
        let mut writer = BinaryWriter::new();
        writer.write_var_int(300);
        let mut reader = MemoryReader::new(writer.as_bytes());
        assert_eq!(
            reader.read_var_int(255),
            Err(IoError::TooLarge { len: 300, max: 255 })
        );
    }

    #[test]
    fn truncated_input_reports_end_of_stream() {
        let mut reader = MemoryReader::new(&[1, 2, 3]);
        assert_eq!(reader.read_u64(), Err(IoError::EndOfStream(0)));
    }

    #[test]
    fn from_array_rejects_trailing_bytes() {
        let pair = Pair { id: 7, label: "seven".to_string() };
        let mut bytes = pair.to_array();
        assert_eq!(Pair::from_array(&bytes).unwrap(), pair);
        bytes.push(0);
        assert!(matches!(Pair::from_array(&bytes), Err(IoError::Format(_))));
    }

    #[test]
    fn optional_values_are_tagged() {
        let mut writer = BinaryWriter::new();
        writer.write_optional::<Pair>(None);
        writer.write_optional(Some(&Pair { id: 1, label: String::new() }));
        let mut reader = MemoryReader::new(writer.as_bytes());
        assert_eq!(reader.read_optional::<Pair>().unwrap(), None);
        assert_eq!(
            reader.read_optional::<Pair>().unwrap(),
            Some(Pair { id: 1, label: String::new() })
        );
        assert!(matches!(reader.read_bool(), Err(IoError::EndOfStream(_))));
    }
}
