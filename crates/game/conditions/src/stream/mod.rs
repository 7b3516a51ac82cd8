//! Binary stream primitives for the condition persistence format.
//!
//! All integers are little-endian. Strings are a `u16` byte length followed
//! by UTF-8 bytes. The reader never panics on malformed input: every read
//! returns a [`WireError`] instead.
//!
//! ```text
//! [u16 len][utf-8 bytes ...]   string
//! [u8]                         enum tag
//! [u32 / i32]                  fixed-width integers
//! ```

mod error;

pub use error::WireError;

use crate::config::ConditionConfig;
use crate::types::{CombatType, MechanicType, PlayerStatType, SkillType};

/// Cursor over a borrowed byte slice.
#[derive(Clone, Debug)]
pub struct PropStream<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> PropStream<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    /// Current read offset in bytes.
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Bytes left to read.
    pub fn remaining(&self) -> usize {
        self.data.len() - self.pos
    }

    pub fn is_empty(&self) -> bool {
        self.remaining() == 0
    }

    fn take(&mut self, len: usize) -> Result<&'a [u8], WireError> {
        if self.remaining() < len {
            return Err(WireError::UnexpectedEof {
                offset: self.pos,
                needed: len,
                remaining: self.remaining(),
            });
        }
        let bytes = &self.data[self.pos..self.pos + len];
        self.pos += len;
        Ok(bytes)
    }

    fn take_array<const N: usize>(&mut self) -> Result<[u8; N], WireError> {
        let mut array = [0u8; N];
        array.copy_from_slice(self.take(N)?);
        Ok(array)
    }

    pub fn read_u8(&mut self) -> Result<u8, WireError> {
        Ok(self.take_array::<1>()?[0])
    }

    pub fn read_u16(&mut self) -> Result<u16, WireError> {
        Ok(u16::from_le_bytes(self.take_array()?))
    }

    pub fn read_u32(&mut self) -> Result<u32, WireError> {
        Ok(u32::from_le_bytes(self.take_array()?))
    }

    pub fn read_i32(&mut self) -> Result<i32, WireError> {
        Ok(i32::from_le_bytes(self.take_array()?))
    }

    pub fn read_string(&mut self) -> Result<String, WireError> {
        let offset = self.pos;
        let len = self.read_u16()? as usize;
        let bytes = self.take(len)?;
        String::from_utf8(bytes.to_vec()).map_err(|_| WireError::InvalidUtf8 { offset })
    }

    // ===== enum tags =====

    pub fn read_combat_type(&mut self) -> Result<CombatType, WireError> {
        let tag = self.read_u8()?;
        CombatType::from_repr(tag).ok_or(WireError::UnknownCombatType(tag))
    }

    pub fn read_mechanic_type(&mut self) -> Result<MechanicType, WireError> {
        let tag = self.read_u8()?;
        MechanicType::from_repr(tag).ok_or(WireError::UnknownMechanicType(tag))
    }

    pub fn read_stat_type(&mut self) -> Result<PlayerStatType, WireError> {
        let tag = self.read_u8()?;
        PlayerStatType::from_repr(tag).ok_or(WireError::UnknownStatType(tag))
    }

    pub fn read_skill_type(&mut self) -> Result<SkillType, WireError> {
        let tag = self.read_u8()?;
        SkillType::from_repr(tag).ok_or(WireError::UnknownSkillType(tag))
    }
}

/// Growable output buffer for the persistence format.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PropWriteStream {
    buffer: Vec<u8>,
}

impl PropWriteStream {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.buffer
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.buffer
    }

    /// Appends everything written to `other`.
    pub fn append(&mut self, other: PropWriteStream) {
        self.buffer.extend_from_slice(&other.buffer);
    }

    pub fn write_u8(&mut self, value: u8) {
        self.buffer.push(value);
    }

    pub fn write_u16(&mut self, value: u16) {
        self.buffer.extend_from_slice(&value.to_le_bytes());
    }

    pub fn write_u32(&mut self, value: u32) {
        self.buffer.extend_from_slice(&value.to_le_bytes());
    }

    pub fn write_i32(&mut self, value: i32) {
        self.buffer.extend_from_slice(&value.to_le_bytes());
    }

    pub fn write_string(&mut self, value: &str) -> Result<(), WireError> {
        let len = u16::try_from(value.len()).map_err(|_| WireError::StringTooLong {
            len: value.len(),
            max: ConditionConfig::MAX_NAME_LEN,
        })?;
        self.write_u16(len);
        self.buffer.extend_from_slice(value.as_bytes());
        Ok(())
    }
}
