//! 256-bit unsigned integers for transaction amounts.
//!
//! Amount fields are at most 32 big-endian bytes on the wire. This
//! type holds them in four 64-bit limbs and knows just enough
//! arithmetic to print itself in decimal on the stack.

use core::fmt;
use manapp_common::ParserError;

/// Maximum decimal digits of a 256-bit value, terminator excluded.
pub const UINT256_DEC_DIGITS: usize = 78;

/// A 256-bit unsigned integer, most significant limb first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Uint256 {
    limbs: [u64; 4],
}

impl Uint256 {
    pub const ZERO: Uint256 = Uint256 { limbs: [0; 4] };

    #[inline]
    pub const fn from_u64(v: u64) -> Self {
        Uint256 {
            limbs: [0, 0, 0, v],
        }
    }

    /// Builds from up to 32 big-endian bytes. Shorter inputs are
    /// zero-extended on the left; longer inputs are out of range.
    pub fn from_be_bytes(bytes: &[u8]) -> Result<Self, ParserError> {
        if bytes.len() > 32 {
            return Err(ParserError::ValueOutOfRange);
        }
        let mut limbs = [0u64; 4];
        // Offset so the last input byte lands in the last limb byte.
        let shift = 32 - bytes.len();
        for (i, &b) in bytes.iter().enumerate() {
            let pos = shift + i;
            limbs[pos / 8] = (limbs[pos / 8] << 8) | b as u64;
        }
        Ok(Uint256 { limbs })
    }

    #[inline]
    pub fn is_zero(&self) -> bool {
        self.limbs == [0; 4]
    }

    /// The low 64 bits. Meaningful when [`fits_u64`](Self::fits_u64).
    #[inline]
    pub fn low_u64(&self) -> u64 {
        self.limbs[3]
    }

    /// True when the value fits in a single `u64`.
    #[inline]
    pub fn fits_u64(&self) -> bool {
        self.limbs[0] == 0 && self.limbs[1] == 0 && self.limbs[2] == 0
    }

    /// Left shift by up to 255 bits; shifted-out bits are discarded.
    pub fn shl(&self, bits: u32) -> Self {
        if bits >= 256 {
            return Uint256::ZERO;
        }
        let limb_shift = (bits / 64) as usize;
        let bit_shift = bits % 64;
        let mut limbs = [0u64; 4];
        for i in 0..4 - limb_shift {
            let src = i + limb_shift;
            limbs[i] = self.limbs[src] << bit_shift;
            if bit_shift > 0 && src + 1 < 4 {
                limbs[i] |= self.limbs[src + 1] >> (64 - bit_shift);
            }
        }
        Uint256 { limbs }
    }

    /// Divides by ten in place, returning the remainder digit.
    fn div_rem_10(&mut self) -> u8 {
        let mut rem = 0u64;
        for limb in self.limbs.iter_mut() {
            let cur = ((rem as u128) << 64) | *limb as u128;
            *limb = (cur / 10) as u64;
            rem = (cur % 10) as u64;
        }
        rem as u8
    }

    /// Writes the decimal representation into `out`, terminator
    /// included, and returns the digit count.
    pub fn write_decimal(&self, out: &mut [u8]) -> Result<usize, ParserError> {
        let mut digits = [0u8; UINT256_DEC_DIGITS];
        let mut scratch = *self;
        let mut count = 0;
        loop {
            digits[count] = b'0' + scratch.div_rem_10();
            count += 1;
            if scratch.is_zero() {
                break;
            }
        }

        if count + 1 > out.len() {
            return Err(ParserError::BufferTooSmall);
        }
        out.fill(0);
        for (i, slot) in out.iter_mut().take(count).enumerate() {
            *slot = digits[count - 1 - i];
        }
        Ok(count)
    }
}

impl fmt::Display for Uint256 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut buf = [0u8; UINT256_DEC_DIGITS + 1];
        let count = self.write_decimal(&mut buf).map_err(|_| fmt::Error)?;
        for &b in &buf[..count] {
            f.write_str(core::str::from_utf8(&[b]).map_err(|_| fmt::Error)?)?;
        }
        Ok(())
    }
}
