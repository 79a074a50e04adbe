use crate::{bit_reader::BitReader, bit_writer::BitWrite, error::SerdeErr, serde::Serde, ConstBitLength};

pub type UnsignedInteger<const BITS: u8> = SerdeInteger<false, false, BITS>;
pub type SignedInteger<const BITS: u8> = SerdeInteger<true, false, BITS>;
pub type UnsignedVariableInteger<const BITS: u8> = SerdeInteger<false, true, BITS>;
pub type SignedVariableInteger<const BITS: u8> = SerdeInteger<true, true, BITS>;

/// An integer written with a caller-chosen bit width.
///
/// Fixed variants always take `BITS` bits (plus a sign bit when signed).
/// Variable variants are written in `BITS`-sized chunks, each preceded by a
/// continuation bit, so small values stay small on the wire.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub struct SerdeInteger<const SIGNED: bool, const VARIABLE: bool, const BITS: u8> {
    inner: IntegerInner,
}

impl<const SIGNED: bool, const VARIABLE: bool, const BITS: u8> SerdeInteger<SIGNED, VARIABLE, BITS> {
    /// # Panics
    ///
    /// Panics if the value cannot be represented with this encoding (negative
    /// value for an unsigned type, or too large for a fixed width).
    pub fn new<T: Into<i128>>(value: T) -> Self {
        Self {
            inner: IntegerInner::new(SIGNED, VARIABLE, BITS, value.into()),
        }
    }

    pub fn get(&self) -> i128 {
        self.inner.value
    }

    /// Converts into a narrower integer, failing if the decoded value does not fit.
    pub fn to<T: TryFrom<i128>>(&self) -> Result<T, SerdeErr> {
        T::try_from(self.inner.value).map_err(|_| SerdeErr::LengthExceeded {
            length: self.inner.value.unsigned_abs(),
            limit: u128::from(BITS),
        })
    }
}

impl<const SIGNED: bool, const VARIABLE: bool, const BITS: u8> Serde
    for SerdeInteger<SIGNED, VARIABLE, BITS>
{
    fn ser(&self, writer: &mut dyn BitWrite) {
        self.inner.ser(writer);
    }

    fn de(reader: &mut BitReader) -> Result<Self, SerdeErr> {
        let inner = IntegerInner::de(reader, SIGNED, VARIABLE, BITS)?;
        Ok(Self { inner })
    }
}

impl<const SIGNED: bool, const BITS: u8> ConstBitLength for SerdeInteger<SIGNED, false, BITS> {
    fn const_bit_length() -> u32 {
        u32::from(SIGNED) + u32::from(BITS)
    }
}

// Non-generic core, keeps monomorphized copies small.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
struct IntegerInner {
    value: i128,
    signed: bool,
    variable: bool,
    bits: u8,
}

impl IntegerInner {
    fn new(signed: bool, variable: bool, bits: u8, value: i128) -> Self {
        if bits == 0 {
            panic!("can't create an integer with 0 bits...");
        }
        if bits > 127 {
            panic!("can't create an integer with more than 127 bits...");
        }
        if !signed && value < 0 {
            panic!("can't encode a negative number with an Unsigned Integer!");
        }
        if !variable && value.unsigned_abs() >= 1_u128 << bits {
            panic!(
                "value `{}` does not fit in `{}` bits",
                value, bits
            );
        }

        Self {
            value,
            signed,
            variable,
            bits,
        }
    }

    fn ser(&self, writer: &mut dyn BitWrite) {
        if self.signed {
            writer.write_bit(self.value < 0);
        }

        let mut magnitude = self.value.unsigned_abs();

        loop {
            let proceed = self.variable && magnitude >= 1_u128 << self.bits;
            if self.variable {
                writer.write_bit(proceed);
            }
            for _ in 0..self.bits {
                writer.write_bit(magnitude & 1 != 0);
                magnitude >>= 1;
            }
            if !proceed {
                return;
            }
        }
    }

    fn de(reader: &mut BitReader, signed: bool, variable: bool, bits: u8) -> Result<Self, SerdeErr> {
        let negative = signed && reader.read_bit()?;

        let mut magnitude: u128 = 0;
        let mut shift: u32 = 0;

        loop {
            let proceed = variable && reader.read_bit()?;

            for _ in 0..bits {
                if reader.read_bit()? {
                    if shift >= 127 {
                        return Err(SerdeErr::LengthExceeded {
                            length: u128::from(shift),
                            limit: 127,
                        });
                    }
                    magnitude |= 1 << shift;
                }
                shift += 1;
            }

            if !proceed {
                break;
            }
            if shift >= 127 {
                return Err(SerdeErr::LengthExceeded {
                    length: u128::from(shift),
                    limit: 127,
                });
            }
        }

        // magnitude < 2^127 here, so the cast is lossless
        let value = magnitude as i128;

        Ok(Self {
            value: if negative { -value } else { value },
            signed,
            variable,
            bits,
        })
    }
}
