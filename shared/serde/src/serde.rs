use crate::{bit_counter::BitCounter, bit_reader::BitReader, bit_writer::BitWrite, error::SerdeErr};

/// A type that can be written to and read back from a bit stream.
///
/// `de` must consume exactly the fields `ser` produced, in the same order. The
/// layout is not self-describing, so field order is part of the wire contract.
pub trait Serde: Sized + Clone + PartialEq {
    /// Writes the value to the stream
    fn ser(&self, writer: &mut dyn BitWrite);

    /// Parses a value from the stream
    fn de(reader: &mut BitReader) -> Result<Self, SerdeErr>;

    /// Number of bits `ser` will produce
    fn bit_length(&self) -> u32 {
        let mut counter = BitCounter::new();
        self.ser(&mut counter);
        counter.bits_written()
    }
}

/// Implemented by types whose encoding always has the same width.
pub trait ConstBitLength {
    fn const_bit_length() -> u32;
}
