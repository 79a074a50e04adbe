use crate::error::SerdeErr;

/// Reads bits back in the order `BitWriter` produced them.
pub struct BitReader<'b> {
    buffer: &'b [u8],
    byte_index: usize,
    bit_index: u8,
}

impl<'b> BitReader<'b> {
    pub fn new(buffer: &'b [u8]) -> Self {
        Self {
            buffer,
            byte_index: 0,
            bit_index: 0,
        }
    }

    pub fn bits_remaining(&self) -> usize {
        if self.byte_index >= self.buffer.len() {
            return 0;
        }
        (self.buffer.len() - self.byte_index) * 8 - usize::from(self.bit_index)
    }

    /// Whole bytes left, not counting a partially consumed byte.
    pub fn bytes_remaining(&self) -> usize {
        self.bits_remaining() / 8
    }

    pub fn read_bit(&mut self) -> Result<bool, SerdeErr> {
        let Some(byte) = self.buffer.get(self.byte_index) else {
            return Err(SerdeErr::Truncated { available_bits: 0 });
        };

        let bit = (byte >> self.bit_index) & 1 != 0;

        self.bit_index += 1;
        if self.bit_index >= 8 {
            self.bit_index = 0;
            self.byte_index += 1;
        }

        Ok(bit)
    }

    pub fn read_byte(&mut self) -> Result<u8, SerdeErr> {
        if self.bit_index == 0 {
            let Some(byte) = self.buffer.get(self.byte_index) else {
                return Err(SerdeErr::Truncated { available_bits: 0 });
            };
            self.byte_index += 1;
            return Ok(*byte);
        }

        if self.bits_remaining() < 8 {
            return Err(SerdeErr::Truncated {
                available_bits: self.bits_remaining(),
            });
        }

        let mut output: u8 = 0;
        for index in 0..8 {
            if self.read_bit()? {
                output |= 1 << index;
            }
        }
        Ok(output)
    }

    pub fn read_bytes(&mut self, length: usize) -> Result<Vec<u8>, SerdeErr> {
        let available_bits = self.bits_remaining();
        if available_bits / 8 < length {
            return Err(SerdeErr::Truncated { available_bits });
        }

        let mut output = Vec::with_capacity(length);
        for _ in 0..length {
            output.push(self.read_byte()?);
        }
        Ok(output)
    }
}
