// BitWrite
pub trait BitWrite {
    fn write_bit(&mut self, bit: bool);
    fn write_byte(&mut self, byte: u8);

    fn write_bytes(&mut self, bytes: &[u8]) {
        for byte in bytes {
            self.write_byte(*byte);
        }
    }
}

/// Growable bit writer. Bits are packed least-significant first, so a byte
/// written on a byte boundary lands in the buffer unchanged.
pub struct BitWriter {
    scratch: u8,
    scratch_index: u8,
    buffer: Vec<u8>,
    bits_written: u32,
}

impl Default for BitWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl BitWriter {
    pub fn new() -> Self {
        Self::with_capacity(64)
    }

    pub fn with_capacity(bytes: usize) -> Self {
        Self {
            scratch: 0,
            scratch_index: 0,
            buffer: Vec::with_capacity(bytes),
            bits_written: 0,
        }
    }

    pub fn bits_written(&self) -> u32 {
        self.bits_written
    }

    pub fn is_empty(&self) -> bool {
        self.bits_written == 0
    }

    /// Pads any partial byte with zeroes and returns everything written so far.
    /// More bits may be written afterwards; they start on the next byte.
    pub fn flush(&mut self) -> &[u8] {
        self.flush_scratch();
        &self.buffer
    }

    pub fn to_bytes(mut self) -> Vec<u8> {
        self.flush_scratch();
        self.buffer
    }

    /// Empties the writer but keeps its allocation.
    pub fn clear(&mut self) {
        self.scratch = 0;
        self.scratch_index = 0;
        self.buffer.clear();
        self.bits_written = 0;
    }

    pub(crate) fn capacity(&self) -> usize {
        self.buffer.capacity()
    }

    fn flush_scratch(&mut self) {
        if self.scratch_index > 0 {
            let byte = (self.scratch << (8 - self.scratch_index)).reverse_bits();
            self.buffer.push(byte);
            self.bits_written += u32::from(8 - self.scratch_index);
            self.scratch = 0;
            self.scratch_index = 0;
        }
    }
}

impl BitWrite for BitWriter {
    fn write_bit(&mut self, bit: bool) {
        self.scratch <<= 1;

        if bit {
            self.scratch |= 1;
        }

        self.scratch_index += 1;
        self.bits_written += 1;

        if self.scratch_index >= 8 {
            self.buffer.push(self.scratch.reverse_bits());
            self.scratch_index = 0;
            self.scratch = 0;
        }
    }

    fn write_byte(&mut self, byte: u8) {
        if self.scratch_index == 0 {
            self.buffer.push(byte);
            self.bits_written += 8;
            return;
        }

        let mut temp = byte;
        for _ in 0..8 {
            self.write_bit(temp & 1 != 0);
            temp >>= 1;
        }
    }
}
