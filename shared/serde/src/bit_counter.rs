use crate::BitWrite;

/// A `BitWrite` that only counts, used to size a payload without encoding it.
#[derive(Default)]
pub struct BitCounter {
    bits_written: u32,
}

impl BitCounter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn bits_written(&self) -> u32 {
        self.bits_written
    }
}

impl BitWrite for BitCounter {
    fn write_bit(&mut self, _: bool) {
        self.bits_written += 1;
    }

    fn write_byte(&mut self, _: u8) {
        self.bits_written += 8;
    }
}
