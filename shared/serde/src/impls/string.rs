use crate::{
    constants::MAX_STRING_BYTES, BitReader, BitWrite, Serde, SerdeErr, UnsignedVariableInteger,
};

impl Serde for String {
    fn ser(&self, writer: &mut dyn BitWrite) {
        let length = UnsignedVariableInteger::<9>::new(self.len() as u64);
        length.ser(writer);
        writer.write_bytes(self.as_bytes());
    }

    fn de(reader: &mut BitReader) -> Result<Self, SerdeErr> {
        let length = UnsignedVariableInteger::<9>::de(reader)?;
        let length: usize = length.to()?;
        if length > MAX_STRING_BYTES {
            return Err(SerdeErr::LengthExceeded {
                length: length as u128,
                limit: MAX_STRING_BYTES as u128,
            });
        }

        let bytes = reader.read_bytes(length)?;
        String::from_utf8(bytes).map_err(|_| SerdeErr::InvalidUtf8)
    }
}
