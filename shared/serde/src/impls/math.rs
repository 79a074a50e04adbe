use glam::{Quat, Vec3};

use crate::{BitReader, BitWrite, ConstBitLength, Serde, SerdeErr};

impl Serde for Vec3 {
    fn ser(&self, writer: &mut dyn BitWrite) {
        self.x.ser(writer);
        self.y.ser(writer);
        self.z.ser(writer);
    }

    fn de(reader: &mut BitReader) -> Result<Self, SerdeErr> {
        let x = f32::de(reader)?;
        let y = f32::de(reader)?;
        let z = f32::de(reader)?;
        Ok(Vec3::new(x, y, z))
    }

    fn bit_length(&self) -> u32 {
        Self::const_bit_length()
    }
}

impl ConstBitLength for Vec3 {
    fn const_bit_length() -> u32 {
        3 * 32
    }
}

// x, y, z, w
impl Serde for Quat {
    fn ser(&self, writer: &mut dyn BitWrite) {
        self.x.ser(writer);
        self.y.ser(writer);
        self.z.ser(writer);
        self.w.ser(writer);
    }

    fn de(reader: &mut BitReader) -> Result<Self, SerdeErr> {
        let x = f32::de(reader)?;
        let y = f32::de(reader)?;
        let z = f32::de(reader)?;
        let w = f32::de(reader)?;
        Ok(Quat::from_xyzw(x, y, z, w))
    }

    fn bit_length(&self) -> u32 {
        Self::const_bit_length()
    }
}

impl ConstBitLength for Quat {
    fn const_bit_length() -> u32 {
        4 * 32
    }
}
