//! # Tandem Serde
//! Bit-level reader/writer and the `Serde` contract implemented by every wire
//! payload exchanged between tandem peers.

mod bit_counter;
mod bit_reader;
mod bit_writer;
mod constants;
mod error;
mod impls;
mod number;
mod serde;
mod writer_pool;

pub use bit_counter::BitCounter;
pub use bit_reader::BitReader;
pub use bit_writer::{BitWrite, BitWriter};
pub use constants::{MAX_COLLECTION_LENGTH, MAX_STRING_BYTES};
pub use error::SerdeErr;
pub use number::{
    SerdeInteger, SignedInteger, SignedVariableInteger, UnsignedInteger, UnsignedVariableInteger,
};
pub use serde::{ConstBitLength, Serde};
pub use writer_pool::{PooledWriter, WriterPool};
