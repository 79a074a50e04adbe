use std::ops::{Deref, DerefMut};

use crate::BitWriter;

/// Recycles `BitWriter` allocations between outgoing messages.
///
/// A writer is borrowed with [`WriterPool::acquire`] and goes back to the pool
/// when the returned guard drops, on every exit path.
pub struct WriterPool {
    free: Vec<BitWriter>,
    max_pooled: usize,
    writer_capacity: usize,
}

impl WriterPool {
    pub fn new(max_pooled: usize, writer_capacity: usize) -> Self {
        Self {
            free: Vec::with_capacity(max_pooled),
            max_pooled,
            writer_capacity,
        }
    }

    pub fn acquire(&mut self) -> PooledWriter<'_> {
        let writer = self
            .free
            .pop()
            .unwrap_or_else(|| BitWriter::with_capacity(self.writer_capacity));

        PooledWriter { writer, pool: self }
    }

    /// Writers currently parked in the pool
    pub fn available(&self) -> usize {
        self.free.len()
    }

    fn release(&mut self, mut writer: BitWriter) {
        if self.free.len() >= self.max_pooled {
            return;
        }
        writer.clear();
        self.free.push(writer);
    }
}

impl Default for WriterPool {
    fn default() -> Self {
        Self::new(8, 256)
    }
}

pub struct PooledWriter<'p> {
    writer: BitWriter,
    pool: &'p mut WriterPool,
}

impl Deref for PooledWriter<'_> {
    type Target = BitWriter;

    fn deref(&self) -> &BitWriter {
        &self.writer
    }
}

impl DerefMut for PooledWriter<'_> {
    fn deref_mut(&mut self) -> &mut BitWriter {
        &mut self.writer
    }
}

impl Drop for PooledWriter<'_> {
    fn drop(&mut self) {
        // a zero-capacity writer does not allocate
        let writer = std::mem::replace(&mut self.writer, BitWriter::with_capacity(0));
        self.pool.release(writer);
    }
}
