// Licensed to the Apache Software Foundation (ASF) under one
// or more contributor license agreements.  See the NOTICE file
// distributed with this work for additional information
// regarding copyright ownership.  The ASF licenses this file
// to you under the Apache License, Version 2.0 (the
// "License"); you may not use this file except in compliance
// with the License.  You may obtain a copy of the License at
//
//   http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing,
// software distributed under the License is distributed on an
// "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied.  See the License for the
// specific language governing permissions and limitations
// under the License.

//! The trait boundary to the on-disk primitive decoder that a
//! [`crate::convert::ConvertReader`] wraps. Decoding RLE streams, byte
//! streams, and compressed chunks into a file-typed vector is an external
//! collaborator's job (out of scope for this layer); this trait is the seam.

use crate::error::Result;
use crate::vector::VectorWrite;

/// Produces successive batches of a single column in its on-disk type,
/// mirroring the pass-through lifecycle a [`crate::convert::ConvertReader`]
/// forwards unchanged (`§6`): encoding validation once up front, then
/// stripe-scoped seeking/skipping/batch reads.
pub trait PrimitiveBatchDecoder<V: VectorWrite> {
    /// Validates that this column's on-disk encoding is one this decoder
    /// supports. Called once before the first [`PrimitiveBatchDecoder::start_stripe`].
    fn check_encoding(&self) -> Result<()> {
        Ok(())
    }

    /// Called once per stripe before any `seek`/`skip_rows`/`next_batch` call.
    fn start_stripe(&mut self) -> Result<()> {
        Ok(())
    }

    /// Repositions the decoder to `row` (stripe-relative).
    fn seek(&mut self, row: u64) -> Result<()> {
        let _ = row;
        Ok(())
    }

    /// Advances the decoder past `count` rows without materializing them.
    fn skip_rows(&mut self, count: u64) -> Result<()> {
        let _ = count;
        Ok(())
    }

    /// Decodes the next `len` rows into `batch`, which is reset to `len` by
    /// the callee (mirroring `VectorWrite::reset`'s contract).
    fn next_batch(&mut self, batch: &mut V, len: usize) -> Result<()>;
}

/// Minimal, fully in-memory [`PrimitiveBatchDecoder`] test doubles used to
/// exercise `convert::*` readers without a real file-decoding stack. Not
/// gated behind `#[cfg(test)]` so integration tests (a separate compiled
/// crate) can use them too.
pub mod testing {
    use super::PrimitiveBatchDecoder;
    use crate::error::Result;
    use crate::vector::{BytesVector, DecimalVector, PrimitiveVector, VectorWrite};

    /// Feeds fixed-size batches from a pre-built `Vec<Option<T>>`, advancing
    /// a cursor on every call. Panics (a test-double bug, not a production
    /// path) if asked for more rows than remain.
    pub struct FixedBatchDecoder<T> {
        values: Vec<Option<T>>,
        cursor: usize,
    }

    impl<T: Copy + Default> FixedBatchDecoder<T> {
        pub fn new(values: Vec<Option<T>>) -> Self {
            Self { values, cursor: 0 }
        }
    }

    impl<T: Copy + Default> PrimitiveBatchDecoder<PrimitiveVector<T>> for FixedBatchDecoder<T> {
        fn next_batch(&mut self, batch: &mut PrimitiveVector<T>, len: usize) -> Result<()> {
            batch.reset(len);
            for i in 0..len {
                match self.values[self.cursor + i] {
                    Some(value) => batch.set_value(i, value),
                    None => batch.set_null(i),
                }
            }
            self.cursor += len;
            Ok(())
        }
    }

    /// Same idea, for [`DecimalVector`], whose element type is `(i128, i8)`
    /// (unscaled value, scale it was produced at) rather than a bare `T`.
    pub struct FixedDecimalBatchDecoder {
        values: Vec<Option<(i128, i8)>>,
        cursor: usize,
    }

    impl FixedDecimalBatchDecoder {
        pub fn new(values: Vec<Option<(i128, i8)>>) -> Self {
            Self { values, cursor: 0 }
        }
    }

    impl PrimitiveBatchDecoder<DecimalVector> for FixedDecimalBatchDecoder {
        fn next_batch(&mut self, batch: &mut DecimalVector, len: usize) -> Result<()> {
            batch.reset(len);
            for i in 0..len {
                match self.values[self.cursor + i] {
                    Some((unscaled, scale)) => batch.set(i, unscaled, scale),
                    None => batch.set_null(i),
                }
            }
            self.cursor += len;
            Ok(())
        }
    }

    /// Same idea, for [`BytesVector`] (STRING/CHAR/VARCHAR/BINARY).
    pub struct FixedBytesBatchDecoder {
        values: Vec<Option<Vec<u8>>>,
        cursor: usize,
    }

    impl FixedBytesBatchDecoder {
        pub fn new(values: Vec<Option<Vec<u8>>>) -> Self {
            Self { values, cursor: 0 }
        }
    }

    impl PrimitiveBatchDecoder<BytesVector> for FixedBytesBatchDecoder {
        fn next_batch(&mut self, batch: &mut BytesVector, len: usize) -> Result<()> {
            batch.reset(len);
            for i in 0..len {
                match &self.values[self.cursor + i] {
                    Some(bytes) => batch.set_bytes(i, bytes),
                    None => batch.set_null(i),
                }
            }
            self.cursor += len;
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::testing::FixedBatchDecoder;
    use super::PrimitiveBatchDecoder;
    use crate::vector::{LongVector, PrimitiveVector, VectorRead};

    #[test]
    fn fixed_batch_decoder_reports_nulls() {
        let mut decoder = FixedBatchDecoder::new(vec![Some(1i64), None, Some(3)]);
        let mut batch: LongVector = PrimitiveVector::new();
        decoder.next_batch(&mut batch, 3).unwrap();
        assert_eq!(batch.value(0), 1);
        assert!(batch.is_null(1));
        assert_eq!(batch.value(2), 3);
    }
}
