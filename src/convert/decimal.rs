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

//! Decimal conversion readers, `§4.4`. Every kernel ultimately calls
//! [`crate::vector::DecimalVector::set`], which rescales to the target's
//! fixed `(precision, scale)` and nulls the slot on overflow — so none of
//! these kernels need their own precision/scale bookkeeping.

use crate::decoder::PrimitiveBatchDecoder;
use crate::driver::drive_conversion;
use crate::error::Result;
use crate::primitives::{double_to_decimal, long_to_decimal, parse_decimal, timestamp_to_double};
use crate::vector::{AnyVector, BytesVector, DecimalVector, DoubleVector, LongVector, TimestampVector, VectorWrite};

use super::ConvertReader;

pub enum DecimalSource {
    Integer {
        decoder: Box<dyn PrimitiveBatchDecoder<LongVector>>,
        scratch: LongVector,
    },
    Floating {
        decoder: Box<dyn PrimitiveBatchDecoder<DoubleVector>>,
        scratch: DoubleVector,
    },
    StringGroup {
        decoder: Box<dyn PrimitiveBatchDecoder<BytesVector>>,
        scratch: BytesVector,
    },
    Timestamp {
        decoder: Box<dyn PrimitiveBatchDecoder<TimestampVector>>,
        scratch: TimestampVector,
    },
    /// Decimal-from-decimal: a precision/scale change on the same category.
    Decimal {
        decoder: Box<dyn PrimitiveBatchDecoder<DecimalVector>>,
        scratch: DecimalVector,
    },
}

pub struct DecimalConvertReader {
    source: DecimalSource,
}

impl DecimalConvertReader {
    pub fn new(source: DecimalSource) -> Self {
        Self { source }
    }
}

impl ConvertReader for DecimalConvertReader {
    fn check_encoding(&self) -> Result<()> {
        match &self.source {
            DecimalSource::Integer { decoder, .. } => decoder.check_encoding(),
            DecimalSource::Floating { decoder, .. } => decoder.check_encoding(),
            DecimalSource::StringGroup { decoder, .. } => decoder.check_encoding(),
            DecimalSource::Timestamp { decoder, .. } => decoder.check_encoding(),
            DecimalSource::Decimal { decoder, .. } => decoder.check_encoding(),
        }
    }

    fn start_stripe(&mut self) -> Result<()> {
        match &mut self.source {
            DecimalSource::Integer { decoder, .. } => decoder.start_stripe(),
            DecimalSource::Floating { decoder, .. } => decoder.start_stripe(),
            DecimalSource::StringGroup { decoder, .. } => decoder.start_stripe(),
            DecimalSource::Timestamp { decoder, .. } => decoder.start_stripe(),
            DecimalSource::Decimal { decoder, .. } => decoder.start_stripe(),
        }
    }

    fn seek(&mut self, row: u64) -> Result<()> {
        match &mut self.source {
            DecimalSource::Integer { decoder, .. } => decoder.seek(row),
            DecimalSource::Floating { decoder, .. } => decoder.seek(row),
            DecimalSource::StringGroup { decoder, .. } => decoder.seek(row),
            DecimalSource::Timestamp { decoder, .. } => decoder.seek(row),
            DecimalSource::Decimal { decoder, .. } => decoder.seek(row),
        }
    }

    fn skip_rows(&mut self, count: u64) -> Result<()> {
        match &mut self.source {
            DecimalSource::Integer { decoder, .. } => decoder.skip_rows(count),
            DecimalSource::Floating { decoder, .. } => decoder.skip_rows(count),
            DecimalSource::StringGroup { decoder, .. } => decoder.skip_rows(count),
            DecimalSource::Timestamp { decoder, .. } => decoder.skip_rows(count),
            DecimalSource::Decimal { decoder, .. } => decoder.skip_rows(count),
        }
    }

    fn next_batch(&mut self, output: &mut AnyVector, len: usize) -> Result<()> {
        let out = output.expect_decimal_mut();
        match &mut self.source {
            DecimalSource::Integer { decoder, scratch } => {
                decoder.next_batch(scratch, len)?;
                let source = &*scratch;
                drive_conversion(source, out, move |out, i| {
                    let (unscaled, scale) = long_to_decimal(source.value(i));
                    out.set(i, unscaled, scale);
                });
            }
            DecimalSource::Floating { decoder, scratch } => {
                decoder.next_batch(scratch, len)?;
                let source = &*scratch;
                drive_conversion(source, out, move |out, i| match double_to_decimal(source.value(i)) {
                    Some((unscaled, scale)) => out.set(i, unscaled, scale),
                    None => out.set_null(i),
                });
            }
            DecimalSource::StringGroup { decoder, scratch } => {
                decoder.next_batch(scratch, len)?;
                let source = &*scratch;
                drive_conversion(source, out, move |out, i| match parse_decimal(source.str(i)) {
                    Some((unscaled, scale)) => out.set(i, unscaled, scale),
                    None => out.set_null(i),
                });
            }
            DecimalSource::Timestamp { decoder, scratch } => {
                decoder.next_batch(scratch, len)?;
                let source = &*scratch;
                drive_conversion(source, out, move |out, i| {
                    let seconds = timestamp_to_double(source.value(i));
                    match double_to_decimal(seconds) {
                        Some((unscaled, scale)) => out.set(i, unscaled, scale),
                        None => out.set_null(i),
                    }
                });
            }
            DecimalSource::Decimal { decoder, scratch } => {
                decoder.next_batch(scratch, len)?;
                let scale = scratch.scale as i8;
                let source = &*scratch;
                drive_conversion(source, out, move |out, i| {
                    out.set(i, source.unscaled(i), scale);
                });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decoder::testing::FixedBatchDecoder;
    use crate::vector::{PrimitiveVector, VectorRead};

    #[test]
    fn decimal_from_integer_nulls_on_precision_overflow() {
        let decoder = FixedBatchDecoder::new(vec![Some(42i64), Some(999_999)]);
        let mut reader = DecimalConvertReader::new(DecimalSource::Integer {
            decoder: Box::new(decoder),
            scratch: PrimitiveVector::new(),
        });
        let mut out = AnyVector::Decimal(DecimalVector::new(5, 0));
        reader.next_batch(&mut out, 2).unwrap();
        let out = out.expect_decimal_mut();
        assert_eq!(out.unscaled(0), 42);
        assert!(out.is_null(1));
    }

    #[test]
    fn decimal_from_string_parses_and_rescales() {
        let decoder = FixedBatchDecoder::new(vec![Some(b"123.4".to_vec()), Some(b"nope".to_vec())]);
        let mut reader = DecimalConvertReader::new(DecimalSource::StringGroup {
            decoder: Box::new(decoder),
            scratch: BytesVector::new(),
        });
        let mut out = AnyVector::Decimal(DecimalVector::new(5, 2));
        reader.next_batch(&mut out, 2).unwrap();
        let out = out.expect_decimal_mut();
        assert_eq!(out.unscaled(0), 12340);
        assert!(out.is_null(1));
    }
}
