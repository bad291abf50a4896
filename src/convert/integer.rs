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

//! Integer-family conversion readers, `§4.2`. Targets `BOOLEAN`/`BYTE`/
//! `SHORT`/`INT`/`LONG`, all stored in a [`LongVector`] (Hive's
//! `ColumnVector` hierarchy uses exactly this unification: one integer-width
//! vector backs every integer-family category, including booleans and dates).

use crate::category::TypeCategory;
use crate::decoder::PrimitiveBatchDecoder;
use crate::driver::drive_conversion;
use crate::error::Result;
use crate::primitives::{double_fits_in_long, down_cast_integer, parse_long};
use crate::vector::{AnyVector, BytesVector, DecimalVector, DoubleVector, LongVector, TimestampVector, VectorWrite};

use super::ConvertReader;

pub enum IntegerSource {
    /// Another integer-family file type: down-cast or widen by rank.
    Integer {
        decoder: Box<dyn PrimitiveBatchDecoder<LongVector>>,
        scratch: LongVector,
        source_category: TypeCategory,
    },
    Floating {
        decoder: Box<dyn PrimitiveBatchDecoder<DoubleVector>>,
        scratch: DoubleVector,
    },
    Decimal {
        decoder: Box<dyn PrimitiveBatchDecoder<DecimalVector>>,
        scratch: DecimalVector,
    },
    StringGroup {
        decoder: Box<dyn PrimitiveBatchDecoder<BytesVector>>,
        scratch: BytesVector,
    },
    Timestamp {
        decoder: Box<dyn PrimitiveBatchDecoder<TimestampVector>>,
        scratch: TimestampVector,
    },
}

pub struct IntegerConvertReader {
    source: IntegerSource,
    target: TypeCategory,
}

impl IntegerConvertReader {
    pub fn new(source: IntegerSource, target: TypeCategory) -> Self {
        Self { source, target }
    }
}

/// `AnyIntegerFromAnyInteger` (`§4.2`): down-cast with range check when
/// narrowing, pass through unchanged when widening or equal rank. `target ==
/// BOOLEAN` is itself the lowest rank, so it always takes the down-cast path
/// and gets `down_cast_integer`'s non-zero-maps-to-1 treatment.
fn integer_from_integer(value: i64, source: TypeCategory, target: TypeCategory) -> Option<i64> {
    if target.numeric_rank() < source.numeric_rank() {
        down_cast_integer(value, target)
    } else {
        Some(value)
    }
}

fn integer_from_double(value: f64, target: TypeCategory) -> Option<i64> {
    if !double_fits_in_long(value) {
        return None;
    }
    down_cast_integer(value.trunc() as i64, target)
}

fn integer_from_decimal(unscaled: i128, scale: u8, target: TypeCategory) -> Option<i64> {
    if target == TypeCategory::Boolean {
        return Some(if unscaled == 0 { 0 } else { 1 });
    }
    let int_part = unscaled / 10i128.pow(scale as u32);
    if int_part < i64::MIN as i128 || int_part > i64::MAX as i128 {
        return None;
    }
    down_cast_integer(int_part as i64, target)
}

impl ConvertReader for IntegerConvertReader {
    fn check_encoding(&self) -> Result<()> {
        match &self.source {
            IntegerSource::Integer { decoder, .. } => decoder.check_encoding(),
            IntegerSource::Floating { decoder, .. } => decoder.check_encoding(),
            IntegerSource::Decimal { decoder, .. } => decoder.check_encoding(),
            IntegerSource::StringGroup { decoder, .. } => decoder.check_encoding(),
            IntegerSource::Timestamp { decoder, .. } => decoder.check_encoding(),
        }
    }

    fn start_stripe(&mut self) -> Result<()> {
        match &mut self.source {
            IntegerSource::Integer { decoder, .. } => decoder.start_stripe(),
            IntegerSource::Floating { decoder, .. } => decoder.start_stripe(),
            IntegerSource::Decimal { decoder, .. } => decoder.start_stripe(),
            IntegerSource::StringGroup { decoder, .. } => decoder.start_stripe(),
            IntegerSource::Timestamp { decoder, .. } => decoder.start_stripe(),
        }
    }

    fn seek(&mut self, row: u64) -> Result<()> {
        match &mut self.source {
            IntegerSource::Integer { decoder, .. } => decoder.seek(row),
            IntegerSource::Floating { decoder, .. } => decoder.seek(row),
            IntegerSource::Decimal { decoder, .. } => decoder.seek(row),
            IntegerSource::StringGroup { decoder, .. } => decoder.seek(row),
            IntegerSource::Timestamp { decoder, .. } => decoder.seek(row),
        }
    }

    fn skip_rows(&mut self, count: u64) -> Result<()> {
        match &mut self.source {
            IntegerSource::Integer { decoder, .. } => decoder.skip_rows(count),
            IntegerSource::Floating { decoder, .. } => decoder.skip_rows(count),
            IntegerSource::Decimal { decoder, .. } => decoder.skip_rows(count),
            IntegerSource::StringGroup { decoder, .. } => decoder.skip_rows(count),
            IntegerSource::Timestamp { decoder, .. } => decoder.skip_rows(count),
        }
    }

    fn next_batch(&mut self, output: &mut AnyVector, len: usize) -> Result<()> {
        let target = self.target;
        let out = output.expect_long_mut();
        match &mut self.source {
            IntegerSource::Integer { decoder, scratch, source_category } => {
                decoder.next_batch(scratch, len)?;
                let source_category = *source_category;
                let source = &*scratch;
                drive_conversion(source, out, move |out, i| {
                    match integer_from_integer(source.value(i), source_category, target) {
                        Some(v) => out.set_value(i, v),
                        None => out.set_null(i),
                    }
                });
            }
            IntegerSource::Floating { decoder, scratch } => {
                decoder.next_batch(scratch, len)?;
                let source = &*scratch;
                drive_conversion(source, out, move |out, i| {
                    match integer_from_double(source.value(i), target) {
                        Some(v) => out.set_value(i, v),
                        None => out.set_null(i),
                    }
                });
            }
            IntegerSource::Decimal { decoder, scratch } => {
                decoder.next_batch(scratch, len)?;
                let scale = scratch.scale;
                let source = &*scratch;
                drive_conversion(source, out, move |out, i| {
                    match integer_from_decimal(source.unscaled(i), scale, target) {
                        Some(v) => out.set_value(i, v),
                        None => out.set_null(i),
                    }
                });
            }
            IntegerSource::StringGroup { decoder, scratch } => {
                decoder.next_batch(scratch, len)?;
                let source = &*scratch;
                drive_conversion(source, out, move |out, i| {
                    match parse_long(source.str(i)).and_then(|v| down_cast_integer(v, target)) {
                        Some(v) => out.set_value(i, v),
                        None => out.set_null(i),
                    }
                });
            }
            IntegerSource::Timestamp { decoder, scratch } => {
                decoder.next_batch(scratch, len)?;
                let source = &*scratch;
                drive_conversion(source, out, move |out, i| {
                    match down_cast_integer(source.value(i).seconds, target) {
                        Some(v) => out.set_value(i, v),
                        None => out.set_null(i),
                    }
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
    fn byte_from_long_overflow_nulls() {
        let decoder = FixedBatchDecoder::new(vec![Some(1i64), Some(300), Some(-1), None, Some(128)]);
        let mut reader = IntegerConvertReader::new(
            IntegerSource::Integer {
                decoder: Box::new(decoder),
                scratch: PrimitiveVector::new(),
                source_category: TypeCategory::Long,
            },
            TypeCategory::Byte,
        );
        let mut out = AnyVector::Long(PrimitiveVector::new());
        reader.next_batch(&mut out, 5).unwrap();
        let out = out.expect_long_mut();
        assert_eq!(out.value(0), 1);
        assert!(out.is_null(1));
        assert_eq!(out.value(2), -1);
        assert!(out.is_null(3));
        assert!(out.is_null(4));
    }

    #[test]
    fn long_from_double_handles_overflow_and_nan() {
        let decoder = FixedBatchDecoder::new(vec![
            Some(1e20),
            Some(f64::NAN),
            Some(-0.5),
            Some(9.2233720368547748e18),
        ]);
        let mut reader = IntegerConvertReader::new(
            IntegerSource::Floating {
                decoder: Box::new(decoder),
                scratch: PrimitiveVector::new(),
            },
            TypeCategory::Long,
        );
        let mut out = AnyVector::Long(PrimitiveVector::new());
        reader.next_batch(&mut out, 4).unwrap();
        let out = out.expect_long_mut();
        assert!(out.is_null(0));
        assert!(out.is_null(1));
        assert_eq!(out.value(2), 0);
        assert!(out.is_null(3));
    }

    #[test]
    fn any_nonzero_maps_to_boolean_true() {
        let decoder = FixedBatchDecoder::new(vec![Some(0i64), Some(-5), Some(i64::MIN)]);
        let mut reader = IntegerConvertReader::new(
            IntegerSource::Integer {
                decoder: Box::new(decoder),
                scratch: PrimitiveVector::new(),
                source_category: TypeCategory::Long,
            },
            TypeCategory::Boolean,
        );
        let mut out = AnyVector::Long(PrimitiveVector::new());
        reader.next_batch(&mut out, 3).unwrap();
        let out = out.expect_long_mut();
        assert_eq!(out.value(0), 0);
        assert_eq!(out.value(1), 1);
        assert_eq!(out.value(2), 1);
    }
}
