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

//! Float/double conversion readers, `§4.3`. Both `FLOAT` and `DOUBLE` are
//! stored in a [`DoubleVector`] (there is no separate `f32` vector type, see
//! `vector.rs`); a `FLOAT` target additionally rounds every result through
//! `f32` precision via [`narrow_to_float_if_needed`], which is how
//! `FloatFromDouble` (`§4.3`) is expressed here and is generalized to every
//! source family reaching a `FLOAT` target, not only a `DOUBLE` file column.

use crate::category::TypeCategory;
use crate::decoder::PrimitiveBatchDecoder;
use crate::driver::drive_conversion;
use crate::error::Result;
use crate::primitives::{decimal_to_double, parse_double, timestamp_to_double};
use crate::vector::{AnyVector, BytesVector, DecimalVector, DoubleVector, LongVector, TimestampVector, VectorWrite};

use super::ConvertReader;

pub enum FloatingSource {
    /// Covers both a `FLOAT` and a `DOUBLE` file column: both live in a
    /// `DoubleVector`, so the only difference is whether the result is
    /// re-narrowed through `f32` on the way out (decided by `target`).
    Floating {
        decoder: Box<dyn PrimitiveBatchDecoder<DoubleVector>>,
        scratch: DoubleVector,
    },
    Integer {
        decoder: Box<dyn PrimitiveBatchDecoder<LongVector>>,
        scratch: LongVector,
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

pub struct FloatingConvertReader {
    source: FloatingSource,
    target: TypeCategory,
}

impl FloatingConvertReader {
    pub fn new(source: FloatingSource, target: TypeCategory) -> Self {
        Self { source, target }
    }
}

/// `output[i] == (f64)((f32) input[i])` exactly, including signed zero and
/// subnormals, when `target == FLOAT`; identity when `target == DOUBLE`.
/// Overflow saturates to `±∞` rather than nulling, per `§4.3`.
fn narrow_to_float_if_needed(value: f64, target: TypeCategory) -> f64 {
    if target == TypeCategory::Float {
        value as f32 as f64
    } else {
        value
    }
}

impl ConvertReader for FloatingConvertReader {
    fn check_encoding(&self) -> Result<()> {
        match &self.source {
            FloatingSource::Floating { decoder, .. } => decoder.check_encoding(),
            FloatingSource::Integer { decoder, .. } => decoder.check_encoding(),
            FloatingSource::Decimal { decoder, .. } => decoder.check_encoding(),
            FloatingSource::StringGroup { decoder, .. } => decoder.check_encoding(),
            FloatingSource::Timestamp { decoder, .. } => decoder.check_encoding(),
        }
    }

    fn start_stripe(&mut self) -> Result<()> {
        match &mut self.source {
            FloatingSource::Floating { decoder, .. } => decoder.start_stripe(),
            FloatingSource::Integer { decoder, .. } => decoder.start_stripe(),
            FloatingSource::Decimal { decoder, .. } => decoder.start_stripe(),
            FloatingSource::StringGroup { decoder, .. } => decoder.start_stripe(),
            FloatingSource::Timestamp { decoder, .. } => decoder.start_stripe(),
        }
    }

    fn seek(&mut self, row: u64) -> Result<()> {
        match &mut self.source {
            FloatingSource::Floating { decoder, .. } => decoder.seek(row),
            FloatingSource::Integer { decoder, .. } => decoder.seek(row),
            FloatingSource::Decimal { decoder, .. } => decoder.seek(row),
            FloatingSource::StringGroup { decoder, .. } => decoder.seek(row),
            FloatingSource::Timestamp { decoder, .. } => decoder.seek(row),
        }
    }

    fn skip_rows(&mut self, count: u64) -> Result<()> {
        match &mut self.source {
            FloatingSource::Floating { decoder, .. } => decoder.skip_rows(count),
            FloatingSource::Integer { decoder, .. } => decoder.skip_rows(count),
            FloatingSource::Decimal { decoder, .. } => decoder.skip_rows(count),
            FloatingSource::StringGroup { decoder, .. } => decoder.skip_rows(count),
            FloatingSource::Timestamp { decoder, .. } => decoder.skip_rows(count),
        }
    }

    fn next_batch(&mut self, output: &mut AnyVector, len: usize) -> Result<()> {
        let target = self.target;
        let out = output.expect_double_mut();
        match &mut self.source {
            FloatingSource::Floating { decoder, scratch } => {
                decoder.next_batch(scratch, len)?;
                let source = &*scratch;
                drive_conversion(source, out, move |out, i| {
                    out.set_value(i, narrow_to_float_if_needed(source.value(i), target));
                });
            }
            FloatingSource::Integer { decoder, scratch } => {
                decoder.next_batch(scratch, len)?;
                let source = &*scratch;
                drive_conversion(source, out, move |out, i| {
                    out.set_value(i, narrow_to_float_if_needed(source.value(i) as f64, target));
                });
            }
            FloatingSource::Decimal { decoder, scratch } => {
                decoder.next_batch(scratch, len)?;
                let source = &*scratch;
                drive_conversion(source, out, move |out, i| {
                    let value = decimal_to_double(source.unscaled(i), source.scale);
                    out.set_value(i, narrow_to_float_if_needed(value, target));
                });
            }
            FloatingSource::StringGroup { decoder, scratch } => {
                decoder.next_batch(scratch, len)?;
                let source = &*scratch;
                drive_conversion(source, out, move |out, i| match parse_double(source.str(i)) {
                    Some(value) => out.set_value(i, narrow_to_float_if_needed(value, target)),
                    None => out.set_null(i),
                });
            }
            FloatingSource::Timestamp { decoder, scratch } => {
                decoder.next_batch(scratch, len)?;
                let source = &*scratch;
                drive_conversion(source, out, move |out, i| {
                    let value = timestamp_to_double(source.value(i));
                    out.set_value(i, narrow_to_float_if_needed(value, target));
                });
            }
        }
        Ok(())
    }
}
