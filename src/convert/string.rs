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

//! String-group conversion readers, `§4.5`. Every writer funnels through
//! [`crate::primitives::string_group_truncate`] (this crate's
//! `assign_string_group`): format to text for the source category, then
//! trim/truncate per the *target* category (`STRING`/`CHAR`/`VARCHAR`).

use crate::category::TypeCategory;
use crate::decoder::PrimitiveBatchDecoder;
use crate::driver::drive_conversion;
use crate::error::Result;
use crate::primitives::{
    binary_to_hex_string, decimal_to_string, format_date, format_long, format_timestamp, string_group_truncate,
};
use crate::vector::{AnyVector, BytesVector, DecimalVector, DoubleVector, LongVector, TimestampVector, VectorWrite};

use super::ConvertReader;

pub enum StringSource {
    /// Covers `BOOLEAN`/`BYTE`/`SHORT`/`INT`/`LONG`/`DATE` file types, all
    /// stored in a `LongVector`; `source_category` picks the formatting rule
    /// (`TRUE`/`FALSE`, `YYYY-MM-DD`, or plain base-10 ASCII).
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
    Timestamp {
        decoder: Box<dyn PrimitiveBatchDecoder<TimestampVector>>,
        scratch: TimestampVector,
    },
    Binary {
        decoder: Box<dyn PrimitiveBatchDecoder<BytesVector>>,
        scratch: BytesVector,
    },
    /// `STRING`/`CHAR`/`VARCHAR` file type converting to a different
    /// string-group target: the decoder hands back text, re-trimmed/truncated
    /// for the new target.
    StringGroup {
        decoder: Box<dyn PrimitiveBatchDecoder<BytesVector>>,
        scratch: BytesVector,
    },
}

pub struct StringConvertReader {
    source: StringSource,
    target: TypeCategory,
    max_length: Option<u32>,
}

impl StringConvertReader {
    pub fn new(source: StringSource, target: TypeCategory, max_length: Option<u32>) -> Self {
        Self { source, target, max_length }
    }
}

impl ConvertReader for StringConvertReader {
    fn check_encoding(&self) -> Result<()> {
        match &self.source {
            StringSource::Integer { decoder, .. } => decoder.check_encoding(),
            StringSource::Floating { decoder, .. } => decoder.check_encoding(),
            StringSource::Decimal { decoder, .. } => decoder.check_encoding(),
            StringSource::Timestamp { decoder, .. } => decoder.check_encoding(),
            StringSource::Binary { decoder, .. } => decoder.check_encoding(),
            StringSource::StringGroup { decoder, .. } => decoder.check_encoding(),
        }
    }

    fn start_stripe(&mut self) -> Result<()> {
        match &mut self.source {
            StringSource::Integer { decoder, .. } => decoder.start_stripe(),
            StringSource::Floating { decoder, .. } => decoder.start_stripe(),
            StringSource::Decimal { decoder, .. } => decoder.start_stripe(),
            StringSource::Timestamp { decoder, .. } => decoder.start_stripe(),
            StringSource::Binary { decoder, .. } => decoder.start_stripe(),
            StringSource::StringGroup { decoder, .. } => decoder.start_stripe(),
        }
    }

    fn seek(&mut self, row: u64) -> Result<()> {
        match &mut self.source {
            StringSource::Integer { decoder, .. } => decoder.seek(row),
            StringSource::Floating { decoder, .. } => decoder.seek(row),
            StringSource::Decimal { decoder, .. } => decoder.seek(row),
            StringSource::Timestamp { decoder, .. } => decoder.seek(row),
            StringSource::Binary { decoder, .. } => decoder.seek(row),
            StringSource::StringGroup { decoder, .. } => decoder.seek(row),
        }
    }

    fn skip_rows(&mut self, count: u64) -> Result<()> {
        match &mut self.source {
            StringSource::Integer { decoder, .. } => decoder.skip_rows(count),
            StringSource::Floating { decoder, .. } => decoder.skip_rows(count),
            StringSource::Decimal { decoder, .. } => decoder.skip_rows(count),
            StringSource::Timestamp { decoder, .. } => decoder.skip_rows(count),
            StringSource::Binary { decoder, .. } => decoder.skip_rows(count),
            StringSource::StringGroup { decoder, .. } => decoder.skip_rows(count),
        }
    }

    fn next_batch(&mut self, output: &mut AnyVector, len: usize) -> Result<()> {
        let target = self.target;
        let max_length = self.max_length;
        let out = output.expect_bytes_mut();
        match &mut self.source {
            StringSource::Integer { decoder, scratch, source_category } => {
                decoder.next_batch(scratch, len)?;
                let source_category = *source_category;
                let source = &*scratch;
                drive_conversion(source, out, move |out, i| {
                    let value = source.value(i);
                    let text = match source_category {
                        TypeCategory::Boolean => if value != 0 { "TRUE".to_string() } else { "FALSE".to_string() },
                        TypeCategory::Date => match format_date(value as i32) {
                            Some(text) => text,
                            None => {
                                out.set_null(i);
                                return;
                            }
                        },
                        _ => format_long(value),
                    };
                    let text = string_group_truncate(&text, target, max_length);
                    out.set_bytes(i, text.as_bytes());
                });
            }
            StringSource::Floating { decoder, scratch } => {
                decoder.next_batch(scratch, len)?;
                let source = &*scratch;
                drive_conversion(source, out, move |out, i| {
                    let value = source.value(i);
                    if value.is_nan() {
                        out.set_null(i);
                        return;
                    }
                    let text = string_group_truncate(&value.to_string(), target, max_length);
                    out.set_bytes(i, text.as_bytes());
                });
            }
            StringSource::Decimal { decoder, scratch } => {
                decoder.next_batch(scratch, len)?;
                let source = &*scratch;
                drive_conversion(source, out, move |out, i| {
                    let text = decimal_to_string(source.unscaled(i), source.scale);
                    let text = string_group_truncate(&text, target, max_length);
                    out.set_bytes(i, text.as_bytes());
                });
            }
            StringSource::Timestamp { decoder, scratch } => {
                decoder.next_batch(scratch, len)?;
                let source = &*scratch;
                drive_conversion(source, out, move |out, i| {
                    let text = match format_timestamp(source.value(i)) {
                        Some(text) => text,
                        None => {
                            out.set_null(i);
                            return;
                        }
                    };
                    let text = string_group_truncate(&text, target, max_length);
                    out.set_bytes(i, text.as_bytes());
                });
            }
            StringSource::Binary { decoder, scratch } => {
                decoder.next_batch(scratch, len)?;
                let source = &*scratch;
                drive_conversion(source, out, move |out, i| {
                    let hex = binary_to_hex_string(source.bytes(i));
                    let hex = string_group_truncate(&hex, target, max_length);
                    out.set_bytes(i, hex.as_bytes());
                });
            }
            StringSource::StringGroup { decoder, scratch } => {
                decoder.next_batch(scratch, len)?;
                let source = &*scratch;
                drive_conversion(source, out, move |out, i| {
                    let text = string_group_truncate(source.str(i), target, max_length);
                    out.set_bytes(i, text.as_bytes());
                });
            }
        }
        Ok(())
    }
}
