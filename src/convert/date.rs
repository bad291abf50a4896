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

//! Date conversion readers, `§4.7`. `DATE` values live in a `LongVector` as
//! a day count since the Unix epoch (may be negative, pre-1970).

use crate::decoder::PrimitiveBatchDecoder;
use crate::driver::drive_conversion;
use crate::error::Result;
use crate::primitives::parse_date;
use crate::vector::{AnyVector, BytesVector, LongVector, TimestampVector, VectorWrite};

use super::ConvertReader;

pub enum DateSource {
    StringGroup {
        decoder: Box<dyn PrimitiveBatchDecoder<BytesVector>>,
        scratch: BytesVector,
    },
    Timestamp {
        decoder: Box<dyn PrimitiveBatchDecoder<TimestampVector>>,
        scratch: TimestampVector,
    },
}

pub struct DateConvertReader {
    source: DateSource,
}

impl DateConvertReader {
    pub fn new(source: DateSource) -> Self {
        Self { source }
    }
}

impl ConvertReader for DateConvertReader {
    fn check_encoding(&self) -> Result<()> {
        match &self.source {
            DateSource::StringGroup { decoder, .. } => decoder.check_encoding(),
            DateSource::Timestamp { decoder, .. } => decoder.check_encoding(),
        }
    }

    fn start_stripe(&mut self) -> Result<()> {
        match &mut self.source {
            DateSource::StringGroup { decoder, .. } => decoder.start_stripe(),
            DateSource::Timestamp { decoder, .. } => decoder.start_stripe(),
        }
    }

    fn seek(&mut self, row: u64) -> Result<()> {
        match &mut self.source {
            DateSource::StringGroup { decoder, .. } => decoder.seek(row),
            DateSource::Timestamp { decoder, .. } => decoder.seek(row),
        }
    }

    fn skip_rows(&mut self, count: u64) -> Result<()> {
        match &mut self.source {
            DateSource::StringGroup { decoder, .. } => decoder.skip_rows(count),
            DateSource::Timestamp { decoder, .. } => decoder.skip_rows(count),
        }
    }

    fn next_batch(&mut self, output: &mut AnyVector, len: usize) -> Result<()> {
        let out = output.expect_long_mut();
        match &mut self.source {
            DateSource::StringGroup { decoder, scratch } => {
                decoder.next_batch(scratch, len)?;
                let source = &*scratch;
                drive_conversion(source, out, move |out, i| match parse_date(source.str(i)) {
                    Some(days) => out.set_value(i, days as i64),
                    None => out.set_null(i),
                });
            }
            DateSource::Timestamp { decoder, scratch } => {
                decoder.next_batch(scratch, len)?;
                let source = &*scratch;
                drive_conversion(source, out, move |out, i| {
                    // floor(seconds / 86_400): `div_euclid` rounds toward negative
                    // infinity for a positive divisor, matching "midnight of the day
                    // containing this instant" for pre-epoch instants too.
                    out.set_value(i, source.value(i).seconds.div_euclid(86_400));
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
    use crate::vector::{PrimitiveVector, Timestamp, VectorRead};

    #[test]
    fn date_from_timestamp_handles_pre_epoch_instant() {
        let decoder = FixedBatchDecoder::new(vec![Some(Timestamp::new(1, 0)), Some(Timestamp::new(-1, 0))]);
        let mut reader = DateConvertReader::new(DateSource::Timestamp {
            decoder: Box::new(decoder),
            scratch: PrimitiveVector::new(),
        });
        let mut out = AnyVector::Long(PrimitiveVector::new());
        reader.next_batch(&mut out, 2).unwrap();
        let out = out.expect_long_mut();
        assert_eq!(out.value(0), 0);
        assert_eq!(out.value(1), -1);
    }
}
