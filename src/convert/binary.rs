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

//! Binary conversion readers, `§4.8`/`§4.9`. Any string-group source
//! (`STRING`, `CHAR`, `VARCHAR`) is supported: its bytes are already the raw
//! value, so this reader is a pass-through copy with no reformatting.

use crate::decoder::PrimitiveBatchDecoder;
use crate::driver::drive_conversion;
use crate::error::Result;
use crate::vector::{AnyVector, BytesVector, VectorWrite};

use super::ConvertReader;

pub struct BinaryConvertReader {
    decoder: Box<dyn PrimitiveBatchDecoder<BytesVector>>,
    scratch: BytesVector,
}

impl BinaryConvertReader {
    pub fn new(decoder: Box<dyn PrimitiveBatchDecoder<BytesVector>>) -> Self {
        Self {
            decoder,
            scratch: BytesVector::new(),
        }
    }
}

impl ConvertReader for BinaryConvertReader {
    fn check_encoding(&self) -> Result<()> {
        self.decoder.check_encoding()
    }

    fn start_stripe(&mut self) -> Result<()> {
        self.decoder.start_stripe()
    }

    fn seek(&mut self, row: u64) -> Result<()> {
        self.decoder.seek(row)
    }

    fn skip_rows(&mut self, count: u64) -> Result<()> {
        self.decoder.skip_rows(count)
    }

    fn next_batch(&mut self, output: &mut AnyVector, len: usize) -> Result<()> {
        self.decoder.next_batch(&mut self.scratch, len)?;
        let out = output.expect_bytes_mut();
        let source = &self.scratch;
        drive_conversion(source, out, move |out, i| {
            out.set_bytes(i, source.bytes(i));
        });
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decoder::testing::FixedBytesBatchDecoder;
    use crate::vector::VectorRead;

    #[test]
    fn binary_from_string_copies_raw_bytes() {
        let decoder = FixedBytesBatchDecoder::new(vec![Some(b"hello".to_vec()), None]);
        let mut reader = BinaryConvertReader::new(Box::new(decoder));
        let mut out = AnyVector::Bytes(BytesVector::new());
        reader.next_batch(&mut out, 2).unwrap();
        let out = out.expect_bytes_mut();
        assert_eq!(out.bytes(0), b"hello");
        assert!(out.is_null(1));
    }
}
