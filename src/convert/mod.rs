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

//! Conversion readers, `§4.2`-`§4.9`. One module per target family, each a
//! thin wrapper around a source [`crate::decoder::PrimitiveBatchDecoder`]
//! plus a per-element kernel driven by [`crate::driver::drive_conversion`].

pub mod binary;
pub mod date;
pub mod decimal;
pub mod factory;
pub mod floating;
pub mod integer;
pub mod string;
pub mod timestamp;

use crate::error::Result;
use crate::vector::AnyVector;

/// Implemented by every concrete conversion reader. `next_batch` receives a
/// type-erased output vector (mirroring the teacher's `ArrayBatchDecoder`
/// returning a dynamically-typed `ArrayRef`); each implementation unwraps the
/// variant matching its target category — a mismatch there is a factory bug.
///
/// `check_encoding`/`start_stripe`/`seek`/`skip_rows` are forwarded unchanged
/// to the wrapped source decoder (`§4.10`): no conversion reader snapshots or
/// buffers decoder state beyond its own scratch vector.
pub trait ConvertReader {
    fn check_encoding(&self) -> Result<()>;
    fn start_stripe(&mut self) -> Result<()>;
    fn seek(&mut self, row: u64) -> Result<()>;
    fn skip_rows(&mut self, count: u64) -> Result<()>;
    fn next_batch(&mut self, output: &mut AnyVector, len: usize) -> Result<()>;
}
