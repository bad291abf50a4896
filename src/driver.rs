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

//! The vectorized conversion driver, `§4.1`. Every `convert::*` reader
//! delegates the repeating/null bookkeeping here and only supplies the
//! per-element kernel, so the four branches of the batch table (repeating +
//! non-null, repeating + null, flat + no-nulls, flat + has-nulls) are
//! implemented exactly once.

use crate::vector::{VectorRead, VectorWrite};

/// Drives `convert` over `input`, writing into `output`.
///
/// `output` is reset to `input.len()` logical elements first. Then:
/// - If `input` is repeating: index 0 alone is authoritative. A null there
///   propagates to a repeating null output; otherwise `convert` runs once at
///   index 0 and the output is marked repeating too.
/// - Otherwise every index is visited; indices null on the input are nulled
///   on the output without invoking `convert`, and every other index runs
///   `convert`.
///
/// `convert` is responsible for writing a value *or* calling
/// `output.set_null(index)` itself (e.g. on a parse failure or a down-cast
/// that overflows the target range) — the driver only handles nulls that
/// originate from the input side.
pub fn drive_conversion<In, Out, F>(input: &In, output: &mut Out, mut convert: F)
where
    In: VectorRead,
    Out: VectorWrite,
    F: FnMut(&mut Out, usize),
{
    let len = input.len();
    output.reset(len);

    if input.is_repeating() {
        if !input.no_nulls() && input.is_null(0) {
            output.set_null(0);
        } else {
            convert(output, 0);
        }
        output.set_repeating(true);
        return;
    }

    if input.no_nulls() {
        for index in 0..len {
            convert(output, index);
        }
        return;
    }

    for index in 0..len {
        if input.is_null(index) {
            output.set_null(index);
        } else {
            convert(output, index);
        }
    }
}
