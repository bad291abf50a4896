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

//! Column vector shapes, `§3 DATA MODEL`.
//!
//! All vectors share the same null-mask invariant: `no_nulls ⇒` every
//! `is_null[i] == false`, and a vector is *repeating* when `is_repeating`
//! is set, in which case only index 0 is authoritative for the vector's
//! `n` logical elements.

/// Read side of the shared null-mask/repeating contract, implemented by
/// every vector type. This is what the vectorized driver (`driver.rs`)
/// consults on its *input* vector.
pub trait VectorRead {
    fn len(&self) -> usize;
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
    fn no_nulls(&self) -> bool;
    fn is_repeating(&self) -> bool;
    /// Only meaningful when `!no_nulls()`.
    fn is_null(&self, index: usize) -> bool;
}

/// Write side of the contract, implemented by every vector type. This is
/// what the vectorized driver consults on its *output* vector.
pub trait VectorWrite: VectorRead {
    /// Resets the vector for a new batch of `len` logical elements: clears
    /// the repeating flag, sets `no_nulls = true`, and sizes storage to `len`.
    fn reset(&mut self, len: usize);
    fn set_repeating(&mut self, repeating: bool);
    /// Marks `index` as null. Clears `no_nulls` on first call.
    fn set_null(&mut self, index: usize);
}

/// A fixed-capacity batch of `T` with a parallel null mask. Backs
/// `LongVector`, `DoubleVector`, `TimestampVector`, and the storage inside
/// `DecimalVector`.
#[derive(Debug, Clone, Default)]
pub struct PrimitiveVector<T> {
    pub values: Vec<T>,
    pub no_nulls: bool,
    pub is_null: Vec<bool>,
    pub is_repeating: bool,
}

impl<T: Copy + Default> PrimitiveVector<T> {
    pub fn new() -> Self {
        Self {
            values: Vec::new(),
            no_nulls: true,
            is_null: Vec::new(),
            is_repeating: false,
        }
    }

    pub fn set_value(&mut self, index: usize, value: T) {
        self.values[index] = value;
        if !self.no_nulls {
            self.is_null[index] = false;
        }
    }

    pub fn value(&self, index: usize) -> T {
        self.values[index]
    }
}

impl<T: Copy + Default> VectorRead for PrimitiveVector<T> {
    fn len(&self) -> usize {
        self.values.len()
    }

    fn no_nulls(&self) -> bool {
        self.no_nulls
    }

    fn is_repeating(&self) -> bool {
        self.is_repeating
    }

    fn is_null(&self, index: usize) -> bool {
        self.is_null[index]
    }
}

impl<T: Copy + Default> VectorWrite for PrimitiveVector<T> {
    fn reset(&mut self, len: usize) {
        self.values.clear();
        self.values.resize(len, T::default());
        self.is_null.clear();
        self.is_null.resize(len, false);
        self.no_nulls = true;
        self.is_repeating = false;
    }

    fn set_repeating(&mut self, repeating: bool) {
        self.is_repeating = repeating;
    }

    fn set_null(&mut self, index: usize) {
        self.no_nulls = false;
        self.is_null[index] = true;
        self.values[index] = T::default();
    }
}

pub type LongVector = PrimitiveVector<i64>;
pub type DoubleVector = PrimitiveVector<f64>;

/// Nanosecond-resolution instant, stored the way the teacher's `TimestampDecoder`
/// targets `TimestampNanosecondType`: whole seconds since the Unix epoch plus a
/// sub-second nanosecond remainder in `[0, 1_000_000_000)`, so that negative
/// instants (pre-1970) still have a non-negative `nanos` component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Timestamp {
    pub seconds: i64,
    pub nanos: u32,
}

impl Timestamp {
    pub fn new(seconds: i64, nanos: u32) -> Self {
        debug_assert!(nanos < 1_000_000_000);
        Self { seconds, nanos }
    }
}

pub type TimestampVector = PrimitiveVector<Timestamp>;

/// Bytes-group vector: each element is `(start, length)` into a shared growing
/// buffer, per `§3`'s `(buffer_ref, start, length)` shape. Backs `STRING`,
/// `CHAR`, `VARCHAR` and `BINARY` values.
#[derive(Debug, Clone, Default)]
pub struct BytesVector {
    data: Vec<u8>,
    starts: Vec<usize>,
    lengths: Vec<usize>,
    pub no_nulls: bool,
    pub is_null: Vec<bool>,
    pub is_repeating: bool,
}

impl BytesVector {
    pub fn new() -> Self {
        Self {
            data: Vec::new(),
            starts: Vec::new(),
            lengths: Vec::new(),
            no_nulls: true,
            is_null: Vec::new(),
            is_repeating: false,
        }
    }

    /// Appends `bytes` to the shared buffer and records it as the value at `index`.
    pub fn set_bytes(&mut self, index: usize, bytes: &[u8]) {
        let start = self.data.len();
        self.data.extend_from_slice(bytes);
        self.starts[index] = start;
        self.lengths[index] = bytes.len();
        if !self.no_nulls {
            self.is_null[index] = false;
        }
    }

    pub fn bytes(&self, index: usize) -> &[u8] {
        &self.data[self.starts[index]..self.starts[index] + self.lengths[index]]
    }

    /// UTF-8 view of the element. Per `§1` Non-goals, no Unicode normalization
    /// or lossy repair is performed; malformed UTF-8 is a caller bug upstream
    /// of this layer (the source decoder is responsible for only ever storing
    /// valid UTF-8 in STRING/CHAR/VARCHAR columns), so this panics rather than
    /// silently substituting replacement characters.
    pub fn str(&self, index: usize) -> &str {
        std::str::from_utf8(self.bytes(index)).expect("string-group bytes must be valid UTF-8")
    }
}

impl VectorRead for BytesVector {
    fn len(&self) -> usize {
        self.starts.len()
    }

    fn no_nulls(&self) -> bool {
        self.no_nulls
    }

    fn is_repeating(&self) -> bool {
        self.is_repeating
    }

    fn is_null(&self, index: usize) -> bool {
        self.is_null[index]
    }
}

impl VectorWrite for BytesVector {
    fn reset(&mut self, len: usize) {
        self.data.clear();
        self.starts.clear();
        self.starts.resize(len, 0);
        self.lengths.clear();
        self.lengths.resize(len, 0);
        self.is_null.clear();
        self.is_null.resize(len, false);
        self.no_nulls = true;
        self.is_repeating = false;
    }

    fn set_repeating(&mut self, repeating: bool) {
        self.is_repeating = repeating;
    }

    fn set_null(&mut self, index: usize) {
        self.no_nulls = false;
        self.is_null[index] = true;
        self.starts[index] = 0;
        self.lengths[index] = 0;
    }
}

/// Decimal vector, packed as `i128` unscaled values the way the teacher's
/// `array_decoder/decimal.rs` packs ORC `DECIMAL` uniformly into
/// `Decimal128Type` regardless of precision (see `DESIGN.md` for the
/// `Decimal64Vector` open-question resolution).
#[derive(Debug, Clone)]
pub struct DecimalVector {
    inner: PrimitiveVector<i128>,
    pub precision: u8,
    pub scale: u8,
}

impl DecimalVector {
    pub fn new(precision: u8, scale: u8) -> Self {
        Self {
            inner: PrimitiveVector::new(),
            precision,
            scale,
        }
    }

    /// Maximum unscaled magnitude representable at `self.precision`.
    fn max_unscaled(&self) -> i128 {
        10_i128.pow(self.precision as u32) - 1
    }

    /// Writes `unscaled` (at `value_scale`) into `index`, rescaling to this
    /// vector's fixed scale and nulling the slot if the rescaled value
    /// overflows `self.precision`. Mirrors the teacher's
    /// `with_precision_and_scale` + `fix_i128_scale` pair.
    pub fn set(&mut self, index: usize, unscaled: i128, value_scale: i8) {
        let rescaled = rescale(unscaled, value_scale, self.scale as i8);
        if rescaled.unsigned_abs() > self.max_unscaled() as u128 {
            self.set_null(index);
        } else {
            self.inner.set_value(index, rescaled);
        }
    }

    pub fn unscaled(&self, index: usize) -> i128 {
        self.inner.values[index]
    }

    pub fn to_f64(&self, index: usize) -> f64 {
        self.unscaled(index) as f64 / 10f64.powi(self.scale as i32)
    }
}

/// Rescales an unscaled `i128` from `from_scale` to `to_scale` digits after
/// the decimal point, rounding toward zero on narrowing (matches the
/// teacher's `fix_i128_scale`, generalized to allow negative deltas).
pub fn rescale(unscaled: i128, from_scale: i8, to_scale: i8) -> i128 {
    match to_scale.cmp(&from_scale) {
        std::cmp::Ordering::Equal => unscaled,
        std::cmp::Ordering::Greater => {
            let factor = 10_i128.pow((to_scale - from_scale) as u32);
            unscaled * factor
        }
        std::cmp::Ordering::Less => {
            let factor = 10_i128.pow((from_scale - to_scale) as u32);
            unscaled / factor
        }
    }
}

impl VectorRead for DecimalVector {
    fn len(&self) -> usize {
        self.inner.len()
    }

    fn no_nulls(&self) -> bool {
        self.inner.no_nulls()
    }

    fn is_repeating(&self) -> bool {
        self.inner.is_repeating()
    }

    fn is_null(&self, index: usize) -> bool {
        self.inner.is_null(index)
    }
}

impl VectorWrite for DecimalVector {
    fn reset(&mut self, len: usize) {
        self.inner.reset(len);
    }

    fn set_repeating(&mut self, repeating: bool) {
        self.inner.set_repeating(repeating);
    }

    fn set_null(&mut self, index: usize) {
        self.inner.set_null(index);
    }
}

/// Type-erased output vector, the way the teacher's `ArrayBatchDecoder::next_batch`
/// returns a single dynamically-typed `ArrayRef` rather than a generic type per
/// decoder. A [`crate::convert::ConvertReader`] is handed one of these and
/// unwraps the variant its target category requires; a mismatch is a caller/
/// factory bug, not a recoverable condition, so the accessors panic rather
/// than return a `Result`.
pub enum AnyVector {
    Long(LongVector),
    Double(DoubleVector),
    Bytes(BytesVector),
    Decimal(DecimalVector),
    Timestamp(TimestampVector),
}

impl AnyVector {
    pub fn expect_long_mut(&mut self) -> &mut LongVector {
        match self {
            AnyVector::Long(v) => v,
            _ => panic!("expected AnyVector::Long, convert reader/output vector mismatch"),
        }
    }

    pub fn expect_double_mut(&mut self) -> &mut DoubleVector {
        match self {
            AnyVector::Double(v) => v,
            _ => panic!("expected AnyVector::Double, convert reader/output vector mismatch"),
        }
    }

    pub fn expect_bytes_mut(&mut self) -> &mut BytesVector {
        match self {
            AnyVector::Bytes(v) => v,
            _ => panic!("expected AnyVector::Bytes, convert reader/output vector mismatch"),
        }
    }

    pub fn expect_decimal_mut(&mut self) -> &mut DecimalVector {
        match self {
            AnyVector::Decimal(v) => v,
            _ => panic!("expected AnyVector::Decimal, convert reader/output vector mismatch"),
        }
    }

    pub fn expect_timestamp_mut(&mut self) -> &mut TimestampVector {
        match self {
            AnyVector::Timestamp(v) => v,
            _ => panic!("expected AnyVector::Timestamp, convert reader/output vector mismatch"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reset_clears_repeating_and_nulls() {
        let mut v: LongVector = PrimitiveVector::new();
        v.reset(4);
        v.set_repeating(true);
        v.set_null(0);
        assert!(v.is_repeating());
        assert!(!v.no_nulls());

        v.reset(3);
        assert!(!v.is_repeating());
        assert!(v.no_nulls());
        assert_eq!(v.len(), 3);
    }

    #[test]
    fn bytes_vector_round_trips_values() {
        let mut v = BytesVector::new();
        v.reset(2);
        v.set_bytes(0, b"hello");
        v.set_bytes(1, b"world!");
        assert_eq!(v.str(0), "hello");
        assert_eq!(v.str(1), "world!");
    }

    #[test]
    fn bytes_vector_set_null_clears_value() {
        let mut v = BytesVector::new();
        v.reset(1);
        v.set_bytes(0, b"x");
        v.set_null(0);
        assert!(v.is_null(0));
        assert_eq!(v.bytes(0), b"");
    }

    #[test]
    fn decimal_vector_rescales_and_overflows_to_null() {
        let mut v = DecimalVector::new(5, 2);
        v.reset(3);
        v.set(0, 12345, 2); // 123.45 already at scale 2
        assert_eq!(v.unscaled(0), 12345);

        v.set(1, 12345, 3); // 12.345 at scale 3 -> rescale to 1234 (scale 2), truncated
        assert_eq!(v.unscaled(1), 1234);

        v.set(2, 999999, 2); // overflows precision 5 (max 99999)
        assert!(v.is_null(2));
    }

    #[test]
    fn rescale_widens_and_narrows() {
        assert_eq!(rescale(100, 0, 2), 10000);
        assert_eq!(rescale(12345, 3, 1), 123);
        assert_eq!(rescale(42, 5, 5), 42);
    }
}
