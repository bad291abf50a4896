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

//! `create_convert_reader` + `can_convert`, `§4.9`. Dispatches on the file
//! type's category to one of seven sub-factories, each of which dispatches
//! further on the reader type's category — mirroring the teacher's
//! `array_decoder_factory`'s nested `match (data_type, field_type)`, minus
//! its `MismatchedSchemaSnafu` catch-all (this crate's whole purpose is to
//! fill that gap).

use crate::category::TypeCategory;
use crate::decoder::PrimitiveBatchDecoder;
use crate::error::{NoConversionNeededSnafu, Result, UnsupportedConversionSnafu};
use crate::schema_evolution::{Context, ReaderColumnId, SchemaEvolution};
use crate::types::TypeDescription;
use crate::vector::{BytesVector, DecimalVector, DoubleVector, LongVector, TimestampVector};

use super::binary::BinaryConvertReader;
use super::date::{DateConvertReader, DateSource};
use super::decimal::{DecimalConvertReader, DecimalSource};
use super::floating::{FloatingConvertReader, FloatingSource};
use super::integer::{IntegerConvertReader, IntegerSource};
use super::string::{StringConvertReader, StringSource};
use super::timestamp::{TimestampConvertReader, TimestampSource};
use super::ConvertReader;

/// The on-disk decoder for one column, already built by the external
/// collaborator for `file_type`'s vector kind. Which variant is supplied
/// must agree with `file_type.category()` — [`create_convert_reader`]
/// `expect`s the matching one, since a mismatch there is a caller bug, not a
/// recoverable condition (analogous to how the teacher trusts its own
/// `column.data_type()` dispatch in `array_decoder_factory`).
pub enum SourceDecoder {
    Long(Box<dyn PrimitiveBatchDecoder<LongVector>>),
    Double(Box<dyn PrimitiveBatchDecoder<DoubleVector>>),
    Bytes(Box<dyn PrimitiveBatchDecoder<BytesVector>>),
    Decimal(Box<dyn PrimitiveBatchDecoder<DecimalVector>>),
    Timestamp(Box<dyn PrimitiveBatchDecoder<TimestampVector>>),
}

impl SourceDecoder {
    fn expect_long(self) -> Box<dyn PrimitiveBatchDecoder<LongVector>> {
        match self {
            SourceDecoder::Long(d) => d,
            _ => panic!("SourceDecoder must be ::Long for an integer-family/date file type"),
        }
    }

    fn expect_double(self) -> Box<dyn PrimitiveBatchDecoder<DoubleVector>> {
        match self {
            SourceDecoder::Double(d) => d,
            _ => panic!("SourceDecoder must be ::Double for a FLOAT/DOUBLE file type"),
        }
    }

    fn expect_bytes(self) -> Box<dyn PrimitiveBatchDecoder<BytesVector>> {
        match self {
            SourceDecoder::Bytes(d) => d,
            _ => panic!("SourceDecoder must be ::Bytes for a STRING/CHAR/VARCHAR/BINARY file type"),
        }
    }

    fn expect_decimal(self) -> Box<dyn PrimitiveBatchDecoder<DecimalVector>> {
        match self {
            SourceDecoder::Decimal(d) => d,
            _ => panic!("SourceDecoder must be ::Decimal for a DECIMAL file type"),
        }
    }

    fn expect_timestamp(self) -> Box<dyn PrimitiveBatchDecoder<TimestampVector>> {
        match self {
            SourceDecoder::Timestamp(d) => d,
            _ => panic!("SourceDecoder must be ::Timestamp for a TIMESTAMP file type"),
        }
    }
}

/// `§4.9`'s disallowed-pairs table. `complex` types and identical
/// `(file_type, reader_type)` pairs are handled by the caller
/// ([`can_convert`]/[`create_convert_reader`]) before this is consulted.
fn category_pair_allowed(file_category: TypeCategory, reader_category: TypeCategory) -> bool {
    match file_category {
        c if c.is_numeric() => !matches!(reader_category, TypeCategory::Binary | TypeCategory::Date),
        TypeCategory::Timestamp => reader_category != TypeCategory::Binary,
        TypeCategory::Date => matches!(
            reader_category,
            TypeCategory::String | TypeCategory::Char | TypeCategory::Varchar | TypeCategory::Timestamp | TypeCategory::Date
        ),
        // Binary's only valid targets are the string group (including itself, excluded
        // upstream by the identical-type check). See `convert::binary` for the
        // §4.8-vs-§4.9 resolution on which string-group categories may source BINARY.
        TypeCategory::Binary => matches!(
            reader_category,
            TypeCategory::String | TypeCategory::Char | TypeCategory::Varchar | TypeCategory::Binary
        ),
        _ if file_category.is_string_group() => true,
        _ => false,
    }
}

/// Pure predicate mirroring the factory's support matrix without allocating
/// a reader (`§6`).
pub fn can_convert(file_type: &TypeDescription, reader_type: &TypeDescription) -> bool {
    let file_category = file_type.category();
    let reader_category = reader_type.category();
    if file_category.is_complex() || reader_category.is_complex() {
        return false;
    }
    if file_type == reader_type {
        return false;
    }
    category_pair_allowed(file_category, reader_category)
}

/// Builds the conversion reader for `reader_column`, consulting
/// `schema_evolution` to find that column's on-disk type. `source` must be
/// the decoder already built for that file type's vector kind.
pub fn create_convert_reader(
    reader_column: ReaderColumnId,
    reader_type: &TypeDescription,
    schema_evolution: &SchemaEvolution,
    source: SourceDecoder,
    _context: &Context,
) -> Result<Box<dyn ConvertReader>> {
    // A reader column absent from the file is not this layer's concern (the
    // caller supplies an all-null column instead of asking for a conversion),
    // so calling this with such a column is a caller bug.
    let file_type = schema_evolution
        .file_type(reader_column)
        .unwrap_or_else(|| panic!("reader_column {reader_column} has no file type in schema_evolution"))
        .clone();

    let file_category = file_type.category();
    let reader_category = reader_type.category();

    if file_category.is_complex() || reader_category.is_complex() {
        return UnsupportedConversionSnafu {
            file_type: file_type.clone(),
            reader_type: reader_type.clone(),
        }
        .fail();
    }
    if file_type == *reader_type {
        return NoConversionNeededSnafu { category: file_category }.fail();
    }
    if !category_pair_allowed(file_category, reader_category) {
        return UnsupportedConversionSnafu { file_type, reader_type: reader_type.clone() }.fail();
    }

    let max_length = reader_type.max_length();

    // A scratch `DecimalVector` that reads a DECIMAL file column must share
    // its native (precision, scale), or `DecimalVector::set`'s rescale step
    // would silently distort every value on the way into the scratch buffer.
    let file_decimal_scale = file_type.precision_scale();

    let reader: Box<dyn ConvertReader> = match reader_category {
        TypeCategory::Boolean | TypeCategory::Byte | TypeCategory::Short | TypeCategory::Int | TypeCategory::Long => {
            Box::new(IntegerConvertReader::new(
                integer_source(file_category, file_decimal_scale, source),
                reader_category,
            ))
        }
        TypeCategory::Float | TypeCategory::Double => Box::new(FloatingConvertReader::new(
            floating_source(file_category, file_decimal_scale, source),
            reader_category,
        )),
        TypeCategory::Decimal => {
            Box::new(DecimalConvertReader::new(decimal_source(file_category, file_decimal_scale, source)))
        }
        TypeCategory::String | TypeCategory::Char | TypeCategory::Varchar => Box::new(StringConvertReader::new(
            string_source(file_category, file_decimal_scale, source),
            reader_category,
            max_length,
        )),
        TypeCategory::Timestamp => {
            Box::new(TimestampConvertReader::new(timestamp_source(file_category, file_decimal_scale, source)))
        }
        TypeCategory::Date => Box::new(DateConvertReader::new(date_source(file_category, source))),
        TypeCategory::Binary => Box::new(BinaryConvertReader::new(source.expect_bytes())),
        TypeCategory::Struct | TypeCategory::List | TypeCategory::Map | TypeCategory::Union => unreachable!(
            "complex reader categories are rejected above"
        ),
    };

    Ok(reader)
}

fn decimal_scratch(file_decimal_scale: Option<(u8, u8)>) -> DecimalVector {
    let (precision, scale) = file_decimal_scale.expect("file type must be DECIMAL here");
    DecimalVector::new(precision, scale)
}

fn integer_source(
    file_category: TypeCategory,
    file_decimal_scale: Option<(u8, u8)>,
    source: SourceDecoder,
) -> IntegerSource {
    match file_category {
        TypeCategory::Float | TypeCategory::Double => IntegerSource::Floating {
            decoder: source.expect_double(),
            scratch: DoubleVector::new(),
        },
        TypeCategory::Decimal => IntegerSource::Decimal {
            decoder: source.expect_decimal(),
            scratch: decimal_scratch(file_decimal_scale),
        },
        TypeCategory::String | TypeCategory::Char | TypeCategory::Varchar => IntegerSource::StringGroup {
            decoder: source.expect_bytes(),
            scratch: BytesVector::new(),
        },
        TypeCategory::Timestamp => IntegerSource::Timestamp {
            decoder: source.expect_timestamp(),
            scratch: TimestampVector::new(),
        },
        _ => IntegerSource::Integer {
            decoder: source.expect_long(),
            scratch: LongVector::new(),
            source_category: file_category,
        },
    }
}

fn floating_source(
    file_category: TypeCategory,
    file_decimal_scale: Option<(u8, u8)>,
    source: SourceDecoder,
) -> FloatingSource {
    match file_category {
        TypeCategory::Float | TypeCategory::Double => FloatingSource::Floating {
            decoder: source.expect_double(),
            scratch: DoubleVector::new(),
        },
        TypeCategory::Decimal => FloatingSource::Decimal {
            decoder: source.expect_decimal(),
            scratch: decimal_scratch(file_decimal_scale),
        },
        TypeCategory::String | TypeCategory::Char | TypeCategory::Varchar => FloatingSource::StringGroup {
            decoder: source.expect_bytes(),
            scratch: BytesVector::new(),
        },
        TypeCategory::Timestamp => FloatingSource::Timestamp {
            decoder: source.expect_timestamp(),
            scratch: TimestampVector::new(),
        },
        _ => FloatingSource::Integer {
            decoder: source.expect_long(),
            scratch: LongVector::new(),
        },
    }
}

fn decimal_source(
    file_category: TypeCategory,
    file_decimal_scale: Option<(u8, u8)>,
    source: SourceDecoder,
) -> DecimalSource {
    match file_category {
        TypeCategory::Float | TypeCategory::Double => DecimalSource::Floating {
            decoder: source.expect_double(),
            scratch: DoubleVector::new(),
        },
        TypeCategory::String | TypeCategory::Char | TypeCategory::Varchar => DecimalSource::StringGroup {
            decoder: source.expect_bytes(),
            scratch: BytesVector::new(),
        },
        TypeCategory::Timestamp => DecimalSource::Timestamp {
            decoder: source.expect_timestamp(),
            scratch: TimestampVector::new(),
        },
        TypeCategory::Decimal => DecimalSource::Decimal {
            decoder: source.expect_decimal(),
            scratch: decimal_scratch(file_decimal_scale),
        },
        _ => DecimalSource::Integer {
            decoder: source.expect_long(),
            scratch: LongVector::new(),
        },
    }
}

fn string_source(
    file_category: TypeCategory,
    file_decimal_scale: Option<(u8, u8)>,
    source: SourceDecoder,
) -> StringSource {
    match file_category {
        TypeCategory::Float | TypeCategory::Double => StringSource::Floating {
            decoder: source.expect_double(),
            scratch: DoubleVector::new(),
        },
        TypeCategory::Decimal => StringSource::Decimal {
            decoder: source.expect_decimal(),
            scratch: decimal_scratch(file_decimal_scale),
        },
        TypeCategory::Timestamp => StringSource::Timestamp {
            decoder: source.expect_timestamp(),
            scratch: TimestampVector::new(),
        },
        TypeCategory::Binary => StringSource::Binary {
            decoder: source.expect_bytes(),
            scratch: BytesVector::new(),
        },
        TypeCategory::String | TypeCategory::Char | TypeCategory::Varchar => StringSource::StringGroup {
            decoder: source.expect_bytes(),
            scratch: BytesVector::new(),
        },
        _ => StringSource::Integer {
            decoder: source.expect_long(),
            scratch: LongVector::new(),
            source_category: file_category,
        },
    }
}

fn timestamp_source(
    file_category: TypeCategory,
    file_decimal_scale: Option<(u8, u8)>,
    source: SourceDecoder,
) -> TimestampSource {
    match file_category {
        TypeCategory::Float | TypeCategory::Double => TimestampSource::Floating {
            decoder: source.expect_double(),
            scratch: DoubleVector::new(),
        },
        TypeCategory::Decimal => TimestampSource::Decimal {
            decoder: source.expect_decimal(),
            scratch: decimal_scratch(file_decimal_scale),
        },
        TypeCategory::String | TypeCategory::Char | TypeCategory::Varchar => TimestampSource::StringGroup {
            decoder: source.expect_bytes(),
            scratch: BytesVector::new(),
        },
        TypeCategory::Date => TimestampSource::Date {
            decoder: source.expect_long(),
            scratch: LongVector::new(),
        },
        _ => TimestampSource::Integer {
            decoder: source.expect_long(),
            scratch: LongVector::new(),
        },
    }
}

fn date_source(file_category: TypeCategory, source: SourceDecoder) -> DateSource {
    match file_category {
        TypeCategory::Timestamp => DateSource::Timestamp {
            decoder: source.expect_timestamp(),
            scratch: TimestampVector::new(),
        },
        _ => DateSource::StringGroup {
            decoder: source.expect_bytes(),
            scratch: BytesVector::new(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn can_convert_rejects_identical_types() {
        assert!(!can_convert(&TypeDescription::Long, &TypeDescription::Long));
    }

    #[test]
    fn can_convert_allows_decimal_rescale() {
        let a = TypeDescription::decimal(5, 2).unwrap();
        let b = TypeDescription::decimal(7, 3).unwrap();
        assert!(can_convert(&a, &b));
    }

    #[test]
    fn can_convert_rejects_numeric_to_binary_and_date() {
        assert!(!can_convert(&TypeDescription::Long, &TypeDescription::Binary));
        assert!(!can_convert(&TypeDescription::Double, &TypeDescription::Date));
    }

    #[test]
    fn can_convert_rejects_date_to_numeric() {
        assert!(!can_convert(&TypeDescription::Date, &TypeDescription::Long));
    }

    #[test]
    fn can_convert_allows_date_to_string_and_timestamp() {
        assert!(can_convert(&TypeDescription::Date, &TypeDescription::String));
        assert!(can_convert(&TypeDescription::Date, &TypeDescription::Timestamp));
    }

    #[test]
    fn can_convert_allows_string_group_to_binary() {
        assert!(can_convert(&TypeDescription::String, &TypeDescription::Binary));
        assert!(can_convert(&TypeDescription::varchar(8).unwrap(), &TypeDescription::Binary));
    }

    #[test]
    fn can_convert_rejects_binary_to_numeric() {
        assert!(!can_convert(&TypeDescription::Binary, &TypeDescription::Long));
        assert!(!can_convert(&TypeDescription::Binary, &TypeDescription::Timestamp));
    }

    #[test]
    fn can_convert_rejects_timestamp_to_binary_only() {
        assert!(!can_convert(&TypeDescription::Timestamp, &TypeDescription::Binary));
        assert!(can_convert(&TypeDescription::Timestamp, &TypeDescription::Date));
    }
}
