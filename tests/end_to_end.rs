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

//! The six end-to-end scenarios from `§8 TESTABLE PROPERTIES`, driven
//! through the public entry points (`can_convert`/`create_convert_reader`)
//! rather than constructing a `*ConvertReader` directly, with synthetic
//! `PrimitiveBatchDecoder` doubles standing in for real file I/O.

use pretty_assertions::assert_eq;

use orc_convert::convert::factory::{can_convert, create_convert_reader, SourceDecoder};
use orc_convert::decoder::testing::{FixedBatchDecoder, FixedBytesBatchDecoder, FixedDecimalBatchDecoder};
use orc_convert::schema_evolution::{Context, SchemaEvolution};
use orc_convert::types::TypeDescription;
use orc_convert::vector::{AnyVector, BytesVector, PrimitiveVector, VectorRead};
use orc_convert::ConvertReader;

fn evolution(reader_column: u32, file_type: TypeDescription) -> SchemaEvolution {
    let mut evolution = SchemaEvolution::new();
    evolution.set_file_type(reader_column, file_type);
    evolution
}

#[test]
fn scenario_1_byte_from_long_overflow_and_null() {
    let file_type = TypeDescription::Long;
    let reader_type = TypeDescription::Byte;
    assert!(can_convert(&file_type, &reader_type));

    let schema = evolution(0, file_type);
    let decoder = FixedBatchDecoder::new(vec![Some(1i64), Some(300), Some(-1), None, Some(128)]);
    let mut reader = create_convert_reader(
        0,
        &reader_type,
        &schema,
        SourceDecoder::Long(Box::new(decoder)),
        &Context::default(),
    )
    .unwrap();

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
fn scenario_2_double_from_string_strict_parse() {
    let file_type = TypeDescription::String;
    let reader_type = TypeDescription::Double;
    assert!(can_convert(&file_type, &reader_type));

    let schema = evolution(0, file_type);
    let decoder = FixedBytesBatchDecoder::new(vec![
        Some(b"3.14".to_vec()),
        Some(b"nope".to_vec()),
        Some(b"".to_vec()),
        Some(b"  2.0".to_vec()),
    ]);
    let mut reader = create_convert_reader(
        0,
        &reader_type,
        &schema,
        SourceDecoder::Bytes(Box::new(decoder)),
        &Context::default(),
    )
    .unwrap();

    let mut out = AnyVector::Double(PrimitiveVector::new());
    reader.next_batch(&mut out, 4).unwrap();
    let out = out.expect_double_mut();
    assert_eq!(out.value(0), 3.14);
    assert!(out.is_null(1));
    assert!(out.is_null(2));
    assert!(out.is_null(3));
}

#[test]
fn scenario_3_string_from_decimal_canonical_form() {
    let file_type = TypeDescription::decimal(5, 2).unwrap();
    let reader_type = TypeDescription::String;
    assert!(can_convert(&file_type, &reader_type));

    let schema = evolution(0, file_type);
    let decoder = FixedDecimalBatchDecoder::new(vec![Some((12345, 2)), Some((9999, 2)), Some((-1, 2))]);
    let mut reader = create_convert_reader(
        0,
        &reader_type,
        &schema,
        SourceDecoder::Decimal(Box::new(decoder)),
        &Context::default(),
    )
    .unwrap();

    let mut out = AnyVector::Bytes(BytesVector::new());
    reader.next_batch(&mut out, 3).unwrap();
    let out = out.expect_bytes_mut();
    assert_eq!(out.str(0), "123.45");
    assert_eq!(out.str(1), "99.99");
    assert_eq!(out.str(2), "-0.01");
}

#[test]
fn scenario_4_varchar_from_binary_hex_truncated() {
    let file_type = TypeDescription::Binary;
    let reader_type = TypeDescription::varchar(8).unwrap();
    assert!(can_convert(&file_type, &reader_type));

    let schema = evolution(0, file_type);
    let decoder = FixedBytesBatchDecoder::new(vec![Some(vec![0xde, 0xad, 0xbe, 0xef])]);
    let mut reader = create_convert_reader(
        0,
        &reader_type,
        &schema,
        SourceDecoder::Bytes(Box::new(decoder)),
        &Context::default(),
    )
    .unwrap();

    let mut out = AnyVector::Bytes(BytesVector::new());
    reader.next_batch(&mut out, 1).unwrap();
    let out = out.expect_bytes_mut();
    assert_eq!(out.str(0), "de ad be");
}

#[test]
fn scenario_5_long_from_double_overflow_and_nan() {
    let file_type = TypeDescription::Double;
    let reader_type = TypeDescription::Long;
    assert!(can_convert(&file_type, &reader_type));

    let schema = evolution(0, file_type);
    let decoder = FixedBatchDecoder::new(vec![
        Some(1e20),
        Some(f64::NAN),
        Some(-0.5),
        Some(9.2233720368547748e18),
    ]);
    let mut reader = create_convert_reader(
        0,
        &reader_type,
        &schema,
        SourceDecoder::Double(Box::new(decoder)),
        &Context::default(),
    )
    .unwrap();

    let mut out = AnyVector::Long(PrimitiveVector::new());
    reader.next_batch(&mut out, 4).unwrap();
    let out = out.expect_long_mut();
    assert!(out.is_null(0));
    assert!(out.is_null(1));
    assert_eq!(out.value(2), 0);
    assert!(out.is_null(3));
}

#[test]
fn scenario_6_date_from_timestamp_floors_toward_negative_infinity() {
    use orc_convert::vector::Timestamp;

    let file_type = TypeDescription::Timestamp;
    let reader_type = TypeDescription::Date;
    assert!(can_convert(&file_type, &reader_type));

    let schema = evolution(0, file_type);
    let decoder = FixedBatchDecoder::new(vec![Some(Timestamp::new(1, 0)), Some(Timestamp::new(-1, 0))]);
    let mut reader = create_convert_reader(
        0,
        &reader_type,
        &schema,
        SourceDecoder::Timestamp(Box::new(decoder)),
        &Context::default(),
    )
    .unwrap();

    let mut out = AnyVector::Long(PrimitiveVector::new());
    reader.next_batch(&mut out, 2).unwrap();
    let out = out.expect_long_mut();
    assert_eq!(out.value(0), 0);
    assert_eq!(out.value(1), -1);
}

#[test]
fn same_type_is_rejected_as_no_conversion_needed() {
    let schema = evolution(0, TypeDescription::Long);
    let err = create_convert_reader(
        0,
        &TypeDescription::Long,
        &schema,
        SourceDecoder::Long(Box::new(FixedBatchDecoder::new(vec![Some(1i64)]))),
        &Context::default(),
    )
    .unwrap_err();
    assert!(matches!(err, orc_convert::ConvertError::NoConversionNeeded { .. }));
}

#[test]
fn numeric_to_binary_is_rejected_as_unsupported() {
    let schema = evolution(0, TypeDescription::Long);
    let err = create_convert_reader(
        0,
        &TypeDescription::Binary,
        &schema,
        SourceDecoder::Long(Box::new(FixedBatchDecoder::new(vec![Some(1i64)]))),
        &Context::default(),
    )
    .unwrap_err();
    assert!(matches!(err, orc_convert::ConvertError::UnsupportedConversion { .. }));
}

#[test]
fn decimal_rescale_preserves_the_files_native_scale() {
    // A DECIMAL(5,2) file column converting to DOUBLE must read its own scale,
    // not some arbitrary scratch scale, or the unscaled value gets distorted
    // before the kernel ever sees it.
    let file_type = TypeDescription::decimal(5, 2).unwrap();
    let reader_type = TypeDescription::Double;
    let schema = evolution(0, file_type);
    let decoder = FixedDecimalBatchDecoder::new(vec![Some((12345, 2))]);
    let mut reader = create_convert_reader(
        0,
        &reader_type,
        &schema,
        SourceDecoder::Decimal(Box::new(decoder)),
        &Context::default(),
    )
    .unwrap();

    let mut out = AnyVector::Double(PrimitiveVector::new());
    reader.next_batch(&mut out, 1).unwrap();
    let out = out.expect_double_mut();
    assert_eq!(out.value(0), 123.45);
}
