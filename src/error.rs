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

use snafu::{Location, Snafu};

use crate::category::TypeCategory;
use crate::types::TypeDescription;

/// Static, unrecoverable failures raised at [`crate::convert::factory::create_convert_reader`]
/// time, plus I/O errors bubbling up unchanged from the wrapped source decoder.
///
/// Per-element failures (parse errors, overflow, NaN sources, precision/scale overflow) never
/// reach this type: they are translated into a null write at the offending output index, and the
/// batch continues. See `§7 ERROR HANDLING DESIGN`.
#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum ConvertError {
    #[snafu(display(
        "Cannot convert file type {file_type} into reader type {reader_type}: no conversion path exists"
    ))]
    UnsupportedConversion {
        file_type: TypeDescription,
        reader_type: TypeDescription,
        #[snafu(implicit)]
        location: Location,
    },

    #[snafu(display(
        "No conversion needed for category {category:?}: caller should not have invoked the conversion layer"
    ))]
    NoConversionNeeded {
        category: TypeCategory,
        #[snafu(implicit)]
        location: Location,
    },

    #[snafu(display(
        "Invalid decimal precision/scale: precision={precision}, scale={scale} (require 1 <= precision <= 38, 0 <= scale <= precision)"
    ))]
    InvalidPrecisionScale {
        precision: u8,
        scale: u8,
        #[snafu(implicit)]
        location: Location,
    },

    #[snafu(display("Invalid max_length {max_length} for CHAR/VARCHAR (require max_length >= 1)"))]
    InvalidMaxLength {
        max_length: u32,
        #[snafu(implicit)]
        location: Location,
    },

    #[snafu(display("Failed to read from underlying decoder, source: {source}"))]
    Source {
        source: std::io::Error,
        #[snafu(implicit)]
        location: Location,
    },
}

pub type Result<T, E = ConvertError> = std::result::Result<T, E>;
