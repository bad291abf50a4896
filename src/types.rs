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

//! Type descriptions for both the file-stored type and the reader-requested
//! type. Adapted from the teacher's `schema::DataType`, but without the
//! `column_index`/protobuf concerns that belong to the file-I/O layer.

use std::fmt::{self, Display};

use snafu::ensure;

use crate::category::TypeCategory;
use crate::error::{InvalidMaxLengthSnafu, InvalidPrecisionScaleSnafu, Result};

/// The exact data types this layer knows how to convert between.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeDescription {
    Boolean,
    Byte,
    Short,
    Int,
    Long,
    Float,
    Double,
    String,
    Varchar { max_length: u32 },
    Char { max_length: u32 },
    Binary,
    Decimal { precision: u8, scale: u8 },
    Timestamp,
    Date,
    /// Complex types are carried only so `can_convert`/the factory can reject
    /// them uniformly; no conversion kernel is ever built for these.
    Struct,
    List,
    Map,
    Union,
}

impl TypeDescription {
    pub fn decimal(precision: u8, scale: u8) -> Result<Self> {
        ensure!(
            (1..=38).contains(&precision) && scale <= precision,
            InvalidPrecisionScaleSnafu { precision, scale }
        );
        Ok(TypeDescription::Decimal { precision, scale })
    }

    pub fn varchar(max_length: u32) -> Result<Self> {
        ensure!(max_length >= 1, InvalidMaxLengthSnafu { max_length });
        Ok(TypeDescription::Varchar { max_length })
    }

    pub fn char(max_length: u32) -> Result<Self> {
        ensure!(max_length >= 1, InvalidMaxLengthSnafu { max_length });
        Ok(TypeDescription::Char { max_length })
    }

    pub fn category(&self) -> TypeCategory {
        match self {
            TypeDescription::Boolean => TypeCategory::Boolean,
            TypeDescription::Byte => TypeCategory::Byte,
            TypeDescription::Short => TypeCategory::Short,
            TypeDescription::Int => TypeCategory::Int,
            TypeDescription::Long => TypeCategory::Long,
            TypeDescription::Float => TypeCategory::Float,
            TypeDescription::Double => TypeCategory::Double,
            TypeDescription::String => TypeCategory::String,
            TypeDescription::Varchar { .. } => TypeCategory::Varchar,
            TypeDescription::Char { .. } => TypeCategory::Char,
            TypeDescription::Binary => TypeCategory::Binary,
            TypeDescription::Decimal { .. } => TypeCategory::Decimal,
            TypeDescription::Timestamp => TypeCategory::Timestamp,
            TypeDescription::Date => TypeCategory::Date,
            TypeDescription::Struct => TypeCategory::Struct,
            TypeDescription::List => TypeCategory::List,
            TypeDescription::Map => TypeCategory::Map,
            TypeDescription::Union => TypeCategory::Union,
        }
    }

    pub fn max_length(&self) -> Option<u32> {
        match self {
            TypeDescription::Varchar { max_length } | TypeDescription::Char { max_length } => {
                Some(*max_length)
            }
            _ => None,
        }
    }

    pub fn precision_scale(&self) -> Option<(u8, u8)> {
        match self {
            TypeDescription::Decimal { precision, scale } => Some((*precision, *scale)),
            _ => None,
        }
    }
}

impl Display for TypeDescription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeDescription::Varchar { max_length } => write!(f, "VARCHAR({max_length})"),
            TypeDescription::Char { max_length } => write!(f, "CHAR({max_length})"),
            TypeDescription::Decimal { precision, scale } => {
                write!(f, "DECIMAL({precision}, {scale})")
            }
            other => write!(f, "{}", other.category()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decimal_rejects_out_of_range_precision_and_scale() {
        assert!(TypeDescription::decimal(0, 0).is_err());
        assert!(TypeDescription::decimal(39, 0).is_err());
        assert!(TypeDescription::decimal(5, 6).is_err());
        assert!(TypeDescription::decimal(38, 38).is_ok());
        assert!(TypeDescription::decimal(5, 2).is_ok());
    }

    #[test]
    fn varchar_and_char_reject_zero_length() {
        assert!(TypeDescription::varchar(0).is_err());
        assert!(TypeDescription::char(0).is_err());
        assert!(TypeDescription::varchar(8).is_ok());
    }

    #[test]
    fn display_matches_category_for_simple_types() {
        assert_eq!(TypeDescription::Long.to_string(), "LONG");
        assert_eq!(TypeDescription::Varchar { max_length: 8 }.to_string(), "VARCHAR(8)");
        assert_eq!(
            TypeDescription::Decimal {
                precision: 5,
                scale: 2
            }
            .to_string(),
            "DECIMAL(5, 2)"
        );
    }
}
