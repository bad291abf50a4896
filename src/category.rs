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

//! The closed type-category enumeration and the numeric rank table used to
//! decide whether an integer-to-integer conversion needs a down-cast range
//! check.

use std::fmt::{self, Display};

/// Category of a (file or reader) type. Mirrors the ORC/Hive type kinds.
///
/// `Char`/`Varchar` carry their `max_length` and `Decimal` its
/// `(precision, scale)` on [`crate::types::TypeDescription`] rather than
/// here; this enum only distinguishes the *kind* for dispatch purposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeCategory {
    Boolean,
    Byte,
    Short,
    Int,
    Long,
    Float,
    Double,
    Decimal,
    String,
    Char,
    Varchar,
    Binary,
    Date,
    Timestamp,
    Struct,
    List,
    Map,
    Union,
}

impl TypeCategory {
    /// Whether this category is one of the unsupported complex types.
    pub fn is_complex(self) -> bool {
        matches!(
            self,
            TypeCategory::Struct | TypeCategory::List | TypeCategory::Map | TypeCategory::Union
        )
    }

    /// Whether this category is part of the string group (`STRING`, `CHAR`, `VARCHAR`),
    /// which share byte storage but differ in trim/truncate semantics.
    pub fn is_string_group(self) -> bool {
        matches!(
            self,
            TypeCategory::String | TypeCategory::Char | TypeCategory::Varchar
        )
    }

    /// Whether this category is part of the integer family for the purposes of the
    /// numeric rank table (used to decide down-casts).
    pub fn is_numeric(self) -> bool {
        matches!(
            self,
            TypeCategory::Boolean
                | TypeCategory::Byte
                | TypeCategory::Short
                | TypeCategory::Int
                | TypeCategory::Long
                | TypeCategory::Float
                | TypeCategory::Double
                | TypeCategory::Decimal
        )
    }

    /// Numeric rank, used to decide whether an integer-family conversion is a
    /// narrowing down-cast. Lower ranks are "smaller" types.
    ///
    /// Ordering: `BOOLEAN < BYTE < SHORT < INT < LONG < FLOAT < DOUBLE < DECIMAL`.
    /// Non-numeric categories have no rank; callers must not call this on them.
    pub fn numeric_rank(self) -> u8 {
        NUMERIC_RANK[self as usize]
    }
}

/// Process-wide immutable constant: rank by discriminant index.
/// Non-numeric categories get a sentinel that is never consulted because
/// `numeric_rank` is only ever called on categories for which `is_numeric()` holds.
const NUMERIC_RANK: [u8; 18] = {
    let mut table = [u8::MAX; 18];
    table[TypeCategory::Boolean as usize] = 0;
    table[TypeCategory::Byte as usize] = 1;
    table[TypeCategory::Short as usize] = 2;
    table[TypeCategory::Int as usize] = 3;
    table[TypeCategory::Long as usize] = 4;
    table[TypeCategory::Float as usize] = 5;
    table[TypeCategory::Double as usize] = 6;
    table[TypeCategory::Decimal as usize] = 7;
    table
};

impl Display for TypeCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TypeCategory::Boolean => "BOOLEAN",
            TypeCategory::Byte => "BYTE",
            TypeCategory::Short => "SHORT",
            TypeCategory::Int => "INT",
            TypeCategory::Long => "LONG",
            TypeCategory::Float => "FLOAT",
            TypeCategory::Double => "DOUBLE",
            TypeCategory::Decimal => "DECIMAL",
            TypeCategory::String => "STRING",
            TypeCategory::Char => "CHAR",
            TypeCategory::Varchar => "VARCHAR",
            TypeCategory::Binary => "BINARY",
            TypeCategory::Date => "DATE",
            TypeCategory::Timestamp => "TIMESTAMP",
            TypeCategory::Struct => "STRUCT",
            TypeCategory::List => "LIST",
            TypeCategory::Map => "MAP",
            TypeCategory::Union => "UNION",
        };
        write!(f, "{name}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rank_is_strictly_increasing_across_numeric_family() {
        let ordered = [
            TypeCategory::Boolean,
            TypeCategory::Byte,
            TypeCategory::Short,
            TypeCategory::Int,
            TypeCategory::Long,
            TypeCategory::Float,
            TypeCategory::Double,
            TypeCategory::Decimal,
        ];
        for pair in ordered.windows(2) {
            assert!(pair[0].numeric_rank() < pair[1].numeric_rank());
        }
    }

    #[test]
    fn complex_categories_are_flagged() {
        assert!(TypeCategory::Struct.is_complex());
        assert!(TypeCategory::List.is_complex());
        assert!(TypeCategory::Map.is_complex());
        assert!(TypeCategory::Union.is_complex());
        assert!(!TypeCategory::Long.is_complex());
    }

    #[test]
    fn string_group_membership() {
        assert!(TypeCategory::String.is_string_group());
        assert!(TypeCategory::Char.is_string_group());
        assert!(TypeCategory::Varchar.is_string_group());
        assert!(!TypeCategory::Binary.is_string_group());
    }
}
