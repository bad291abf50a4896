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

//! `§6 EXTERNAL INTERFACES`: the map from reader-requested columns to their
//! on-disk type, and the batch-shaping hints this layer needs from its
//! caller. Building this map (matching reader columns to file columns by
//! name/position across schema versions) is an external collaborator's job;
//! this module only defines the lookup surface [`crate::convert::factory`]
//! consumes.

use std::collections::HashMap;

use crate::types::TypeDescription;

/// Identifies a column as the reader sees it (its position in the reader's
/// requested schema, independent of where — or whether — it appears in the
/// file).
pub type ReaderColumnId = u32;

/// Maps each reader column to the type it is stored as in the file, when
/// that file column exists at all. A reader column absent from the map (e.g.
/// a column added to the schema after the file was written) is not this
/// layer's concern: the caller is expected to supply an all-null column
/// directly rather than asking for a conversion.
#[derive(Debug, Clone, Default)]
pub struct SchemaEvolution {
    file_types: HashMap<ReaderColumnId, TypeDescription>,
}

impl SchemaEvolution {
    pub fn new() -> Self {
        Self {
            file_types: HashMap::new(),
        }
    }

    /// Records that `reader_column` is stored on disk as `file_type`.
    pub fn set_file_type(&mut self, reader_column: ReaderColumnId, file_type: TypeDescription) {
        self.file_types.insert(reader_column, file_type);
    }

    /// The on-disk type of `reader_column`, if this column exists in the file.
    pub fn file_type(&self, reader_column: ReaderColumnId) -> Option<&TypeDescription> {
        self.file_types.get(&reader_column)
    }
}

/// Batch-shaping hints a [`crate::convert::ConvertReader`] needs from its
/// caller. Mirrors the teacher's `DecoderFactoryContext`, narrowed to the two
/// hints a pure type-conversion layer (no compression, no timezone) actually
/// consumes.
#[derive(Debug, Clone, Copy)]
pub struct Context {
    /// Default number of rows materialized per `next_batch` call.
    pub batch_capacity: usize,
    /// Initial capacity reserved in a fresh [`crate::vector::BytesVector`]'s
    /// shared byte buffer, as a sizing hint to avoid repeated reallocation
    /// when converting into the string/binary group.
    pub string_buffer_capacity: usize,
}

impl Default for Context {
    fn default() -> Self {
        Self {
            batch_capacity: 1024,
            string_buffer_capacity: 8 * 1024,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_reader_column_is_not_an_error() {
        let evolution = SchemaEvolution::new();
        assert!(evolution.file_type(0).is_none());
    }

    #[test]
    fn records_and_looks_up_file_type() {
        let mut evolution = SchemaEvolution::new();
        evolution.set_file_type(3, TypeDescription::Long);
        assert_eq!(evolution.file_type(3), Some(&TypeDescription::Long));
        assert_eq!(evolution.file_type(4), None);
    }
}
