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

//! Schema-evolution type-conversion layer for columnar file readers.
//!
//! When a reader requests a column in a logical type different from the one
//! stored on disk, [`convert::factory::create_convert_reader`] builds a
//! [`convert::ConvertReader`] that interposes between the on-disk decoder and
//! the caller's column vector, converting batch-at-a-time while preserving
//! null propagation. [`convert::factory::can_convert`] answers whether such a
//! reader can be built at all, without allocating one.
//!
//! The primitive decoders, the schema-evolution map from reader columns to
//! file columns, and stripe/file lifecycle are external collaborators: this
//! crate only defines the trait boundary ([`decoder::PrimitiveBatchDecoder`],
//! [`schema_evolution::SchemaEvolution`]) through which they're consumed.

pub mod category;
pub mod convert;
pub mod decoder;
pub mod driver;
pub mod error;
pub mod primitives;
pub mod schema_evolution;
pub mod types;
pub mod vector;

pub use category::TypeCategory;
pub use convert::factory::{can_convert, create_convert_reader};
pub use convert::ConvertReader;
pub use error::{ConvertError, Result};
pub use types::TypeDescription;
