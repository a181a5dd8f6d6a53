//! Core of the quake lookup service: field descriptors, the cell decoder,
//! the record assembler and the row-store boundary.

pub mod decode;
pub mod error;
pub mod field;
pub mod lookup;
pub mod query;
pub mod record;
pub mod row;
pub mod storage;

pub use error::{ErrorKind, StoreError};
pub use field::{FIELDS, FieldDescriptor, FieldKind, ScalarValue};
pub use lookup::lookup;
pub use query::LookupQuery;
pub use record::{LookupOutcome, QuakeRecord, assemble};
pub use row::{Column, RowCells};
pub use storage::{RowStore, StoreFactory, StoreFuture};
