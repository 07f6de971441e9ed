pub mod filter;
pub mod schema;
pub mod value;

pub use filter::{
    apply_filter, CompileError, FilterApplication, FilterIterator, FilterOutcome, FilterResult,
    Filterable, Predicate,
};
pub use schema::{KeyAliases, MapSchema, Schema};
pub use value::{CastError, Value, ValueType};

pub use gridql;
