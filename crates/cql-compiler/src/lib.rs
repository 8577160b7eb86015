//! Compiles CQL2 filters into parameterized SQL `WHERE` fragments.
//!
//! Every literal in a filter becomes a bound parameter named `cql_xxxx`, and
//! every property must be on the caller's queryables allow-list before it is
//! written into the SQL as a quoted identifier.
//!
//! ```no_run
//! use cql_compiler::{DialectKind, Queryables, compile};
//!
//! let filter = compile(
//!     DialectKind::GeoPackage,
//!     "name LIKE 'Ams%' AND population > 100000",
//!     &Queryables::new(["name", "population"]),
//! )?;
//! println!("SELECT * FROM places WHERE {}", filter.sql);
//! # Ok::<(), cql_compiler::CqlError>(())
//! ```

pub mod compile;
pub mod dialect;
pub mod error;
pub mod listener;
pub mod policy;
pub mod queryables;
pub mod random;
pub mod stack;
pub mod state;
pub mod temporal;

pub use compile::{CompiledFilter, DialectKind, compile, compile_filter, compile_with_policy};
pub use dialect::{Dialect, GeoPackage, Postgres};
pub use error::{CqlError, CqlResult, UnknownDialect};
pub use listener::{GeoPackageListener, PostgresListener, SqlListener};
pub use policy::{LiteralBinding, LiteralPolicy};
pub use queryables::Queryables;
pub use random::{Randomizer, SequentialRandomizer, ThreadRandomizer};
pub use state::NamedParams;
