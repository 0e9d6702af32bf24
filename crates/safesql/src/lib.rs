//! # safesql
//!
//! Injection-resistant SQL statement construction.
//!
//! Statements are written as templates in which every value enters through a
//! typed `%` code, never through string concatenation.
//!
//! ## Features
//!
//! - **Typed codes**: `%d`, `%s`, `%f`, `%T`, `%V`, `%U`, `%W` and friends check the
//!   argument they consume
//! - **Structural characters are refused**: `;`, quotes and backticks cannot be typed
//!   into a template, so a statement cannot be split or a literal closed early
//! - **Pluggable escaping**: string literals go through an [`Escaper`] bound by the
//!   connection that will run the SQL
//! - **Batches**: several statements render into one `;` separated text
//! - **Dynamic import**: JSON-like values convert into arguments with [`from_dynamic`]
//!
//! ## Example
//!
//! ```
//! use safesql::{BackslashEscaper, Renderer, Statement, Value, args};
//!
//! let stmt = Statement::with_args(
//!     "SELECT %LC FROM %T WHERE %C IN (%Ld) AND note%=s",
//!     args![
//!         Value::from_iter(["id", "name"]),
//!         "users",
//!         "id",
//!         Value::from_iter([1, 2, 3]),
//!         None::<String>,
//!     ],
//! );
//! let sql = Renderer::new(&BackslashEscaper).render(&stmt).unwrap();
//! assert_eq!(
//!     sql,
//!     "SELECT `id`, `name` FROM `users` WHERE `id` IN (1, 2, 3) AND note IS NULL"
//! );
//! ```

mod macros;

pub mod batch;
pub mod config;
pub mod dynamic;
pub mod error;
pub mod escape;
pub mod ident;
pub mod prelude;
pub mod render;
pub mod statement;
pub mod value;

pub use batch::{StatementBatch, render_statements};
pub use config::{QuoteStyle, RenderConfig};
pub use dynamic::{DynamicKind, DynamicValue, from_dynamic};
pub use error::{SqlError, SqlResult};
pub use escape::{BackslashEscaper, Escaper, QuoteDoublingEscaper};
pub use render::Renderer;
pub use statement::Statement;
pub use value::{PairList, Value};
