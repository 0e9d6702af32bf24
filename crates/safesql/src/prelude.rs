//! Convenient imports for typical `safesql` usage.
//!
//! ```
//! use safesql::prelude::*;
//!
//! let sql = Statement::with_args("SELECT %d", args![1]).render_insecure().unwrap();
//! assert_eq!(sql, "SELECT 1");
//! ```

pub use crate::{
    Escaper, PairList, RenderConfig, Renderer, SqlError, SqlResult, Statement, StatementBatch,
    Value, args, pairs,
};
