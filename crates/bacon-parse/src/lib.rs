//! bacon-parse: Ingestion of the movies dataset.
//!
//! The dataset's `credits.csv` stores each movie's cast as a Python literal.
//! [`literal`] reads those literals into JSON values without evaluating
//! anything, and [`credits`] turns the CSV into the actors file the graph is
//! built from.

pub mod credits;
pub mod error;
pub mod literal;

pub use credits::{convert, convert_file, parse_cast, CastMember, ParseStats};
pub use error::{LiteralError, ParseError};
pub use literal::parse_literal;
