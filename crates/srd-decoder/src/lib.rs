#![warn(clippy::pedantic)]

pub mod error;
pub mod decoder;
pub mod parser;
pub mod record;
pub mod shaper;

pub use decoder::RecordDecoder;
pub use error::ParserFault;
pub use parser::StreamParser;
pub use record::{Decoded, NotReady, Record};
pub use shaper::{ShapeLimits, shape};
