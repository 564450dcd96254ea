//! PLY reading and writing shared by the particle engine's asset loader and
//! the offline converter, so both accept exactly the same files.

mod error;
mod reader;
mod writer;

pub use error::PlyError;
pub use reader::{PlyPoints, parse_ply};
pub use writer::encode_ply;
