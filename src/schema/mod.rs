pub mod datasets;
pub mod records;
pub mod types;

pub use datasets::*;
pub use records::*;
pub use types::*;
