mod alert;
mod compliance;
mod snapshot;

pub use alert::*;
pub use compliance::*;
pub use snapshot::*;
