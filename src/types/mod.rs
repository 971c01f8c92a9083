pub mod analysis;
pub mod instrument;
pub mod price;

pub use analysis::*;
pub use instrument::*;
pub use price::*;
