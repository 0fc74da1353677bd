pub mod crop;
pub mod disease;
pub mod environmental;
pub mod estimation;
pub mod fertilizer_plan;
pub mod shop;
pub mod weather;
pub mod yield_estimate;

pub use crop::*;
pub use disease::*;
pub use environmental::*;
pub use estimation::*;
pub use fertilizer_plan::*;
pub use shop::*;
pub use weather::*;
pub use yield_estimate::*;
