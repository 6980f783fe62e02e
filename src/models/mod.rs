pub mod detail;
pub mod margin;
pub mod product;
pub mod record;
pub mod window;

pub use detail::*;
pub use margin::*;
pub use product::*;
pub use record::*;
pub use window::*;
