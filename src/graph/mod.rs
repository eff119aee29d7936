pub mod flow;
pub mod page;

pub use flow::*;
pub use page::*;
