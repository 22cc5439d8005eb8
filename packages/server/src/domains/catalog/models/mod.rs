pub mod availability;
pub mod page;
pub mod product;
pub mod store_record;

pub use availability::*;
pub use page::*;
pub use product::*;
pub use store_record::*;
