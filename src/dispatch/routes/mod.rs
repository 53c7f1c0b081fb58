pub mod body;
pub mod table;

pub use body::BodyRoute;
pub use table::TableRoute;
