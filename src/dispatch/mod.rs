pub mod dispatcher;
pub mod route;
pub mod routes;
pub mod types;

pub use dispatcher::ActionDispatcher;
pub use route::{ActionRoute, DispatchError, PlannedRequest};
pub use routes::{BodyRoute, TableRoute};
pub use types::{ActionResult, ResponseFields};
