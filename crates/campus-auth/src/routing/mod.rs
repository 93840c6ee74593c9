//! Navigation: the role-to-area fallback table, the route table and the
//! cancellable router that runs guards before committing a path.

pub mod fallback;
pub mod history;
pub mod router;
pub mod routes;

pub use fallback::{FallbackRouter, area_for};
pub use history::NavigationHistory;
pub use router::{NavigationOutcome, Router};
pub use routes::{RouteMatch, RouteTable};
