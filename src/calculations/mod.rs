pub mod backward_placement;
pub mod forward_repair;

pub use backward_placement::{BackwardPlacement, MAX_SEARCH_STEPS};
pub use forward_repair::ForwardRepair;
