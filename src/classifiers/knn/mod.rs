mod distance;
mod k_nearest_neighbors;
mod neighborhood;

pub use distance::{DistanceError, weighted_squared_distance};
pub use k_nearest_neighbors::{Classification, KNearestNeighbors, WeightCheck};
pub use neighborhood::{Neighbor, Neighborhood};
