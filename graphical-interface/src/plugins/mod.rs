mod destinations;
mod flights;

pub use destinations::Destinations;
pub use flights::Flights;
