mod hits;
mod numeric_filter;
mod response;
mod search_params;
mod tags;
mod text;

pub use hits::*;
pub use numeric_filter::*;
pub use response::*;
pub use search_params::*;
pub use tags::*;
