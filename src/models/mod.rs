pub mod api;
pub mod attribute;
pub mod car;

pub use api::{ApiRequest, ApiResponse, ResponseBuilder};
pub use attribute::{normalize_item, AttributeError, AttributeValue, Item};
pub use car::{CarFields, CarRecord};
