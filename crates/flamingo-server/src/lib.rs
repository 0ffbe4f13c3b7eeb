//! HTTP surface for Flamingo Forecast: the city form, the rendered forecast
//! fragment and a JSON forecast API.

pub mod error;
pub mod render;
pub mod routes;
pub mod state;

pub use error::ApiError;
pub use routes::router;
pub use state::AppState;
