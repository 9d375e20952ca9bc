pub mod configuration;
pub mod error;
pub mod lookup;
pub mod middleware;
pub mod routes;
pub mod schema;
pub mod startup;
pub mod telemetry;
pub mod util;
