pub mod geo;
pub mod logging;
