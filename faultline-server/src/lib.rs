pub mod crash;
pub mod dashboard;
pub mod http;
pub mod render;
