pub mod default_route;
pub mod run_route;
pub mod scan_route;
