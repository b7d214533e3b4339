pub mod job_db;
pub mod metrics_db;
pub mod org_db;
pub mod page_db;
pub mod query_db;
pub mod run_db;
