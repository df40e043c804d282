pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod lambda_handler;
pub mod queue_worker;
