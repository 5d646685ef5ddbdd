pub mod cache;
pub mod config;
pub mod logging;
pub mod metrics;
pub mod reader;
pub mod report;
pub mod routes;

pub use cache::{Cache, CacheStats};
pub use config::AppConfig;
pub use metrics::{Metrics, MetricsSnapshot, TimedOperation};
pub use reader::FileReader;
pub use report::{AnalysisReport, EXAMPLE_TEXT};
pub use routes::{AppState, router};
