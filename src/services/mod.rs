//! Service layer: parsing, aggregation, platform access and analysis

pub mod aggregator;
pub mod analysis;
pub mod data_loader;
pub mod graph_client;
pub mod insights;

pub use aggregator::Aggregator;
pub use analysis::AnalysisService;
pub use data_loader::{normalize_account_id, AccountSnapshot, DataLoader, LoadTracker};
pub use graph_client::{AdPlatform, GraphClient};
pub use insights::InsightParser;
