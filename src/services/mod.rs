pub mod analysis_service;
pub mod analytics;
pub mod clock;
pub mod feed;
pub mod history_store;

pub use analysis_service::AnalysisService;
pub use clock::{Clock, FixedClock, SystemClock};
pub use feed::{Quote, SimulatedFeed};
pub use history_store::HistoryStore;
