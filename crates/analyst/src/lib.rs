//! `salesdesk-analyst`: statistics and ranking over a loaded sales dataset.
//!
//! Two layers:
//! - [`statistics`]: pure reductions (mean, population standard deviation) and
//!   the rounding rules applied to every published figure.
//! - [`SalesAnalyst`]: one method per analytical question, joining records
//!   through an [`EntityStore`](salesdesk_store::EntityStore) it is handed at
//!   construction.
//!
//! Every query is a deterministic read that neither logs nor mutates.

pub mod analyst;
pub mod config;
pub mod error;
pub mod statistics;

pub use analyst::{weekday_name, SalesAnalyst};
pub use config::{AnalystConfig, DEFAULT_TOP_EARNERS};
pub use error::{AnalystError, AnalystResult};
pub use statistics::StatisticsError;
