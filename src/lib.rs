//! Media intelligence dashboard.
//!
//! Cleans a CSV of social-media mentions, aggregates it by sentiment, day,
//! platform, media type and location, and derives Markdown insights from
//! each aggregate.
//!
//! ```no_run
//! use media_insights::{Session, Upload};
//!
//! let mut session = Session::new();
//! let upload = Upload::from_path("mentions.csv")?;
//! let dashboard = session.process(&upload)?;
//! for line in &dashboard.sentiment.insights {
//!     println!("- {line}");
//! }
//! # Ok::<(), media_insights::DashboardError>(())
//! ```

pub mod config;
pub mod error;
pub mod insights;
pub mod loader;
pub mod output;
pub mod reports;
pub mod session;
pub mod types;
pub mod util;

pub use error::{DashboardError, Result};
pub use session::{build_dashboard, Session, Upload};
pub use types::{Aggregate, AggregateEntry, CleanRecord, CleanedDataset, Dashboard, Dimension};
