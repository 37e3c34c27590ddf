//! Client-side job-matching assistant: normalizes raw search payloads from
//! the analysis backend, filters them by user-selected facets, and talks to
//! the backend's search and CV-analysis endpoints.

pub mod cli;
pub mod client;
pub mod environment;
pub mod filter;
pub mod normalize;
pub mod session;
pub mod simulated;
pub mod types;

pub use client::ApiClient;
pub use environment::ClientSettings;
pub use filter::{FacetOptions, FilterState, FilterStats};
pub use normalize::{Normalizer, SkillSplit};
pub use session::SearchSession;
pub use types::job::{JobRecord, NormalizedResults, OverallSummary};
