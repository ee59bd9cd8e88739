pub mod config;
pub mod error;
pub mod io;
pub mod math;
pub mod model;

pub use error::RankError;
pub use math::proximity::{locate, nearest_series, nearest_time_index, ProximityHit};
pub use model::aggregate::{rank_entities, select_top_k, EntityAggregate};
pub use model::record::{Record, RecordStore, Year};
pub use model::series::{build_series, RankedAverage, SelectionResult, Series, TimeAxis};
