pub mod accumulator;
pub mod background;
pub mod error;
pub mod export;

pub use accumulator::Accumulator;
pub use background::{
    spawn_background, spawn_status_forwarder, BackgroundConfig, BackgroundHandle,
};
pub use error::CollectorError;
pub use export::{build_export, export_file_name, write_export, CollectionStats, ExportDocument};
