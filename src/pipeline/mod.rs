//! Pipeline components: cancellation, dictionary source, probe workers, collector.

pub mod cancel;
pub mod collector;
pub mod context;
pub mod dictionary;
pub mod orchestrator;
pub mod workers;

pub use cancel::CancelToken;
pub use collector::{Collector, Sinks, collect_results};
pub use context::{PipelineChannels, PipelineHandles, create_pipeline_channels};
pub use dictionary::{DictionarySource, run_dictionary_loop, spawn_dictionary_thread};
pub use orchestrator::{ScanReport, run_scan, shutdown_pipeline_handles, start_pipeline};
pub use workers::spawn_probe_workers;
