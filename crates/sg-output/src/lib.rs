//! `sg-output` — CSV logs for the skipgate portal framework.
//!
//! | Type                  | Hooks into          | Files created                                          |
//! |-----------------------|---------------------|--------------------------------------------------------|
//! | [`CsvTeleportSink`]   | `sg_portal::EffectSink` | `teleports.csv`                                    |
//! | [`SimOutputObserver`] | `sg_sim::SimObserver`   | `interceptions.csv`, `portal_events.csv`, `tick_summaries.csv` (via [`CsvWriter`]) |
//!
//! Both store the first write error instead of failing the sim; check with
//! `take_error` after the run.
//!
//! # Usage
//!
//! ```rust,ignore
//! use sg_output::{CsvTeleportSink, CsvWriter, SimOutputObserver};
//!
//! let sink = CsvTeleportSink::new(Path::new("./output"))?;
//! let mut sim = SimBuilder::new(config, map, oracle, sink).build()?;
//! let mut obs = SimOutputObserver::new(CsvWriter::new(Path::new("./output"))?);
//! sim.run(&mut obs)?;
//! obs.take_error().map(|e| eprintln!("output error: {e}"));
//! ```

pub mod csv;
pub mod error;
pub mod observer;
pub mod row;
pub mod sink;
pub mod writer;

#[cfg(test)]
mod tests;

pub use csv::CsvWriter;
pub use error::{OutputError, OutputResult};
pub use observer::SimOutputObserver;
pub use row::{InterceptionRow, PortalEventRow, TeleportRow, TickSummaryRow};
pub use sink::CsvTeleportSink;
pub use writer::OutputWriter;
