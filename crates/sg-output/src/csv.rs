//! CSV output backend.
//!
//! Creates three files in the configured output directory:
//! - `interceptions.csv`
//! - `portal_events.csv`
//! - `tick_summaries.csv`

use std::fs::File;
use std::path::Path;

use csv::Writer;

use crate::writer::OutputWriter;
use crate::{InterceptionRow, OutputResult, PortalEventRow, TickSummaryRow};

/// Writes interceptor decisions, portal outcomes, and tick summaries to CSV.
pub struct CsvWriter {
    interceptions: Writer<File>,
    events:        Writer<File>,
    summaries:     Writer<File>,
    finished:      bool,
}

impl CsvWriter {
    /// Open (or create) the three CSV files in `dir` and write the header rows.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        let mut interceptions = Writer::from_path(dir.join("interceptions.csv"))?;
        interceptions.write_record(["tick", "agent_id", "dest_x", "dest_z", "handled", "cost", "reason"])?;

        let mut events = Writer::from_path(dir.join("portal_events.csv"))?;
        events.write_record(["tick", "portal_id", "kind", "agent_id"])?;

        let mut summaries = Writer::from_path(dir.join("tick_summaries.csv"))?;
        summaries.write_record(["tick", "live_portals", "stunned_agents"])?;

        Ok(Self { interceptions, events, summaries, finished: false })
    }
}

fn opt<T: ToString>(v: Option<T>) -> String {
    v.map(|x| x.to_string()).unwrap_or_default()
}

impl OutputWriter for CsvWriter {
    fn write_interception(&mut self, row: &InterceptionRow) -> OutputResult<()> {
        self.interceptions.write_record(&[
            row.tick.to_string(),
            row.agent_id.to_string(),
            row.dest_x.to_string(),
            row.dest_z.to_string(),
            (row.handled as u8).to_string(),
            opt(row.cost),
            row.reason.clone(),
        ])?;
        Ok(())
    }

    fn write_portal_event(&mut self, row: &PortalEventRow) -> OutputResult<()> {
        self.events.write_record(&[
            row.tick.to_string(),
            opt(row.portal_id),
            row.kind.to_owned(),
            opt(row.agent_id),
        ])?;
        Ok(())
    }

    fn write_tick_summary(&mut self, row: &TickSummaryRow) -> OutputResult<()> {
        self.summaries.write_record(&[
            row.tick.to_string(),
            row.live_portals.to_string(),
            row.stunned_agents.to_string(),
        ])?;
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.interceptions.flush()?;
        self.events.flush()?;
        self.summaries.flush()?;
        Ok(())
    }
}
