//! `CsvTeleportSink` — records every teleport broadcast to `teleports.csv`.

use std::fs::File;
use std::path::Path;

use csv::Writer;
use sg_portal::{EffectError, EffectSink, TeleportEvent};
use tracing::debug;

use crate::row::TeleportRow;
use crate::{OutputError, OutputResult};

/// An [`EffectSink`] that appends one CSV row per teleport.
///
/// Visual and audio cues are accepted and ignored.  A failed write is
/// returned to the caller (which logs it) and the first one is also kept
/// for [`take_error`][Self::take_error].
pub struct CsvTeleportSink {
    writer:     Writer<File>,
    rows:       u64,
    finished:   bool,
    last_error: Option<OutputError>,
}

impl CsvTeleportSink {
    /// Create `teleports.csv` in `dir` and write the header row.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        let mut writer = Writer::from_path(dir.join("teleports.csv"))?;
        writer.write_record(["tick", "agent_id", "from_x", "from_z", "to_x", "to_z"])?;
        Ok(Self { writer, rows: 0, finished: false, last_error: None })
    }

    /// Rows written so far.
    pub fn rows(&self) -> u64 {
        self.rows
    }

    pub fn take_error(&mut self) -> Option<OutputError> {
        self.last_error.take()
    }

    /// Flush the file.  Idempotent.
    pub fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.writer.flush()?;
        Ok(())
    }

    fn write_row(&mut self, row: &TeleportRow) -> OutputResult<()> {
        self.writer.write_record(&[
            row.tick.to_string(),
            row.agent_id.to_string(),
            row.from_x.to_string(),
            row.from_z.to_string(),
            row.to_x.to_string(),
            row.to_z.to_string(),
        ])?;
        self.rows += 1;
        Ok(())
    }
}

impl EffectSink for CsvTeleportSink {
    fn teleported(&mut self, event: &TeleportEvent) -> Result<(), EffectError> {
        let row = TeleportRow {
            tick:     event.tick.0,
            agent_id: event.agent.0,
            from_x:   event.from.x,
            from_z:   event.from.z,
            to_x:     event.to.x,
            to_z:     event.to.z,
        };
        debug!(?row, "recording teleport");
        self.write_row(&row).map_err(|e| {
            let msg = e.to_string();
            if self.last_error.is_none() {
                self.last_error = Some(e);
            }
            EffectError(msg)
        })
    }
}
