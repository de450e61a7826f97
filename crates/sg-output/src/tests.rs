//! Integration tests for sg-output.

#[cfg(test)]
mod csv_tests {
    use tempfile::TempDir;

    use crate::csv::CsvWriter;
    use crate::row::{InterceptionRow, PortalEventRow, TickSummaryRow};
    use crate::writer::OutputWriter;

    fn tmp() -> TempDir {
        tempfile::tempdir().expect("create temp dir")
    }

    fn headers(path: std::path::PathBuf) -> Vec<String> {
        let mut rdr = csv::Reader::from_path(path).unwrap();
        rdr.headers().unwrap().iter().map(str::to_owned).collect()
    }

    #[test]
    fn csv_headers_correct() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.finish().unwrap();

        assert_eq!(
            headers(dir.path().join("interceptions.csv")),
            ["tick", "agent_id", "dest_x", "dest_z", "handled", "cost", "reason"]
        );
        assert_eq!(headers(dir.path().join("portal_events.csv")), ["tick", "portal_id", "kind", "agent_id"]);
        assert_eq!(headers(dir.path().join("tick_summaries.csv")), ["tick", "live_portals", "stunned_agents"]);
    }

    #[test]
    fn optional_columns_left_blank() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.write_interception(&InterceptionRow {
            tick:     3,
            agent_id: 0,
            dest_x:   40,
            dest_z:   2,
            handled:  false,
            cost:     None,
            reason:   "no_device".into(),
        })
        .unwrap();
        w.write_portal_event(&PortalEventRow { tick: 4, portal_id: None, kind: "teleported", agent_id: Some(0) })
            .unwrap();
        w.write_tick_summary(&TickSummaryRow { tick: 4, live_portals: 0, stunned_agents: 1 }).unwrap();
        w.finish().unwrap();
        w.finish().unwrap();

        let mut rdr = csv::Reader::from_path(dir.path().join("interceptions.csv")).unwrap();
        let rec = rdr.records().next().unwrap().unwrap();
        assert_eq!(rec.iter().collect::<Vec<_>>(), ["3", "0", "40", "2", "0", "", "no_device"]);

        let mut rdr = csv::Reader::from_path(dir.path().join("portal_events.csv")).unwrap();
        let rec = rdr.records().next().unwrap().unwrap();
        assert_eq!(rec.iter().collect::<Vec<_>>(), ["4", "", "teleported", "0"]);
    }
}

#[cfg(test)]
mod sink_tests {
    use sg_core::{AgentId, Cell, Tick};
    use sg_portal::{EffectSink, TeleportEvent};

    use crate::CsvTeleportSink;

    #[test]
    fn one_row_per_teleport() {
        let dir = tempfile::tempdir().unwrap();
        let mut sink = CsvTeleportSink::new(dir.path()).unwrap();
        let ev = TeleportEvent { tick: Tick(7), agent: AgentId(2), from: Cell::flat(5, 5), to: Cell::flat(20, 19) };
        sink.teleported(&ev).unwrap();
        sink.teleported(&TeleportEvent { tick: Tick(9), ..ev }).unwrap();
        sink.finish().unwrap();
        assert_eq!(sink.rows(), 2);
        assert!(sink.take_error().is_none());

        let mut rdr = csv::Reader::from_path(dir.path().join("teleports.csv")).unwrap();
        let rows: Vec<Vec<String>> = rdr
            .records()
            .map(|r| r.unwrap().iter().map(str::to_owned).collect())
            .collect();
        assert_eq!(rows, [["7", "2", "5", "5", "20", "19"], ["9", "2", "5", "5", "20", "19"]]);
    }
}

#[cfg(test)]
mod observer_tests {
    use sg_agent::AgentBuilder;
    use sg_core::{AgentId, Cell, SkipgateConfig};
    use sg_sim::SimBuilder;
    use sg_world::{ChebyshevOracle, GridMap};

    use crate::{CsvTeleportSink, CsvWriter, SimOutputObserver};

    #[test]
    fn full_run_writes_every_log() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = SkipgateConfig::default();
        config.sim.total_ticks = 5;

        let mut sim = SimBuilder::new(
            config,
            GridMap::new(64, 64).unwrap(),
            ChebyshevOracle::default(),
            CsvTeleportSink::new(dir.path()).unwrap(),
        )
        .agent(AgentBuilder::colonist("Ada", Cell::flat(2, 2)).wearing("PortalGun_Device").build())
        .build()
        .unwrap();
        sim.order_goto(AgentId(0), Cell::flat(50, 2)).unwrap();

        let mut obs = SimOutputObserver::new(CsvWriter::new(dir.path()).unwrap());
        sim.run(&mut obs).unwrap();
        sim.effects.finish().unwrap();
        assert!(obs.take_error().is_none());
        assert_eq!(sim.effects.rows(), 1);

        let mut rdr = csv::Reader::from_path(dir.path().join("interceptions.csv")).unwrap();
        let reasons: Vec<String> = rdr.records().map(|r| r.unwrap()[6].to_owned()).collect();
        assert_eq!(reasons, ["handled", "within_threshold"]);

        let mut rdr = csv::Reader::from_path(dir.path().join("portal_events.csv")).unwrap();
        let kinds: Vec<String> = rdr.records().map(|r| r.unwrap()[2].to_owned()).collect();
        assert_eq!(kinds, ["teleported"]);

        let rdr = csv::Reader::from_path(dir.path().join("tick_summaries.csv")).unwrap();
        assert_eq!(rdr.into_records().count(), 5);
    }
}
