//! Unit tests for sg-core primitives.

#[cfg(test)]
mod ids {
    use crate::{AgentId, PortalId};

    #[test]
    fn index_roundtrip() {
        let id = AgentId(42);
        assert_eq!(id.index(), 42);
        assert_eq!(AgentId::try_from(42usize).unwrap(), id);
    }

    #[test]
    fn invalid_sentinels() {
        assert_eq!(PortalId::INVALID.0, u32::MAX);
        assert!(!PortalId::default().is_valid());
        assert!(PortalId(0).is_valid());
    }

    #[test]
    fn display() {
        assert_eq!(AgentId(7).to_string(), "AgentId(7)");
    }
}

#[cfg(test)]
mod cell {
    use crate::Cell;

    #[test]
    fn chebyshev_and_adjacency() {
        let a = Cell::flat(5, 5);
        assert_eq!(a.chebyshev(Cell::flat(8, 6)), 3);
        assert!(a.is_adjacent_8(Cell::flat(6, 6)));
        assert!(!a.is_adjacent_8(a));
        assert_eq!(a.adjacent_8().count(), 8);
        assert!(a.adjacent_8().all(|c| a.is_adjacent_8(c)));
    }

    #[test]
    fn distance_is_planar() {
        let a = Cell::new(0, 0, 0);
        let b = Cell::new(3, 7, 4);
        assert!((a.distance_to(b) - 5.0).abs() < 1e-6);
    }

    #[test]
    fn step_toward_moves_diagonally() {
        let a = Cell::flat(0, 0);
        assert_eq!(a.step_toward(Cell::flat(5, -2)), Cell::flat(1, -1));
        assert_eq!(a.step_toward(a), a);
    }

    #[test]
    fn display() {
        assert_eq!(Cell::new(1, 0, 2).to_string(), "(1, 0, 2)");
    }
}

#[cfg(test)]
mod target {
    use crate::{Cell, Target};

    #[test]
    fn none_is_invalid() {
        assert!(!Target::None.is_valid());
        assert_eq!(Target::None.cell(), None);
        assert!(!Target::Cell(Cell::INVALID).is_valid());
    }

    #[test]
    fn cell_target() {
        let t: Target = Cell::flat(25, 25).into();
        assert!(t.is_valid());
        assert_eq!(t.cell(), Some(Cell::flat(25, 25)));
    }
}

#[cfg(test)]
mod time {
    use crate::{Tick, TickClock};

    #[test]
    fn tick_arithmetic() {
        let t = Tick(10);
        assert_eq!(t + 5, Tick(15));
        assert_eq!(t.offset(3), Tick(13));
        assert_eq!(Tick(15) - Tick(10), 5u64);
        assert_eq!(Tick(3).signed_diff(Tick(5)), -2);
        assert_eq!(Tick(3).since(Tick(5)), 0);
    }

    #[test]
    fn ticks_for_secs_truncates() {
        let clock = TickClock::new(60);
        assert_eq!(clock.ticks_for_secs(5.0), 300);
        assert_eq!(clock.ticks_for_secs(1.01), 60);
        assert_eq!(clock.ticks_for_secs(-1.0), 0);
    }

    #[test]
    fn clock_advance() {
        let mut clock = TickClock::new(60);
        for _ in 0..90 {
            clock.advance();
        }
        assert_eq!(clock.current_tick, Tick(90));
        assert!((clock.elapsed_secs() - 1.5).abs() < 1e-6);
    }
}

#[cfg(test)]
mod rng {
    use crate::SimRng;

    #[test]
    fn same_seed_same_sequence() {
        let mut a = SimRng::new(7);
        let mut b = SimRng::new(7);
        let xs: Vec<u32> = (0..8).map(|_| a.gen_range(0..1000)).collect();
        let ys: Vec<u32> = (0..8).map(|_| b.gen_range(0..1000)).collect();
        assert_eq!(xs, ys);
    }

    #[test]
    fn choose_empty_is_none() {
        let mut r = SimRng::new(1);
        let empty: [u8; 0] = [];
        assert!(r.choose(&empty).is_none());
        assert_eq!(r.choose(&[9]), Some(&9));
    }
}

#[cfg(test)]
mod config {
    use std::io::Write;

    use crate::{CoreError, PortalConfig, SkipgateConfig, TickClock};

    #[test]
    fn defaults() {
        let cfg = PortalConfig::default();
        assert_eq!(cfg.min_path_cost_threshold, 300);
        assert_eq!(cfg.stun_ticks_after_teleport, 60);
        assert!(cfg.enable_visualization);
        assert!(!cfg.debug_mode);
        assert_eq!(cfg.duration_ticks(&TickClock::new(60)), 300);
        cfg.validate().unwrap();
    }

    #[test]
    fn partial_toml_fills_defaults() {
        let cfg = PortalConfig::from_toml_str("min_path_cost_threshold = 450\n").unwrap();
        assert_eq!(cfg.min_path_cost_threshold, 450);
        assert_eq!(cfg.portal_duration_secs, 5.0);
    }

    #[test]
    fn out_of_range_threshold_rejected() {
        let err = PortalConfig::from_toml_str("min_path_cost_threshold = 5\n").unwrap_err();
        assert!(matches!(err, CoreError::Config(_)));
    }

    #[test]
    fn out_of_range_duration_rejected() {
        let err = PortalConfig::from_toml_str("portal_duration_secs = 90.0\n").unwrap_err();
        assert!(matches!(err, CoreError::Config(_)));
    }

    #[test]
    fn search_radii_are_bounded() {
        for text in [
            "landing_search_radius = 0\n",
            "landing_search_radius = 33\n",
            "landing_search_radius = 4294967295\n",
            "exit_search_radius = 0\n",
            "exit_search_radius = 1000\n",
        ] {
            let err = PortalConfig::from_toml_str(text).unwrap_err();
            assert!(matches!(err, CoreError::Config(_)), "{text}");
        }
        let cfg = PortalConfig::from_toml_str("exit_search_radius = 32\nlanding_search_radius = 1\n").unwrap();
        assert_eq!((cfg.exit_search_radius, cfg.landing_search_radius), (32, 1));
    }

    #[test]
    fn malformed_toml_is_parse_error() {
        let err = PortalConfig::from_toml_str("min_path_cost_threshold = \"lots\"\n").unwrap_err();
        assert!(matches!(err, CoreError::Parse(_)));
    }

    #[test]
    fn toml_round_trip() {
        let mut cfg = PortalConfig::default();
        cfg.stun_ticks_after_teleport = 0;
        let text = cfg.to_toml_string().unwrap();
        assert_eq!(PortalConfig::from_toml_str(&text).unwrap(), cfg);
    }

    #[test]
    fn load_document_from_file() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        writeln!(file, "[sim]\nseed = 9\n\n[portal]\nportal_duration_secs = 2.5").unwrap();
        let cfg = SkipgateConfig::load(file.path()).unwrap();
        assert_eq!(cfg.sim.seed, 9);
        assert_eq!(cfg.sim.ticks_per_second, 60);
        assert_eq!(cfg.portal.portal_duration_secs, 2.5);
    }

    #[test]
    fn zero_tick_rate_rejected() {
        let err = SkipgateConfig::from_toml_str("[sim]\nticks_per_second = 0\n").unwrap_err();
        assert!(matches!(err, CoreError::Config(_)));
    }
}
