//! Integration tests for the shutdown/startup cycle: engine time and
//! checkpoints written to the resumption line and read back.

use finalhour_core::{CheckpointStore, ClockEngine, ClockTime, Command, Config, ResumeLine};
use proptest::prelude::*;

#[test]
fn save_restart_and_restore() {
    let config = Config::default();
    let mut engine = ClockEngine::new(config.clock_settings());
    let mut store = CheckpointStore::new();

    engine.apply(Command::RUN);
    for _ in 0..(3 * 60 + 20) {
        engine.tick();
    }
    engine.apply(Command::PAUSE);
    store.create_at("Before noon", engine.time()).unwrap();
    engine.apply(Command::Forward);
    engine.apply(Command::Forward);

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(&config.system.continue_file);
    ResumeLine::new(&config.system.entrypoint, engine.time(), &store)
        .write_to(&path)
        .unwrap();

    let line = std::fs::read_to_string(&path).unwrap();
    assert_eq!(
        line,
        "finalhour --day 1 --hour 10 --minute 0 --saves=\"Before noon@1.08.20\"\n"
    );

    // Next start: the host parses the arguments back.
    let time = ResumeLine::parse_time(1, 10, 0).unwrap();
    let mut engine = ClockEngine::with_time(config.clock_settings(), time);
    let mut store = CheckpointStore::new();
    assert!(store.deserialize("Before noon@1.08.20").is_empty());

    let saved = store.get("Before noon").unwrap().time();
    engine.apply(Command::Restore { time: saved });
    assert_eq!(engine.time(), ClockTime::new(1, 8, 20).unwrap());
    assert!(!engine.is_running());
}

fn checkpoint_strategy() -> impl Strategy<Value = (String, (i64, i64, i64))> {
    ("[A-Za-z0-9 ]{1,16}", (1i64..=3, 0i64..24, 0i64..60))
}

proptest! {
    #[test]
    fn store_roundtrips_through_serialization(
        entries in proptest::collection::vec(checkpoint_strategy(), 0..12)
    ) {
        let mut store = CheckpointStore::new();
        for (name, (d, h, m)) in &entries {
            let _ = store.create(name, *d, *h, *m);
        }

        let mut restored = CheckpointStore::new();
        let failures = restored.deserialize(&store.serialize());

        prop_assert!(failures.is_empty());
        prop_assert_eq!(restored.list(), store.list());
        for name in store.list() {
            prop_assert_eq!(
                restored.get(&name).map(|c| c.time()),
                store.get(&name).map(|c| c.time())
            );
        }
    }
}
