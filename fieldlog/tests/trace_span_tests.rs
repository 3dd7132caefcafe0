use fieldlog::levels::Level;
use fieldlog::test_utils::init_in_memory_log;
use fieldlog::{DURATION_KEY, FieldValue, PreparedLogger, field};
use serial_test::serial;
use std::time::Duration;

fn duration_of(entry: &fieldlog::LogEntry) -> Duration {
    let last = entry.fields.last().expect("span entry carries fields");
    assert_eq!(last.key, DURATION_KEY);
    match last.value {
        FieldValue::Duration(d) => d,
        ref other => panic!("expected a duration, got {other:?}"),
    }
}

#[test]
#[serial]
fn closing_a_span_records_elapsed_time() {
    let guard = init_in_memory_log();

    let mut pl = PreparedLogger::new();
    pl.with_fields([field("req", "r1")]);

    let span = pl.trace("fetching profile");
    std::thread::sleep(Duration::from_millis(10));
    span.end();

    let entries = guard.sink.entries();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].level, Level::Trace);
    assert_eq!(entries[0].message, "fetching profile");
    assert_eq!(entries[0].fields[0], field("req", "r1"));
    assert!(duration_of(&entries[0]) >= Duration::from_millis(10));
}

#[test]
#[serial]
fn immediate_close_yields_a_non_negative_duration() {
    let guard = init_in_memory_log();

    let pl = PreparedLogger::new();
    pl.trace("noop").end();

    let entries = guard.sink.entries();
    assert_eq!(entries.len(), 1);
    // Duration is unsigned; the point is that a clock hiccup clamps to zero
    // instead of failing the close.
    let _ = duration_of(&entries[0]);
}

#[test]
#[serial]
fn dropping_an_open_span_closes_it() {
    let guard = init_in_memory_log();

    let pl = PreparedLogger::new();
    {
        let _span = pl.trace("scoped work");
        // early return path: the bracket still closes
    }

    let entries = guard.sink.entries();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].message, "scoped work");
    let _ = duration_of(&entries[0]);
}

#[test]
#[serial]
fn tracef_formats_into_the_span_message() {
    let guard = init_in_memory_log();

    let pl = PreparedLogger::new();
    pl.tracef(format_args!("flushing {} blocks", 42)).end();

    let entries = guard.sink.entries();
    assert_eq!(entries[0].message, "flushing 42 blocks");
    assert_eq!(entries[0].caller_skip, fieldlog::CALLER_SKIP + 1);
}

#[test]
#[serial]
fn span_carries_the_fields_present_at_acquisition() {
    let guard = init_in_memory_log();

    let mut pl = PreparedLogger::new();
    pl.with_fields([field("req", "r1"), field("shard", 4)]);

    pl.trace("replicating").end();
    pl.with_fields([field("late", true)]);
    pl.trace("compacting").end();

    let entries = guard.sink.entries();
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0].fields.len(), 3); // req, shard, duration
    assert_eq!(entries[1].fields.len(), 4); // req, shard, late, duration
    assert_eq!(entries[0].fields[..2], [field("req", "r1"), field("shard", 4)]);
}

#[test]
#[serial]
fn sequential_spans_reuse_pooled_records() {
    let guard = init_in_memory_log();

    let pl = PreparedLogger::new();
    for i in 0..8 {
        pl.tracef(format_args!("round {i}")).end();
    }

    let entries = guard.sink.entries();
    assert_eq!(entries.len(), 8);
    for (i, entry) in entries.iter().enumerate() {
        // a recycled record must not leak the previous round's state
        assert_eq!(entry.message, format!("round {i}"));
        assert_eq!(entry.fields.len(), 1);
        assert_eq!(entry.fields[0].key, DURATION_KEY);
    }
}

#[test]
#[serial]
fn concurrent_spans_on_cloned_handles() {
    let guard = init_in_memory_log();

    let base = fieldlog::with_fields([field("svc", "api")]);
    let mut workers = Vec::new();
    for i in 0..4u32 {
        let mut pl = base.clone();
        workers.push(std::thread::spawn(move || {
            pl.with_fields([field("worker", i)]);
            pl.tracef(format_args!("worker {i}")).end();
        }));
    }
    for worker in workers {
        worker.join().unwrap();
    }

    let entries = guard.sink.entries();
    assert_eq!(entries.len(), 4);
    for entry in &entries {
        assert_eq!(entry.level, Level::Trace);
        assert_eq!(entry.fields.len(), 3); // svc, worker, duration
    }
}
