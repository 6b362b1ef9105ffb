//! Integration tests for the snapshot logger
//!
//! These tests verify:
//! - Snapshot immutability across every `with_*` transformation
//! - Reserved-key precedence and field override order
//! - End-to-end emission to memory and file writers
//! - Independence of loggers derived from one base
//! - Call-site capture

use blog_logger::core::caller::{CallerFrame, FixedResolver, MAX_CALLER_DEPTH};
use blog_logger::core::fields::Fields;
use blog_logger::core::log_level::LogLevel;
use blog_logger::core::logger::Logger;
use blog_logger::writers::{FileWriter, LineFlags, LineWriter, LogWriter, MemoryWriter};
use blog_logger::{fields, infof};
use serde_json::Value;
use std::fs;
use std::sync::Arc;
use tempfile::TempDir;

fn decode(line: &str) -> Value {
    serde_json::from_str(line).expect("record is valid JSON")
}

/// Observable state of a snapshot
fn observe(logger: &Logger) -> (LogLevel, Option<Fields>, Vec<String>) {
    (
        logger.level(),
        logger.fields().cloned(),
        logger.callers().to_vec(),
    )
}

fn located_base() -> (Logger, MemoryWriter) {
    let sink = MemoryWriter::new();
    let logger = Logger::builder()
        .writer(sink.clone())
        .resolver(FixedResolver::new(vec![
            CallerFrame::new("internal/routers/api/v1/tag.rs", 31, "blog::routers::tag::list"),
            CallerFrame::new("internal/routers/mod.rs", 12, "blog::routers::dispatch"),
        ]))
        .level(LogLevel::Warn)
        .fields(fields! { "service" => "blog" })
        .caller_skip(0)
        .build();
    (logger, sink)
}

#[test]
fn test_transformations_do_not_mutate_receiver() {
    let (base, _) = located_base();
    let before = observe(&base);

    let _ = base.with_level(LogLevel::Panic);
    let _ = base.with_fields(fields! { "service" => "other", "extra" => 1 });
    let _ = base.with_context("request-9");
    let _ = base.with_caller(1);
    let _ = base.with_callers_frames();

    assert_eq!(observe(&base), before);
    assert!(!base.has_context());
}

#[test]
fn test_reserved_message_key_wins() {
    let sink = MemoryWriter::new();
    let logger = Logger::new(sink.clone()).with_fields(fields! { "message" => "x" });

    logger.info("hello");

    assert_eq!(decode(&sink.last().unwrap())["message"], "hello");
}

#[test]
fn test_later_fields_override_earlier() {
    let sink = MemoryWriter::new();
    let logger = Logger::new(sink.clone())
        .with_fields(fields! { "a" => 1 })
        .with_fields(fields! { "a" => 2 });

    logger.info("override");

    assert_eq!(decode(&sink.last().unwrap())["a"], 2);
}

#[test]
fn test_end_to_end_infof() {
    let sink = MemoryWriter::new();
    let logger = Logger::new(sink.clone());

    infof!(logger, "user {} logged in", 42);

    let lines = sink.lines();
    assert_eq!(lines.len(), 1);
    let record = decode(&lines[0]);
    assert_eq!(record["level"], "info");
    assert_eq!(record["message"], "user 42 logged in");
    assert!(record["time"].as_i64().unwrap() > 0);
    assert!(record["callers"].is_array());
}

#[test]
fn test_derived_loggers_are_independent() {
    let sink = MemoryWriter::new();
    let base = Logger::new(sink.clone());

    let l1 = base.with_fields(fields! { "req" => "a" });
    let l2 = base.with_fields(fields! { "req" => "b" });

    l1.info("first");
    l2.info("second");
    base.info("base");

    let lines = sink.lines();
    assert_eq!(lines.len(), 3);
    assert_eq!(decode(&lines[0])["req"], "a");
    assert_eq!(decode(&lines[1])["req"], "b");
    assert!(decode(&lines[2]).get("req").is_none());
}

#[test]
fn test_fields_shared_until_divergence() {
    let sink = MemoryWriter::new();
    let base = Logger::new(sink).with_fields(fields! { "service" => "blog" });

    let leveled = base.with_level(LogLevel::Error);
    let extended = leveled.with_fields(fields! { "article_id" => 5 });

    assert_eq!(base.fields().unwrap().len(), 1);
    assert_eq!(leveled.fields().unwrap().len(), 1);
    assert_eq!(extended.fields().unwrap().len(), 2);
}

#[test]
fn test_callers_in_record() {
    let (base, sink) = located_base();

    base.output("located");
    base.with_callers_frames().output("stack");

    let lines = sink.lines();
    let located = decode(&lines[0]);
    assert_eq!(located["level"], "warn");
    assert_eq!(
        located["callers"],
        serde_json::json!(["internal/routers/api/v1/tag.rs: 31 blog::routers::tag::list"])
    );
    assert_eq!(located["service"], "blog");

    let stack = decode(&lines[1]);
    assert_eq!(stack["callers"].as_array().unwrap().len(), 2);
}

#[cfg(all(feature = "backtrace", debug_assertions))]
#[test]
fn test_live_caller_capture_matches_pattern() {
    fn handler(logger: &Logger) -> Logger {
        logger.with_caller(1)
    }

    let logger = handler(&Logger::new(MemoryWriter::new()));

    assert_eq!(logger.callers().len(), 1);
    let entry = &logger.callers()[0];
    let (location, function) = entry.rsplit_once(' ').expect("entry has a function part");
    let (file, line) = location.rsplit_once(": ").expect("entry has file and line");

    assert!(file.ends_with("integration_tests.rs"), "file was {}", file);
    assert!(line.parse::<u32>().unwrap() > 0);
    assert!(
        function.contains("test_live_caller_capture_matches_pattern"),
        "function was {}",
        function
    );
}

#[cfg(all(feature = "backtrace", debug_assertions))]
#[test]
fn test_live_stack_never_exceeds_cap() {
    fn recurse(logger: &Logger, depth: usize) -> Logger {
        if depth == 0 {
            logger.with_callers_frames()
        } else {
            let captured = recurse(logger, depth - 1);
            std::hint::black_box(captured)
        }
    }

    let logger = recurse(&Logger::new(MemoryWriter::new()), 60);
    assert!(!logger.callers().is_empty());
    assert!(logger.callers().len() <= MAX_CALLER_DEPTH);
}

#[test]
fn test_file_writer_end_to_end() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let log_file = temp_dir.path().join("blog_service.log");

    let writer: Arc<dyn LogWriter> = Arc::new(
        FileWriter::open(&log_file, "", LineFlags::none()).expect("Failed to open log file"),
    );
    let logger = Logger::from_shared(writer);

    for i in 0..5 {
        logger
            .with_fields(fields! { "iteration" => i })
            .debugf(format_args!("Iteration {}", i));
    }
    logger.flush().expect("Failed to flush");

    let content = fs::read_to_string(&log_file).expect("Failed to read log file");
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(lines.len(), 5);

    for (i, line) in lines.iter().enumerate() {
        let record = decode(line);
        assert_eq!(record["level"], "debug");
        assert_eq!(record["message"], format!("Iteration {}", i));
        assert_eq!(record["iteration"], i);
    }
}

#[test]
fn test_message_newlines_stay_on_one_line() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let log_file = temp_dir.path().join("injection_test.log");

    let logger = Logger::new(FileWriter::open(&log_file, "", LineFlags::none()).unwrap());
    logger.info("User login\nerror [2024-10-17] Fake error injected\ninfo Continuation");
    logger.flush().unwrap();

    let content = fs::read_to_string(&log_file).unwrap();
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(lines.len(), 1, "Log should be a single line, not multiple");
    assert_eq!(
        decode(lines[0])["message"],
        "User login\nerror [2024-10-17] Fake error injected\ninfo Continuation"
    );
}

#[test]
fn test_line_writer_prefix_framing() {
    let writer = Arc::new(LineWriter::new(Vec::new(), "blog ", LineFlags::none()));
    let logger = Logger::from_shared(writer.clone());

    logger.error("boom");
    drop(logger);

    let writer = Arc::try_unwrap(writer).ok().expect("logger dropped its handle");
    let out = String::from_utf8(writer.into_inner()).unwrap();
    assert!(out.starts_with("blog {"));
    assert!(out.ends_with("}\n"));
}

#[test]
fn test_line_writer_reports_logging_call_site() {
    let writer = Arc::new(LineWriter::new(
        Vec::new(),
        "",
        LineFlags::none().with_short_file(),
    ));
    let logger = Logger::from_shared(writer.clone());

    logger.info("from method");
    let method_line = line!() - 1;
    infof!(logger, "from macro {}", 1);
    let macro_line = line!() - 1;
    drop(logger);

    let writer = Arc::try_unwrap(writer).ok().expect("logger dropped its handle");
    let out = String::from_utf8(writer.into_inner()).unwrap();
    let lines: Vec<&str> = out.lines().collect();

    assert_eq!(lines.len(), 2);
    assert!(
        lines[0].starts_with(&format!("integration_tests.rs:{}: {{", method_line)),
        "line was {}",
        lines[0]
    );
    assert!(
        lines[1].starts_with(&format!("integration_tests.rs:{}: {{", macro_line)),
        "line was {}",
        lines[1]
    );
}

#[cfg(feature = "backtrace")]
#[test]
fn test_live_caller_entries_are_well_formed() {
    fn assert_entry(entry: &str) {
        let (file, rest) = entry.split_once(": ").expect("entry has a file part");
        let (line, function) = rest.split_once(' ').expect("entry has a function part");

        assert!(!file.is_empty(), "entry was {}", entry);
        assert!(line.parse::<u32>().unwrap() > 0, "entry was {}", entry);
        assert!(!function.is_empty(), "entry was {}", entry);
    }

    let root = Logger::new(MemoryWriter::new());
    let single = root.with_caller(0);
    let stack = root.with_callers_frames();

    // without debug info nothing may resolve, but whatever does is complete
    assert!(single.callers().len() <= 1);
    for entry in single.callers().iter().chain(stack.callers()) {
        assert_entry(entry);
    }
}
