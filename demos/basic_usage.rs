//! Basic logger usage example
//!
//! Demonstrates deriving loggers from one base and emitting JSON records to
//! stdout.
//!
//! Run with: cargo run --example basic_usage

use blog_logger::prelude::*;
use blog_logger::{fields, info, infof};

struct RequestId(String);

fn handle_request(base: &Logger, request_id: &str, user_id: u64) {
    let logger = base
        .with_context(RequestId(request_id.to_string()))
        .with_fields(fields! { "request_id" => request_id, "user_id" => user_id })
        .with_caller(0);

    infof!(logger, "user {} logged in", user_id);

    if let Some(RequestId(id)) = logger.context::<RequestId>() {
        logger.debugf(format_args!("context carried request {}", id));
    }
}

fn main() -> Result<()> {
    println!("=== Blog Logger - Basic Usage Example ===\n");

    let base = Logger::builder()
        .writer(LineWriter::new(std::io::stdout(), "[blog] ", LineFlags::standard()))
        .fields(fields! { "service" => "blog-service" })
        .build();

    println!("1. Logging at different levels:");
    base.debug("This is a debug message");
    base.info("This is an info message");
    base.warn("This is a warning message");
    base.error("This is an error message");
    base.fatal("This is a fatal message, the process keeps running");
    base.panic("This is a panic message, nothing unwinds");

    println!("\n2. Derived loggers per request:");
    handle_request(&base, "req-a", 42);
    handle_request(&base, "req-b", 7);

    println!("\n3. Reserved keys win over fields:");
    base.with_fields(fields! { "message" => "ignored" })
        .info("the literal message is kept");

    println!("\n4. Full call stack:");
    info!(base.with_callers_frames(), "stack captured in ", "main");

    base.flush()?;
    println!("\n=== Example completed successfully! ===");

    Ok(())
}
