//! Call-site resolution
//!
//! The logger records where it was called from as `"<file>: <line> <function>"`
//! strings. How those frames are obtained is behind [`StackResolver`] so that
//! tests can substitute a fixed stack.

use std::fmt;
use std::sync::Arc;

/// Upper bound on frames captured by a full-stack walk
pub const MAX_CALLER_DEPTH: usize = 25;

/// One resolved stack frame
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallerFrame {
    pub file: String,
    pub line: u32,
    pub function: String,
}

impl CallerFrame {
    pub fn new(file: impl Into<String>, line: u32, function: impl Into<String>) -> Self {
        Self {
            file: file.into(),
            line,
            function: function.into(),
        }
    }
}

impl fmt::Display for CallerFrame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {} {}", self.file, self.line, self.function)
    }
}

/// Source of call-stack frames
///
/// Depths are counted from the code that called into the logger: depth 0 is
/// the function that invoked `Logger::with_caller` (or `with_callers_frames`),
/// depth 1 its caller, and so on.
pub trait StackResolver: Send + Sync {
    /// Resolve the single frame `skip` levels above the logger call
    fn resolve_one(&self, skip: usize) -> Option<CallerFrame>;

    /// Resolve up to `max_depth` frames, innermost first
    fn resolve_many(&self, max_depth: usize) -> Vec<CallerFrame>;
}

/// Resolver walking the live call stack
#[cfg(feature = "backtrace")]
#[derive(Debug, Clone, Copy, Default)]
pub struct BacktraceResolver;

/// Logger entry points sitting between the caller and the stack walk
#[cfg(feature = "backtrace")]
const ENTRY_POINTS: &[&str] = &[
    "blog_logger::core::caller::BacktraceResolver",
    "blog_logger::core::logger::Logger::with_caller",
    "blog_logger::core::logger::LoggerBuilder::build",
    "blog_logger::core::config::LoggerConfig::build_logger",
];

#[cfg(feature = "backtrace")]
fn is_entry_point(function: &str) -> bool {
    ENTRY_POINTS.iter().any(|marker| function.contains(marker))
}

/// Frame for a symbol, or `None` when the symbol carries no source location
///
/// Builds without debug info resolve names but not files or lines.
#[cfg(feature = "backtrace")]
fn located_frame(
    file: Option<&std::path::Path>,
    line: Option<u32>,
    function: String,
) -> Option<CallerFrame> {
    let file = file?.display().to_string();
    let line = line.filter(|&n| n > 0)?;
    if file.is_empty() {
        return None;
    }
    Some(CallerFrame {
        file,
        line,
        function,
    })
}

/// Walk the stack and look at `limit` frame positions, starting `skip`
/// frames past the outermost logger entry point.
///
/// Everything inside the walk (unwinder, closure shims, this function) is
/// skipped until the first entry point shows up. A position whose symbol has
/// no source location still counts but yields no frame.
#[cfg(feature = "backtrace")]
#[inline(never)]
fn collect_frames(skip: usize, limit: usize) -> Vec<CallerFrame> {
    let mut frames = Vec::new();
    if limit == 0 {
        return frames;
    }

    let mut entered = false;
    let mut in_prologue = true;
    let mut to_skip = skip;
    let mut remaining = limit;

    backtrace::trace(|frame| {
        backtrace::resolve_frame(frame, |symbol| {
            if remaining == 0 {
                return;
            }
            let Some(name) = symbol.name() else {
                return;
            };
            let function = format!("{:#}", name);

            if in_prologue {
                if is_entry_point(&function) {
                    entered = true;
                    return;
                }
                if !entered {
                    return;
                }
                in_prologue = false;
            }
            if to_skip > 0 {
                to_skip -= 1;
                return;
            }

            remaining -= 1;
            if let Some(located) = located_frame(symbol.filename(), symbol.lineno(), function) {
                frames.push(located);
            }
        });
        remaining > 0
    });

    frames
}

#[cfg(feature = "backtrace")]
impl StackResolver for BacktraceResolver {
    fn resolve_one(&self, skip: usize) -> Option<CallerFrame> {
        collect_frames(skip, 1).pop()
    }

    fn resolve_many(&self, max_depth: usize) -> Vec<CallerFrame> {
        collect_frames(0, max_depth.min(MAX_CALLER_DEPTH))
    }
}

/// Resolver returning a preset stack, innermost frame first
#[derive(Debug, Clone, Default)]
pub struct FixedResolver {
    frames: Vec<CallerFrame>,
}

impl FixedResolver {
    pub fn new(frames: Vec<CallerFrame>) -> Self {
        Self { frames }
    }
}

impl StackResolver for FixedResolver {
    fn resolve_one(&self, skip: usize) -> Option<CallerFrame> {
        self.frames.get(skip).cloned()
    }

    fn resolve_many(&self, max_depth: usize) -> Vec<CallerFrame> {
        self.frames.iter().take(max_depth).cloned().collect()
    }
}

/// Resolver that never finds a frame
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopResolver;

impl StackResolver for NoopResolver {
    fn resolve_one(&self, _skip: usize) -> Option<CallerFrame> {
        None
    }

    fn resolve_many(&self, _max_depth: usize) -> Vec<CallerFrame> {
        Vec::new()
    }
}

/// The resolver a logger uses unless one is supplied
pub fn default_resolver() -> Arc<dyn StackResolver> {
    #[cfg(feature = "backtrace")]
    {
        Arc::new(BacktraceResolver)
    }
    #[cfg(not(feature = "backtrace"))]
    {
        Arc::new(NoopResolver)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stack(depth: u32) -> FixedResolver {
        FixedResolver::new(
            (0..depth)
                .map(|i| CallerFrame::new("src/routers/api/v1/article.rs", 10 + i, format!("handler_{}", i)))
                .collect(),
        )
    }

    #[test]
    fn test_frame_display() {
        let frame = CallerFrame::new("/srv/blog/main.rs", 42, "blog::setup_logger");
        assert_eq!(frame.to_string(), "/srv/blog/main.rs: 42 blog::setup_logger");
    }

    #[test]
    fn test_fixed_resolver_one() {
        let resolver = stack(3);
        assert_eq!(resolver.resolve_one(1).unwrap().function, "handler_1");
        assert!(resolver.resolve_one(3).is_none());
    }

    #[test]
    fn test_fixed_resolver_many_respects_depth() {
        let resolver = stack(40);
        assert_eq!(resolver.resolve_many(MAX_CALLER_DEPTH).len(), MAX_CALLER_DEPTH);
        assert_eq!(stack(2).resolve_many(MAX_CALLER_DEPTH).len(), 2);
    }

    #[test]
    fn test_noop_resolver() {
        assert!(NoopResolver.resolve_one(0).is_none());
        assert!(NoopResolver.resolve_many(MAX_CALLER_DEPTH).is_empty());
    }

    #[cfg(feature = "backtrace")]
    #[test]
    fn test_entry_point_detection() {
        assert!(is_entry_point(
            "<blog_logger::core::caller::BacktraceResolver as blog_logger::core::caller::StackResolver>::resolve_one"
        ));
        assert!(is_entry_point("blog_logger::core::logger::Logger::with_callers_frames"));
        assert!(!is_entry_point("backtrace::backtrace::trace_unsynchronized"));
        assert!(!is_entry_point("blog_logger::core::logger::tests::test_with_caller_resolves_live_stack"));
        assert!(!is_entry_point("blog_service::routers::article::create"));
    }

    #[cfg(feature = "backtrace")]
    #[test]
    fn test_symbol_without_location_yields_no_frame() {
        let file = std::path::Path::new("src/main.rs");

        assert_eq!(located_frame(None, Some(12), "core::ops::function::FnOnce::call_once".into()), None);
        assert_eq!(located_frame(Some(file), None, "blog::main".into()), None);
        assert_eq!(located_frame(Some(file), Some(0), "blog::main".into()), None);
        assert_eq!(located_frame(Some(std::path::Path::new("")), Some(3), "blog::main".into()), None);
        assert_eq!(
            located_frame(Some(file), Some(12), "blog::main".into()),
            Some(CallerFrame::new("src/main.rs", 12, "blog::main"))
        );
    }

    #[cfg(feature = "backtrace")]
    #[test]
    fn test_live_frames_always_carry_a_location() {
        for frame in BacktraceResolver.resolve_many(MAX_CALLER_DEPTH) {
            assert!(!frame.file.is_empty(), "frame without file: {}", frame);
            assert!(frame.line > 0, "frame without line: {}", frame);
        }
    }

    #[cfg(all(feature = "backtrace", debug_assertions))]
    #[test]
    fn test_backtrace_resolver_from_direct_call() {
        let frame = BacktraceResolver.resolve_one(0).expect("frame resolves in test builds");
        assert!(frame.function.contains("test_backtrace_resolver_from_direct_call"));
        assert!(frame.line > 0);
    }
}
