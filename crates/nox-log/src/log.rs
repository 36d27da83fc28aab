use std::{
    io::Write,
    sync::{Mutex, MutexGuard, OnceLock, PoisonError},
};

use core::str::FromStr;

use termcolor::{WriteColor, StandardStream, ColorChoice};

pub use termcolor::{ColorSpec, Color};

use rustc_hash::FxHashMap;

use compact_str::CompactString;

use nox_array::DynArray;

use crate::*;

use fmt::SegmentSpec;

/// Handle to a format registered with [`custom_fmt`].
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct CustomFmt(usize);

#[repr(i8)]
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Debug)]
pub enum Level {
    Always = -1,
    Error = 0,
    Warn = 1,
    Info = 2,
    Debug = 3,
    Trace = 4,
}

pub enum LevelFmt {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
    Other(CustomFmt, Level),
}

impl FromStr for Level {

    type Err = ();

    fn from_str(s: &str) -> core::result::Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("error") {
            Ok(Self::Error)
        } else if s.eq_ignore_ascii_case("warn") {
            Ok(Self::Warn)
        } else if s.eq_ignore_ascii_case("info") {
            Ok(Self::Info)
        } else if s.eq_ignore_ascii_case("debug") {
            Ok(Self::Debug)
        } else if s.eq_ignore_ascii_case("trace") {
            Ok(Self::Trace)
        } else {
            Err(())
        }
    }
}

/// Level filters parsed from a `RUST_LOG` style string.
///
/// Entries are comma separated, either a bare `level` that sets the base
/// level or `target=level`. Unparseable entries are skipped, and a target
/// listed twice keeps its more restrictive level.
#[derive(Debug)]
pub struct Filters {
    pub base_level: Level,
    pub target_levels: FxHashMap<CompactString, Level>,
}

impl Filters {

    pub fn parse(spec: &str) -> Self {
        let mut filters = Self::default();
        for arg in spec.split(',') {
            let (target, level) = match arg.split_once('=') {
                Some((target, level)) => (Some(target.trim()), level.trim()),
                None => (None, arg.trim()),
            };
            let Ok(level) = Level::from_str(level) else {
                continue
            };
            match target {
                Some(target) => {
                    let entry = filters.target_levels
                        .entry(CompactString::new(target))
                        .or_insert(level);
                    *entry = (*entry).min(level);
                },
                None => filters.base_level = level,
            }
        }
        filters
    }

    /// Level of the closest configured `::` ancestor of `target`.
    pub fn target_level(&self, target: &str) -> Level {
        let mut substr = target;
        if let Some(&level) = self.target_levels.get(substr) {
            return level
        }
        while let Some(i) = substr.rfind("::") {
            substr = &substr[0..i];
            if let Some(&level) = self.target_levels.get(substr) {
                return level
            }
        }
        self.base_level
    }
}

impl Default for Filters {

    fn default() -> Self {
        Self {
            base_level: Level::Error,
            target_levels: FxHashMap::default(),
        }
    }
}

struct Logger {
    stderr: StandardStream,
    info_fmt: LogFmt,
    warn_fmt: LogFmt,
    error_fmt: LogFmt,
    debug_fmt: LogFmt,
    trace_fmt: LogFmt,
    custom_fmt: DynArray<LogFmt>,
    filters: Filters,
}

impl Logger {

    fn new() -> Result<Self> {
        let filters = std::env::var("RUST_LOG")
            .map(|env| Filters::parse(&env))
            .unwrap_or_default();
        Ok(Self {
            stderr: StandardStream::stderr(ColorChoice::Auto),
            info_fmt: LogFmt::with_label("[info]", Color::Green)?,
            warn_fmt: LogFmt::with_label("[warn]", Color::Yellow)?,
            error_fmt: LogFmt::with_label("[error]", Color::Red)?,
            debug_fmt: LogFmt::with_label("[debug]", Color::Blue)?,
            trace_fmt: LogFmt::with_label("[trace]", Color::Magenta)?,
            custom_fmt: DynArray::new(),
            filters,
        })
    }

    fn log(&mut self, target: &str, level: LevelFmt, msg: core::fmt::Arguments) -> Result<bool> {
        let target_level = self.filters.target_level(target);
        let (fmt, level) = match level {
            LevelFmt::Error => (&self.error_fmt, Level::Error),
            LevelFmt::Warn => (&self.warn_fmt, Level::Warn),
            LevelFmt::Info => (&self.info_fmt, Level::Info),
            LevelFmt::Debug => (&self.debug_fmt, Level::Debug),
            LevelFmt::Trace => (&self.trace_fmt, Level::Trace),
            LevelFmt::Other(CustomFmt(index), level) => (self.custom_fmt.at(index)?, level),
        };
        if target_level < level {
            return Ok(false)
        }
        let mut stderr = self.stderr.lock();
        for segment in fmt {
            let (color_spec, text) = match segment {
                SegmentSpec::Message(log_spec) => (&log_spec.color_spec, None),
                SegmentSpec::Text(text, log_spec) => (&log_spec.color_spec, Some(text)),
            };
            if let Some(color_spec) = color_spec {
                stderr.set_color(color_spec)?;
            }
            match text {
                Some(text) => stderr.write_all(text.as_bytes())?,
                None => write!(stderr, "{}", msg)?,
            }
            if color_spec.is_some() {
                stderr.reset()?;
            }
        }
        stderr.write_all(b"\n")?;
        Ok(true)
    }
}

static LOGGER: OnceLock<Mutex<Logger>> = OnceLock::new();

/// Initializes the global logger. Filters are read from `RUST_LOG` once.
pub fn init() -> Result<()> {
    if LOGGER.get().is_some() {
        return Ok(())
    }
    let logger = Logger::new()?;
    let _ = LOGGER.set(Mutex::new(logger));
    Ok(())
}

#[inline(always)]
fn logger() -> MutexGuard<'static, Logger> {
    LOGGER
        .get()
        .expect("nox logger not initialized")
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
}

#[inline(always)]
pub fn error_fmt(f: impl FnOnce(&mut LogFmtBuilder) -> Result<()>) -> Result<()> {
    let mut logger = logger();
    f(&mut LogFmtBuilder::new(&mut logger.error_fmt))
}

#[inline(always)]
pub fn warn_fmt(f: impl FnOnce(&mut LogFmtBuilder) -> Result<()>) -> Result<()> {
    let mut logger = logger();
    f(&mut LogFmtBuilder::new(&mut logger.warn_fmt))
}

#[inline(always)]
pub fn info_fmt(f: impl FnOnce(&mut LogFmtBuilder) -> Result<()>) -> Result<()> {
    let mut logger = logger();
    f(&mut LogFmtBuilder::new(&mut logger.info_fmt))
}

#[inline(always)]
pub fn debug_fmt(f: impl FnOnce(&mut LogFmtBuilder) -> Result<()>) -> Result<()> {
    let mut logger = logger();
    f(&mut LogFmtBuilder::new(&mut logger.debug_fmt))
}

#[inline(always)]
pub fn trace_fmt(f: impl FnOnce(&mut LogFmtBuilder) -> Result<()>) -> Result<()> {
    let mut logger = logger();
    f(&mut LogFmtBuilder::new(&mut logger.trace_fmt))
}

/// Registers `fmt` for use with [`LevelFmt::Other`].
pub fn custom_fmt(fmt: LogFmt) -> Result<CustomFmt> {
    let mut logger = logger();
    let index = logger.custom_fmt.len();
    logger.custom_fmt.push(fmt)?;
    Ok(CustomFmt(index))
}

#[inline(always)]
pub fn log(target: &str, level: LevelFmt, args: core::fmt::Arguments) -> Result<bool> {
    logger().log(target, level, args)
}

/// Whether `fmt` refers to a registered format.
pub fn has_custom_fmt(fmt: CustomFmt) -> bool {
    logger().custom_fmt.at(fmt.0).is_ok()
}

#[macro_export]
macro_rules! error {
    ($fmt:expr $(, $arg:expr)* $(,)?) => {
        $crate::log(module_path!(), $crate::LevelFmt::Error, format_args!($fmt, $($arg),*))
            .unwrap_or(false)
    };
}

#[macro_export]
macro_rules! warn {
    ($fmt:expr $(, $arg:expr)* $(,)?) => {
        $crate::log(module_path!(), $crate::LevelFmt::Warn, format_args!($fmt, $($arg),*))
            .unwrap_or(false)
    };
}

#[macro_export]
macro_rules! info {
    ($fmt:expr $(, $arg:expr)* $(,)?) => {
        $crate::log(module_path!(), $crate::LevelFmt::Info, format_args!($fmt, $($arg),*))
            .unwrap_or(false)
    };
}

#[macro_export]
macro_rules! debug {
    ($fmt:expr $(, $arg:expr)* $(,)?) => {
        $crate::log(module_path!(), $crate::LevelFmt::Debug, format_args!($fmt, $($arg),*))
            .unwrap_or(false)
    };
}

#[macro_export]
macro_rules! trace {
    ($fmt:expr $(, $arg:expr)* $(,)?) => {
        $crate::log(module_path!(), $crate::LevelFmt::Trace, format_args!($fmt, $($arg),*))
            .unwrap_or(false)
    };
}

#[cfg(test)]
mod tests {

    use super::*;

    #[test]
    fn filters_default_to_error() {
        let filters = Filters::parse("");
        assert_eq!(filters.base_level, Level::Error);
        assert!(filters.target_levels.is_empty());
    }

    #[test]
    fn filters_parse_base_and_targets() {
        let filters = Filters::parse("info, nox_array_example=trace ,nox_log::log=WARN,bogus");
        assert_eq!(filters.base_level, Level::Info);
        assert_eq!(filters.target_level("nox_array_example"), Level::Trace);
        assert_eq!(filters.target_level("nox_array_example::growth"), Level::Trace);
        assert_eq!(filters.target_level("nox_log::log::inner"), Level::Warn);
        assert_eq!(filters.target_level("nox_log"), Level::Info);
        assert_eq!(filters.target_level("other"), Level::Info);
    }

    #[test]
    fn filters_keep_most_restrictive_duplicate() {
        let filters = Filters::parse("app=debug,app=warn,app=trace");
        assert_eq!(filters.target_level("app"), Level::Warn);
    }

    #[test]
    fn label_fmt_has_three_segments() {
        let fmt = LogFmt::with_label("[info]", Color::Green).unwrap();
        assert_eq!(fmt.len(), 3);
        assert!(matches!(fmt.into_iter().last(), Some(SegmentSpec::Message(_))));
    }

    #[test]
    fn builder_replaces_segments() {
        let mut fmt = LogFmt::with_label("[x]", Color::Red).unwrap();
        LogFmtBuilder::new(&mut fmt)
            .message(|spec| spec)
            .unwrap();
        assert_eq!(fmt.len(), 1);
    }

    #[test]
    fn unknown_custom_fmt_is_an_error() {
        init().unwrap();
        let missing = CustomFmt(usize::MAX);
        assert!(!has_custom_fmt(missing));
        let result = log("tests", LevelFmt::Other(missing, Level::Always), format_args!("unreachable"));
        assert!(matches!(result, Err(LogError::FormatError(_))));

        let registered = custom_fmt(LogFmt::with_label("[custom]", Color::Cyan).unwrap()).unwrap();
        assert!(has_custom_fmt(registered));
    }
}
