use nox_array::DynArray;

use compact_str::CompactString;

use termcolor::{Color, ColorSpec};

use crate::Result;

/// Output layout of one log line, as a sequence of segments.
#[derive(Default)]
pub struct LogFmt {
    segments: DynArray<SegmentSpec>,
}

impl LogFmt {

    /// `label` in `color`, followed by the message.
    pub fn with_label(label: &str, color: Color) -> Result<Self> {
        let mut fmt = Self::default();
        LogFmtBuilder::new(&mut fmt)
            .text(label, |spec| spec.with_color_spec(|c| { c.set_fg(Some(color)).set_bold(true); }))?
            .text(" ", |spec| spec)?
            .message(|spec| spec)?;
        Ok(fmt)
    }

    #[inline(always)]
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    fn clear(&mut self) {
        self.segments.clear();
    }
}

impl<'a> IntoIterator for &'a LogFmt {

    type Item = &'a SegmentSpec;
    type IntoIter = nox_array::Iter<'a, SegmentSpec>;

    fn into_iter(self) -> Self::IntoIter {
        self.segments.iter()
    }
}

#[derive(Default, Clone)]
pub struct LogSpec {
    pub color_spec: Option<ColorSpec>,
}

impl LogSpec {

    #[inline(always)]
    pub fn with_color_spec(mut self, f: impl FnOnce(&mut ColorSpec)) -> Self {
        let color_spec = self.color_spec.insert(ColorSpec::new());
        f(color_spec);
        self
    }
}

pub enum SegmentSpec {
    Message(LogSpec),
    Text(CompactString, LogSpec),
}

/// Rebuilds a [`LogFmt`] from scratch.
pub struct LogFmtBuilder<'a> {
    fmt: &'a mut LogFmt,
}

impl<'a> LogFmtBuilder<'a> {

    #[inline(always)]
    pub fn new(fmt: &'a mut LogFmt) -> Self {
        fmt.clear();
        Self {
            fmt,
        }
    }

    #[inline(always)]
    pub fn message(&mut self, f: impl FnOnce(LogSpec) -> LogSpec) -> Result<&mut Self> {
        self.fmt.segments.push(SegmentSpec::Message(f(Default::default())))?;
        Ok(self)
    }

    #[inline(always)]
    pub fn text(&mut self, text: &str, f: impl FnOnce(LogSpec) -> LogSpec) -> Result<&mut Self> {
        self.fmt.segments.push(SegmentSpec::Text(CompactString::new(text), f(Default::default())))?;
        Ok(self)
    }
}
