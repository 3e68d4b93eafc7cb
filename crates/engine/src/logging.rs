//! Trace line formatting shared by both engines.

use symbin_core::{bytes_to_hex, SerializerLogger};

const HEX_BYTES_PER_LINE: usize = 16;

/// Optional logger sink plus the direction tag used in every prefix.
pub(crate) struct TraceLog {
    tag: &'static str,
    sink: Option<Box<dyn SerializerLogger>>,
}

impl TraceLog {
    pub(crate) fn new(tag: &'static str) -> Self {
        TraceLog { tag, sink: None }
    }

    pub(crate) fn attach(&mut self, sink: Box<dyn SerializerLogger>) {
        self.sink = Some(sink);
    }

    pub(crate) fn is_enabled(&self) -> bool {
        self.sink.is_some()
    }

    /// `({tag}) 0x{offset:08X}:` followed by two spaces per nesting level.
    pub(crate) fn prefix(&self, offset: u64, depth: usize) -> String {
        format!("({}) 0x{:08X}:{}", self.tag, offset, " ".repeat((depth + 1) * 2))
    }

    /// Emit one line. `body` is only evaluated when a sink is attached.
    pub(crate) fn line(&mut self, offset: u64, depth: usize, body: impl FnOnce() -> String) {
        if self.sink.is_none() {
            return;
        }
        let line = format!("{}{}", self.prefix(offset, depth), body());
        if let Some(sink) = self.sink.as_mut() {
            sink.write_log_line(&line);
        }
    }

    /// Emit a byte block as hex, continuation lines aligned under the first
    /// byte.
    pub(crate) fn bytes(
        &mut self,
        offset: u64,
        depth: usize,
        head: impl FnOnce() -> String,
        bytes: &[u8],
    ) {
        if self.sink.is_none() {
            return;
        }
        let lead = format!("{}{}: ", self.prefix(offset, depth), head());
        let hex = bytes_to_hex(bytes, Some(HEX_BYTES_PER_LINE), &" ".repeat(lead.len()));
        if let Some(sink) = self.sink.as_mut() {
            sink.write_log_line(&format!("{lead}{hex}"));
        }
    }

    /// Name for element `index` of `name`, or nothing when not logging.
    pub(crate) fn element_name(&self, name: &str, index: usize) -> String {
        if self.is_enabled() && !name.is_empty() {
            format!("{name}[{index}]")
        } else {
            String::new()
        }
    }

    /// Name for the length field of `name`, or nothing when not logging.
    pub(crate) fn length_name(&self, name: &str) -> String {
        if self.is_enabled() {
            format!("{name}.Length")
        } else {
            String::new()
        }
    }
}

impl std::fmt::Debug for TraceLog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TraceLog")
            .field("tag", &self.tag)
            .field("enabled", &self.is_enabled())
            .finish()
    }
}

pub(crate) fn display_name(name: &str) -> &str {
    if name.is_empty() {
        "<no name>"
    } else {
        name
    }
}

/// Type name with every module path stripped, including inside generics:
/// `alloc::vec::Vec<alloc::string::String>` becomes `Vec<String>`.
pub(crate) fn short_type_name<T: ?Sized>() -> String {
    let full = std::any::type_name::<T>();
    let mut out = String::with_capacity(full.len());
    let mut token = String::new();

    for c in full.chars() {
        if c.is_alphanumeric() || c == '_' || c == ':' {
            token.push(c);
        } else {
            out.push_str(last_segment(&token));
            token.clear();
            out.push(c);
        }
    }
    out.push_str(last_segment(&token));
    out
}

fn last_segment(path: &str) -> &str {
    path.rsplit("::").next().unwrap_or(path)
}
