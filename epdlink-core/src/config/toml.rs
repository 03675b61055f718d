//! TOML loading for link configuration
//!
//! Works on the `toml_parser` event stream directly, so only `alloc` is
//! needed (no atomics). Missing keys fall back to their defaults, so an
//! empty document yields `LinkConfig::default()`. Example:
//!
//! ```toml
//! edge_delay_ns = 1000
//! busy = { bounded = { timeout_ms = 5000 } }
//!
//! [reset]
//! assert_ms = 20
//! release_ms = 10
//! ```
//!
//! Supported subset: integers, strings, `[table]` headers, dotted keys and
//! inline tables. Arrays and arrays of tables are rejected.

use alloc::borrow::Cow;
use alloc::vec::Vec;

use toml_parser::decoder::ScalarKind;
use toml_parser::parser::{parse_document, Event, EventKind};
use toml_parser::{ParseError, Source};

use super::types::{BusyPolicy, ConfigError, LinkConfig};

type Path<'i> = Vec<Cow<'i, str>>;

/// Decoded scalar value
enum Value<'i> {
    Integer(u32),
    String(Cow<'i, str>),
}

/// Parse and validate a TOML link configuration
pub fn from_toml(input: &str) -> Result<LinkConfig, ConfigError> {
    let source = Source::new(input);
    let tokens = source.lex().into_vec();

    let mut events: Vec<Event> = Vec::with_capacity(tokens.len());
    let mut errors: Option<ParseError> = None;
    parse_document(&tokens, &mut events, &mut errors);
    if errors.is_some() {
        return Err(ConfigError::Parse);
    }

    let mut builder = Builder::default();
    let mut in_header = false;
    let mut table: Path = Vec::new();
    let mut inline: Vec<Path> = Vec::new();
    let mut key: Path = Vec::new();

    for event in &events {
        match event.kind() {
            EventKind::StdTableOpen => {
                in_header = true;
                table.clear();
            }
            EventKind::StdTableClose => {
                in_header = false;
                builder.table_opened(&table);
            }
            EventKind::SimpleKey => {
                let name = decode_key(&source, event, &mut errors)?;
                if in_header {
                    table.push(name);
                } else {
                    key.push(name);
                }
            }
            EventKind::InlineTableOpen => {
                inline.push(core::mem::take(&mut key));
                builder.table_opened(&full_path(&table, &inline, &[]));
            }
            EventKind::InlineTableClose => {
                inline.pop();
            }
            EventKind::Scalar => {
                let value = decode_scalar(&source, event, &mut errors)?;
                let path = full_path(&table, &inline, &key);
                builder.apply(&path, value)?;
                key.clear();
            }
            EventKind::ArrayOpen | EventKind::ArrayTableOpen => {
                return Err(ConfigError::Invalid("arrays are not supported"));
            }
            EventKind::Error => return Err(ConfigError::Parse),
            _ => {}
        }
    }

    let config = builder.finish()?;
    config.validate()?;
    Ok(config)
}

fn decode_key<'i>(
    source: &Source<'i>,
    event: &Event,
    errors: &mut Option<ParseError>,
) -> Result<Cow<'i, str>, ConfigError> {
    let raw = source.get(event).ok_or(ConfigError::Parse)?;
    let mut name = Cow::Borrowed("");
    raw.decode_key(&mut name, errors);
    if errors.is_some() {
        return Err(ConfigError::Parse);
    }
    Ok(name)
}

fn decode_scalar<'i>(
    source: &Source<'i>,
    event: &Event,
    errors: &mut Option<ParseError>,
) -> Result<Value<'i>, ConfigError> {
    let raw = source.get(event).ok_or(ConfigError::Parse)?;
    let mut text = Cow::Borrowed("");
    let kind = raw.decode_scalar(&mut text, errors);
    if errors.is_some() {
        return Err(ConfigError::Parse);
    }

    match kind {
        ScalarKind::String => Ok(Value::String(text)),
        ScalarKind::Integer(_) if raw.as_str().starts_with('-') => {
            Err(ConfigError::Invalid("values must not be negative"))
        }
        ScalarKind::Integer(radix) => u32::from_str_radix(&text, radix.value())
            .map(Value::Integer)
            .map_err(|_| ConfigError::Invalid("integer out of range")),
        _ => Err(ConfigError::Parse),
    }
}

fn full_path<'i>(table: &[Cow<'i, str>], inline: &[Path<'i>], key: &[Cow<'i, str>]) -> Path<'i> {
    let mut path: Path = table.to_vec();
    for prefix in inline {
        path.extend(prefix.iter().cloned());
    }
    path.extend(key.iter().cloned());
    path
}

fn path_is(path: &[Cow<'_, str>], expected: &[&str]) -> bool {
    path.len() == expected.len() && path.iter().zip(expected).all(|(a, b)| a == b)
}

/// Collects values as they are found in the document
#[derive(Default)]
struct Builder {
    config: LinkConfig,
    /// `busy.bounded` was opened as a table
    bounded_seen: bool,
    bounded_timeout: Option<u32>,
}

impl Builder {
    fn table_opened(&mut self, path: &[Cow<'_, str>]) {
        if path_is(path, &["busy", "bounded"]) {
            self.bounded_seen = true;
        }
    }

    fn apply(&mut self, path: &[Cow<'_, str>], value: Value<'_>) -> Result<(), ConfigError> {
        let slot = match path {
            [key] if key == "edge_delay_ns" => &mut self.config.edge_delay_ns,
            [table, key] if table == "reset" => {
                let reset = &mut self.config.reset;
                match &**key {
                    "assert_ms" => &mut reset.assert_ms,
                    "release_ms" => &mut reset.release_ms,
                    "settle_ms" => &mut reset.settle_ms,
                    "poll_interval_ms" => &mut reset.poll_interval_ms,
                    _ => return Err(ConfigError::Invalid("unknown key in [reset]")),
                }
            }
            [key] if key == "busy" => {
                return match value {
                    Value::String(s) if s == "unbounded" => {
                        self.config.busy = BusyPolicy::Unbounded;
                        self.bounded_seen = false;
                        self.bounded_timeout = None;
                        Ok(())
                    }
                    _ => Err(ConfigError::Invalid("busy must be \"unbounded\" or a table")),
                };
            }
            _ if path_is(path, &["busy", "bounded", "timeout_ms"]) => {
                self.bounded_seen = true;
                let Value::Integer(ms) = value else {
                    return Err(ConfigError::Invalid("busy.bounded.timeout_ms must be an integer"));
                };
                self.bounded_timeout = Some(ms);
                return Ok(());
            }
            _ => return Err(ConfigError::Invalid("unknown key")),
        };

        match value {
            Value::Integer(n) => {
                *slot = n;
                Ok(())
            }
            Value::String(_) => Err(ConfigError::Invalid("expected an integer")),
        }
    }

    fn finish(mut self) -> Result<LinkConfig, ConfigError> {
        if self.bounded_seen {
            let timeout_ms = self
                .bounded_timeout
                .ok_or(ConfigError::Invalid("busy.bounded missing timeout_ms"))?;
            self.config.busy = BusyPolicy::Bounded { timeout_ms };
        }
        Ok(self.config)
    }
}
