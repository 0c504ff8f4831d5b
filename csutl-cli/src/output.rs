//! Terminal output formatting

use anyhow::{Context, Result};
use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};
use serde_json::Value;

/// Render a JSON response for display
///
/// Raw mode passes the text through untouched; otherwise it is
/// pretty-printed with a four space indent.
pub fn render_text(text: &str, raw: bool) -> Result<String> {
    if raw {
        return Ok(text.to_string());
    }

    let value: Value = serde_json::from_str(text).context("response is not valid JSON")?;
    pretty(&value)
}

/// Render a serializable value for display
pub fn render_value<T: Serialize>(value: &T, raw: bool) -> Result<String> {
    if raw {
        return Ok(serde_json::to_string(value)?);
    }
    pretty(value)
}

fn pretty<T: Serialize>(value: &T) -> Result<String> {
    let mut buf = Vec::new();
    let mut serializer = Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(b"    "));
    value.serialize(&mut serializer)?;
    Ok(String::from_utf8(buf)?)
}
