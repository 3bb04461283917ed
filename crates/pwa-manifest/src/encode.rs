use crate::manifest::{Manifest, ManifestError};
use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use serde_json::Value;
use std::fs;
use std::io::Write;
use std::path::Path;
use tracing::debug;

const PRETTY_INDENT: &[u8] = b"    ";

/// Output style for JSON text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum JsonStyle {
    /// No whitespace between tokens.
    #[default]
    Compact,
    /// One member per line, four-space indentation.
    Pretty,
}

impl JsonStyle {
    pub fn from_pretty(pretty: bool) -> Self {
        if pretty {
            JsonStyle::Pretty
        } else {
            JsonStyle::Compact
        }
    }
}

impl Manifest {
    pub fn to_json(&self, style: JsonStyle) -> Result<String, ManifestError> {
        let document = Value::Object(self.render());
        match style {
            JsonStyle::Compact => Ok(serde_json::to_string(&document)?),
            JsonStyle::Pretty => {
                let mut buf = Vec::new();
                let formatter = PrettyFormatter::with_indent(PRETTY_INDENT);
                let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
                document.serialize(&mut ser)?;
                // serde_json only ever emits UTF-8.
                Ok(String::from_utf8_lossy(&buf).into_owned())
            }
        }
    }

    /// Write the manifest to `path`, replacing any existing file.
    /// Returns the number of bytes written.
    pub fn save(&self, path: impl AsRef<Path>, style: JsonStyle) -> Result<usize, ManifestError> {
        let path = path.as_ref();
        let content = self.to_json(style)?;
        let dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        let mut tmp = tempfile::NamedTempFile::new_in(dir)?;
        tmp.write_all(content.as_bytes())?;
        tmp.as_file().sync_all()?;
        tmp.persist(path).map_err(|e| ManifestError::Io(e.error))?;
        if let Ok(f) = fs::File::open(dir) {
            let _ = f.sync_all();
        }
        debug!(
            "wrote manifest to {} ({} bytes, {style:?})",
            path.display(),
            content.len()
        );
        Ok(content.len())
    }
}
