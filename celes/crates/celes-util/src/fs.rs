//! File reading helpers.

use std::io;
use std::path::Path;

/// UTF-8 byte-order mark.
const BOM: &[u8] = b"\xEF\xBB\xBF";

/// Read a file as UTF-8 text, stripping a leading byte-order mark.
///
/// A missing file surfaces as [`io::ErrorKind::NotFound`]; invalid UTF-8
/// surfaces as [`io::ErrorKind::InvalidData`]. Callers that care about the
/// distinction (the TOML `open` entry point does) match on the kind.
///
/// # Examples
///
/// ```no_run
/// use celes_util::read_utf8_file;
///
/// let text = read_utf8_file("Project.toml".as_ref())?;
/// # Ok::<(), std::io::Error>(())
/// ```
pub fn read_utf8_file(path: &Path) -> io::Result<String> {
    let mut bytes = std::fs::read(path)?;
    if bytes.starts_with(BOM) {
        bytes.drain(..BOM.len());
    }

    String::from_utf8(bytes).map_err(|err| {
        io::Error::new(
            io::ErrorKind::InvalidData,
            format!("{} is not valid UTF-8: {}", path.display(), err),
        )
    })
}
