use serde::Serialize;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Writes `value` as pretty-printed JSON with a trailing newline.
pub fn write_json<T: Serialize>(value: &T, filepath: &Path) -> std::io::Result<()> {
    let mut file = BufWriter::new(File::create(filepath)?);

    serde_json::to_writer_pretty(&mut file, value)?;
    writeln!(file)?;
    file.flush()
}
