use super::constants::{HEADER_DELIMITER, VARIABLES_MARKER};
use super::error::HeaderError;

/// Parse the header line of a v3d file into the ordered list of column names.
///
/// The header is everything after the `VARIABLES=` marker, with quoting and
/// line-ending characters stripped, split on a comma-space delimiter. The
/// resulting list is the authoritative column order for the rest of the file.
pub fn parse_header(line: &str) -> Result<Vec<String>, HeaderError> {
    let tail = match line.split_once(VARIABLES_MARKER) {
        Some((_, tail)) => tail,
        None => return Err(HeaderError::MissingMarker(line.trim_end().to_string())),
    };

    let names: Vec<String> = tail
        .replace('"', "")
        .trim_end()
        .split(HEADER_DELIMITER)
        .map(|name| name.trim().to_string())
        .collect();

    if names.iter().all(|name| name.is_empty()) {
        return Err(HeaderError::EmptyVariables);
    }

    Ok(names)
}
