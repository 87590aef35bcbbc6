//! Reads the flat edge-list instance format into a [`tsp_core::Graph`].
//!
//! The whole file is memory-mapped and scanned line by line with `memchr`,
//! the same shape the teacher crate uses for its own (TSPLIB) instance
//! reader, rather than collecting the file into an owned `String` up front.

mod error;

use std::fs::File;
use std::path::Path;

use log::info;
use memchr::memchr;
use memmap2::{Advice, Mmap};
use tsp_core::Graph;

pub use error::ParseError;

/// Parses the `n m` / `u v c` edge-list format described by the CLI's input
/// contract directly into a [`Graph`]. There is no intermediate
/// instance-metadata stage: the format carries nothing beyond the edge list
/// itself.
pub fn parse_instance<P: AsRef<Path>>(path: P) -> Result<Graph, ParseError> {
    let (n, edges) = parse_raw_edges(path.as_ref())?;
    Graph::from_edges(n, &edges).map_err(ParseError::from)
}

fn parse_raw_edges(path: &Path) -> Result<(usize, Vec<(usize, usize, f64)>), ParseError> {
    let file = File::open(path).map_err(|source| ParseError::Open { path: path.to_path_buf(), source })?;

    // Safety: the mapping is read-only and scoped to this function; the file
    // is not modified by this process or (assumed, per the batch-job usage
    // model) any other process while it is mapped.
    let mmap = unsafe { Mmap::map(&file) }.map_err(|source| ParseError::Open { path: path.to_path_buf(), source })?;
    let _ = mmap.advise(Advice::Sequential);

    let mut cursor = 0usize;
    let mut line_no = 0usize;

    let header = next_line(&mmap, &mut cursor).ok_or(ParseError::MissingHeader { line: 1 })?;
    line_no += 1;
    let (n, m) = parse_header(header, line_no)?;

    let mut edges = Vec::with_capacity(m);
    for seen in 0..m {
        let line = next_line(&mmap, &mut cursor).ok_or(ParseError::EdgeCountMismatch { expected: m, found: seen })?;
        line_no += 1;
        edges.push(parse_edge_line(line, line_no, n)?);
    }

    info!("parsed {} cities and {} edges from {}", n, edges.len(), path.display());
    Ok((n, edges))
}

/// Returns the next newline-delimited line (without the terminator),
/// advancing `cursor` past it. Blank lines are skipped. Returns `None` once
/// the mapped content is exhausted.
fn next_line<'a>(content: &'a [u8], cursor: &mut usize) -> Option<&'a [u8]> {
    loop {
        if *cursor >= content.len() {
            return None;
        }
        let rest = &content[*cursor..];
        let (line, advance) = match memchr(b'\n', rest) {
            Some(offset) => (&rest[..offset], offset + 1),
            None => (rest, rest.len()),
        };
        *cursor += advance;
        let trimmed = trim_ascii(line);
        if !trimmed.is_empty() {
            return Some(trimmed);
        }
        if advance == 0 {
            return None;
        }
    }
}

fn trim_ascii(bytes: &[u8]) -> &[u8] {
    let start = bytes.iter().position(|b| !b.is_ascii_whitespace()).unwrap_or(bytes.len());
    let end = bytes.iter().rposition(|b| !b.is_ascii_whitespace()).map_or(start, |p| p + 1);
    &bytes[start..end]
}

fn parse_header(line: &[u8], line_no: usize) -> Result<(usize, usize), ParseError> {
    let text = std::str::from_utf8(line).map_err(|_| ParseError::InvalidNumber {
        line: line_no,
        field: "n".to_string(),
        found: String::from_utf8_lossy(line).into_owned(),
    })?;
    let mut fields = text.split_ascii_whitespace();
    let n = parse_field::<usize>(&mut fields, line_no, "n")?;
    let m = parse_field::<usize>(&mut fields, line_no, "m")?;
    if fields.next().is_some() {
        return Err(ParseError::MalformedLine { line: line_no, found: text.to_string() });
    }
    Ok((n, m))
}

fn parse_edge_line(line: &[u8], line_no: usize, _n: usize) -> Result<(usize, usize, f64), ParseError> {
    let text = std::str::from_utf8(line).map_err(|_| ParseError::MalformedLine {
        line: line_no,
        found: String::from_utf8_lossy(line).into_owned(),
    })?;
    let mut fields = text.split_ascii_whitespace();
    let u = parse_field::<usize>(&mut fields, line_no, "u")?;
    let v = parse_field::<usize>(&mut fields, line_no, "v")?;
    let c = parse_field::<f64>(&mut fields, line_no, "c")?;
    if fields.next().is_some() {
        return Err(ParseError::MalformedLine { line: line_no, found: text.to_string() });
    }
    Ok((u, v, c))
}

fn parse_field<T: std::str::FromStr>(
    fields: &mut std::str::SplitAsciiWhitespace<'_>,
    line_no: usize,
    name: &str,
) -> Result<T, ParseError> {
    let raw = fields.next().ok_or_else(|| ParseError::MalformedLine { line: line_no, found: String::new() })?;
    raw.parse().map_err(|_| ParseError::InvalidNumber { line: line_no, field: name.to_string(), found: raw.to_string() })
}
