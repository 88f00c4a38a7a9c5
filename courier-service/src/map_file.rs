//! Plain-text road maps.
//!
//! One road per line: `cityA cityB distance`, separated by whitespace. Blank
//! lines are skipped. Edges the graph rejects (negative distances, self-loops,
//! duplicates) are logged by the graph and do not fail the load.

use camino::Utf8Path;
use courier_core::{Edge, Graph, build_graph};

use crate::MapFileError;

/// Parse every road in `input`.
///
/// `origin` names the input in error messages.
///
/// # Errors
///
/// [`MapFileError::MalformedLine`] for the first line that does not hold
/// exactly two names and an integer distance.
///
/// # Examples
/// ```
/// use courier_service::parse_edges;
///
/// let edges = parse_edges("A B 4\n\nB C 2\n", "inline").expect("valid map");
/// assert_eq!(edges.len(), 2);
/// assert_eq!(edges[1].distance, 2);
/// ```
pub fn parse_edges(input: &str, origin: &str) -> Result<Vec<Edge>, MapFileError> {
    input
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(index, line)| {
            parse_line(line).ok_or_else(|| MapFileError::MalformedLine {
                origin: origin.to_owned(),
                line: index.saturating_add(1),
                content: line.to_owned(),
            })
        })
        .collect()
}

fn parse_line(line: &str) -> Option<Edge> {
    let mut fields = line.split_whitespace();
    let (Some(from), Some(to), Some(raw), None) =
        (fields.next(), fields.next(), fields.next(), fields.next())
    else {
        return None;
    };
    Some(Edge::new(from, to, raw.parse().ok()?))
}

/// Read and build the map stored at `path`.
///
/// # Errors
///
/// [`MapFileError::Read`] when the file cannot be read and
/// [`MapFileError::MalformedLine`] for syntax errors.
pub fn load_map(path: &Utf8Path) -> Result<Graph, MapFileError> {
    let contents = courier_fs::read_to_string(path).map_err(|source| MapFileError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let edges = parse_edges(&contents, path.as_str())?;
    let graph = build_graph(edges);
    log::info!("loaded {} cities from {path}", graph.len());
    Ok(graph)
}
