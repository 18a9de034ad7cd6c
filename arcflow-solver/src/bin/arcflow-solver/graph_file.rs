//! Writing of arc-flow graphs in a DIMACS-like text format.
//!
//! ```text
//! c <comment>
//! p arcflow <num_nodes> <num_arcs> <num_item_types> <num_dp_states>
//! n <node> <usage_1> ... <usage_D>
//! a <source> <destination> <item or ->
//! ```
//! Nodes and items are 0-based; an arc without an item is written with a `-`.
use std::fs::File;
use std::io::BufWriter;
use std::io::Write;
use std::path::Path;

use arcflow_solver::core::containers::StorageKey;
use arcflow_solver::core::ArcFlowGraph;

use crate::result::ArcFlowSolverResult;
#[cfg(not(feature = "gzipped-output"))]
use crate::result::ArcFlowSolverError;

/// A buffered writer to a graph file, which may compress its output.
///
/// The writer has to be [finished](GraphWriter::finish); dropping it loses the errors of the
/// final flush and, for gzipped output, of writing the gzip trailer.
pub(crate) enum GraphWriter {
    Plain(BufWriter<File>),
    #[cfg(feature = "gzipped-output")]
    Gzipped(BufWriter<flate2::write::GzEncoder<File>>),
}

impl GraphWriter {
    /// Creates a writer to `path`, which compresses its output if the path ends in `.gz`.
    pub(crate) fn create(path: &Path) -> ArcFlowSolverResult<GraphWriter> {
        let is_gzipped = path.extension().is_some_and(|extension| extension == "gz");

        if is_gzipped {
            #[cfg(feature = "gzipped-output")]
            {
                let file = File::create(path)?;
                let encoder = flate2::write::GzEncoder::new(file, flate2::Compression::fast());
                return Ok(GraphWriter::Gzipped(BufWriter::new(encoder)));
            }

            #[cfg(not(feature = "gzipped-output"))]
            return Err(ArcFlowSolverError::GzipNotSupported(
                path.display().to_string(),
            ));
        }

        let file = File::create(path)?;
        Ok(GraphWriter::Plain(BufWriter::new(file)))
    }

    /// Flushes all buffered output and completes the gzip stream.
    pub(crate) fn finish(self) -> std::io::Result<()> {
        match self {
            GraphWriter::Plain(mut writer) => writer.flush(),
            #[cfg(feature = "gzipped-output")]
            GraphWriter::Gzipped(writer) => {
                let encoder = writer.into_inner().map_err(|error| error.into_error())?;
                let _ = encoder.finish()?;
                Ok(())
            }
        }
    }
}

impl Write for GraphWriter {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        match self {
            GraphWriter::Plain(writer) => writer.write(buf),
            #[cfg(feature = "gzipped-output")]
            GraphWriter::Gzipped(writer) => writer.write(buf),
        }
    }

    fn flush(&mut self) -> std::io::Result<()> {
        match self {
            GraphWriter::Plain(writer) => writer.flush(),
            #[cfg(feature = "gzipped-output")]
            GraphWriter::Gzipped(writer) => writer.flush(),
        }
    }
}

/// Writes the graph; the caller is responsible for finishing the writer.
pub(crate) fn write_graph(
    graph: &ArcFlowGraph,
    comment: &str,
    writer: &mut impl Write,
) -> std::io::Result<()> {
    for line in comment.lines() {
        writeln!(writer, "c {line}")?;
    }

    writeln!(
        writer,
        "p arcflow {} {} {} {}",
        graph.num_nodes(),
        graph.arcs().len(),
        graph.num_item_types(),
        graph.num_dp_states()
    )?;

    for (node, usage) in graph.nodes() {
        write!(writer, "n {}", node.index())?;
        for value in usage {
            write!(writer, " {value}")?;
        }
        writeln!(writer)?;
    }

    for arc in graph.arcs() {
        write!(
            writer,
            "a {} {} ",
            arc.source.index(),
            arc.destination.index()
        )?;
        match arc.item {
            Some(item) => writeln!(writer, "{item}")?,
            None => writeln!(writer, "-")?,
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use arcflow_solver::core::build_arc_flow_graph;

    use super::write_graph;
    #[cfg(feature = "gzipped-output")]
    use super::GraphWriter;

    #[test]
    fn single_type_graph_is_written() {
        let graph = build_arc_flow_graph(&[10], &[vec![3]], &[3]).unwrap();

        let mut output = Vec::new();
        write_graph(&graph, "chain", &mut output).unwrap();

        let expected = "\
c chain
p arcflow 4 6 1 4
n 0 0
n 1 3
n 2 6
n 3 10
a 0 1 0
a 0 3 -
a 1 2 0
a 1 3 -
a 2 3 -
a 2 3 0
";
        assert_eq!(String::from_utf8(output).unwrap(), expected);
    }

    #[test]
    fn every_comment_line_is_prefixed() {
        let graph = build_arc_flow_graph(&[1], &[], &[]).unwrap();

        let mut output = Vec::new();
        write_graph(&graph, "first\nsecond", &mut output).unwrap();

        let expected = "c first\nc second\np arcflow 1 0 0 1\nn 0 1\n";
        assert_eq!(String::from_utf8(output).unwrap(), expected);
    }

    #[test]
    #[cfg(feature = "gzipped-output")]
    fn finished_gzip_output_is_complete() {
        use std::io::Read;

        let graph = build_arc_flow_graph(&[10], &[vec![3]], &[3]).unwrap();
        let mut expected = Vec::new();
        write_graph(&graph, "chain", &mut expected).unwrap();

        let path = std::env::temp_dir().join(format!(
            "arcflow-graph-file-{}.txt.gz",
            std::process::id()
        ));
        let mut writer = GraphWriter::create(&path).unwrap();
        write_graph(&graph, "chain", &mut writer).unwrap();
        writer.finish().unwrap();

        // A missing trailer makes the decoder fail with an unexpected end of file.
        let mut decompressed = Vec::new();
        let _ = flate2::read::GzDecoder::new(std::fs::File::open(&path).unwrap())
            .read_to_end(&mut decompressed)
            .unwrap();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(decompressed, expected);
    }
}
