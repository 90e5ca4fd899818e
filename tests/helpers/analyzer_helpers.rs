//! Helpers for setting up analyzers and parsed files.

use protols::hir::{Analyzer, AnalyzerConfig, SymbolInfo};
use protols::parser::{ProtoFile, parse};

pub const TEST_URI: &str = "file:///ws/test.proto";

/// Parse a single source under [`TEST_URI`].
pub fn parse_source(source: &str) -> ProtoFile {
    parse(source, TEST_URI)
}

/// Creates an Analyzer with a single file at [`TEST_URI`].
pub fn analyzer_from_source(source: &str) -> Analyzer {
    analyzer_from_sources(&[(TEST_URI, source)])
}

/// Creates an Analyzer with multiple files, indexed in order.
pub fn analyzer_from_sources(files: &[(&str, &str)]) -> Analyzer {
    analyzer_with_config(AnalyzerConfig::default(), files)
}

/// Creates an Analyzer with a custom configuration.
pub fn analyzer_with_config(config: AnalyzerConfig, files: &[(&str, &str)]) -> Analyzer {
    let mut analyzer = Analyzer::new(config);
    for (uri, content) in files {
        analyzer.set_file_content(uri, content);
    }
    analyzer
}

/// Full names of every symbol a document declares, in declaration order.
pub fn full_names_in(analyzer: &Analyzer, uri: &str) -> Vec<String> {
    analyzer
        .document_symbols(uri)
        .into_iter()
        .map(|s| s.full_name.clone())
        .collect()
}

/// Snapshot of the index for comparing two states.
pub fn index_snapshot(analyzer: &Analyzer, uri: &str) -> (Vec<SymbolInfo>, usize, usize) {
    let symbols = analyzer.document_symbols(uri).into_iter().cloned().collect();
    let index = analyzer.symbol_index();
    (symbols, index.symbol_count(), index.reference_count())
}
