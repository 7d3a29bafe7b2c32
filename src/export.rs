//! Flat exports of analysis results.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use chrono::Local;
use clap::ValueEnum;
use log::info;
use serde::{Deserialize, Serialize};

use crate::cooccurrence::AdjacencyGraph;
use crate::error::Result;
use crate::frequency::FrequencyTable;
use crate::matrix::CountMatrix;
use crate::pos::PosVocabulary;
use crate::relations::{RelationIndex, RelationKind};
use crate::CorpusAnalysis;

/// Output format for exported tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    Txt,
    Csv,
    Tsv,
    Json,
}

impl ExportFormat {
    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::Txt => "txt",
            ExportFormat::Csv => "csv",
            ExportFormat::Tsv => "tsv",
            ExportFormat::Json => "json",
        }
    }

    fn delimiter(self) -> u8 {
        match self {
            ExportFormat::Tsv => b'\t',
            _ => b',',
        }
    }
}

fn delimited<W: Write>(writer: W, format: ExportFormat) -> csv::Writer<W> {
    csv::WriterBuilder::new()
        .delimiter(format.delimiter())
        .has_headers(false)
        .from_writer(writer)
}

/// Writes the rank-frequency table, header first, one row per word in rank order.
/// Columns: `word, rank, frequency, rank*frequency`.
pub fn write_frequency_table<W: Write>(
    mut writer: W,
    table: &FrequencyTable,
    format: ExportFormat,
) -> Result<()> {
    match format {
        ExportFormat::Csv | ExportFormat::Tsv => {
            let mut out = delimited(writer, format);
            out.write_record(["word", "rank", "frequency", "rank*frequency"])?;
            for entry in table {
                out.serialize(entry)?;
            }
            out.flush()?;
        }
        ExportFormat::Json => {
            serde_json::to_writer_pretty(&mut writer, table)?;
            writeln!(writer)?;
        }
        ExportFormat::Txt => {
            writeln!(
                writer,
                "{:<24} {:>8} {:>10} {:>14}",
                "word", "rank", "frequency", "rank*frequency"
            )?;
            for e in table {
                writeln!(
                    writer,
                    "{:<24} {:>8} {:>10} {:>14}",
                    e.word, e.rank, e.frequency, e.rank_times_freq
                )?;
            }
        }
    }
    Ok(())
}

/// Writes graph edges as `source, target, weight` rows.
pub fn write_graph<W: Write>(
    mut writer: W,
    graph: &AdjacencyGraph,
    format: ExportFormat,
) -> Result<()> {
    match format {
        ExportFormat::Csv | ExportFormat::Tsv => {
            let mut out = delimited(writer, format);
            out.write_record(["source", "target", "weight"])?;
            for edge in graph.edges() {
                out.serialize(edge)?;
            }
            out.flush()?;
        }
        ExportFormat::Json => {
            serde_json::to_writer_pretty(&mut writer, graph)?;
            writeln!(writer)?;
        }
        ExportFormat::Txt => {
            for edge in graph.edges() {
                writeln!(writer, "{} -- {} [{}]", edge.source, edge.target, edge.weight)?;
            }
        }
    }
    Ok(())
}

/// Writes a count matrix: a header row of column words, then one row per row word.
pub fn write_matrix<W: Write>(
    mut writer: W,
    matrix: &CountMatrix,
    format: ExportFormat,
) -> Result<()> {
    match format {
        ExportFormat::Csv | ExportFormat::Tsv => {
            let mut out = delimited(writer, format);
            let mut header = vec![String::new()];
            header.extend(matrix.cols().iter().cloned());
            out.write_record(&header)?;
            for (word, row) in matrix.rows().iter().zip(matrix.counts().rows()) {
                let mut record = vec![word.clone()];
                record.extend(row.iter().map(|c| c.to_string()));
                out.write_record(&record)?;
            }
            out.flush()?;
        }
        ExportFormat::Json => {
            serde_json::to_writer_pretty(&mut writer, matrix)?;
            writeln!(writer)?;
        }
        ExportFormat::Txt => {
            write!(writer, "{:<16}", "")?;
            for col in matrix.cols() {
                write!(writer, " {col:>12}")?;
            }
            writeln!(writer)?;
            for (word, row) in matrix.rows().iter().zip(matrix.counts().rows()) {
                write!(writer, "{word:<16}")?;
                for count in row {
                    write!(writer, " {count:>12}")?;
                }
                writeln!(writer)?;
            }
        }
    }
    Ok(())
}

/// Lists, for each source word in vocabulary order, its partners by descending count.
/// Source words without partners are left out.
pub fn write_relation_listing<W: Write>(
    mut writer: W,
    index: &RelationIndex,
    sources: &[String],
    kind: RelationKind,
) -> Result<()> {
    writeln!(writer, "{}", "=".repeat(80))?;
    writeln!(writer, "RELATIONS: {}", kind.label().to_uppercase())?;
    writeln!(writer, "{}", "=".repeat(80))?;
    writeln!(writer)?;
    for source in sources {
        let targets = index.ranked_targets(source);
        if targets.is_empty() {
            continue;
        }
        writeln!(writer)?;
        writeln!(writer, "{}:", source.to_uppercase())?;
        writeln!(writer, "{}", "-".repeat(60))?;
        for (target, count) in targets {
            writeln!(writer, "  {target:<20} [{count:>3} occurrences]")?;
        }
    }
    Ok(())
}

/// `{"nouns": [...], "adjectives": [...], "verbs": [...]}`.
pub fn write_vocabulary<W: Write>(mut writer: W, vocabulary: &PosVocabulary) -> Result<()> {
    serde_json::to_writer_pretty(&mut writer, vocabulary)?;
    writeln!(writer)?;
    Ok(())
}

fn create(dir: &Path, name: String) -> Result<(PathBuf, BufWriter<File>)> {
    let path = dir.join(name);
    let file = File::create(&path)?;
    Ok((path, BufWriter::new(file)))
}

/// Writes every table of `analysis` into `out_dir` as `<stem>_<timestamp>_<table>.<ext>`.
/// Returns the written paths.
pub fn export_analysis(
    analysis: &CorpusAnalysis,
    out_dir: &Path,
    stem: &str,
    format: ExportFormat,
) -> Result<Vec<PathBuf>> {
    std::fs::create_dir_all(out_dir)?;
    let stamp = Local::now().format("%Y%m%d_%H%M%S").to_string();
    let ext = format.extension();
    let mut written = Vec::new();

    let (path, mut w) = create(out_dir, format!("{stem}_{stamp}_wordfreq.{ext}"))?;
    write_frequency_table(&mut w, &analysis.table, format)?;
    w.flush()?;
    written.push(path);

    let (path, mut w) = create(out_dir, format!("{stem}_{stamp}_coverage.{ext}"))?;
    write_frequency_table(&mut w, &analysis.coverage.prefix, format)?;
    w.flush()?;
    written.push(path);

    let (path, mut w) = create(out_dir, format!("{stem}_{stamp}_graph.{ext}"))?;
    write_graph(&mut w, &analysis.graph, format)?;
    w.flush()?;
    written.push(path);

    if let Some(pos) = &analysis.pos {
        let (path, mut w) = create(out_dir, format!("{stem}_{stamp}_vocabulary.json"))?;
        write_vocabulary(&mut w, &pos.vocabulary)?;
        w.flush()?;
        written.push(path);

        for kind in [RelationKind::AdjectiveNoun, RelationKind::VerbNoun] {
            let tag = kind.label().replace('-', "_");

            let (path, mut w) = create(out_dir, format!("{stem}_{stamp}_{tag}_matrix.{ext}"))?;
            write_matrix(&mut w, pos.matrix(kind), format)?;
            w.flush()?;
            written.push(path);

            let sources = pos.vocabulary.get(kind.source_class());
            let (path, mut w) = if format == ExportFormat::Json {
                let (path, mut w) = create(out_dir, format!("{stem}_{stamp}_{tag}_links.json"))?;
                serde_json::to_writer_pretty(&mut w, pos.relation(kind))?;
                (path, w)
            } else {
                let (path, mut w) = create(out_dir, format!("{stem}_{stamp}_{tag}_links.txt"))?;
                write_relation_listing(&mut w, pos.relation(kind), sources, kind)?;
                (path, w)
            };
            w.flush()?;
            written.push(path);
        }
    }

    info!("Exported {} file(s) to {}", written.len(), out_dir.display());
    Ok(written)
}

/// Renders the human-readable report printed by the CLI.
pub fn render_summary(analysis: &CorpusAnalysis, show: usize) -> Result<String> {
    let mut out = String::new();
    let rule = "=".repeat(70);

    out.push_str(&format!(
        "Tokens: {}{}\nDistinct words: {}\n",
        analysis.token_count,
        if analysis.truncated { " (capped)" } else { "" },
        analysis.table.len()
    ));

    out.push_str(&format!("\nFrequency table (top {show}):\n{rule}\n"));
    let mut buf = Vec::new();
    write_frequency_table(&mut buf, &analysis.table.prefix(show), ExportFormat::Txt)?;
    out.push_str(&String::from_utf8_lossy(&buf));
    out.push_str(&format!("{rule}\n"));

    let c = &analysis.coverage;
    out.push_str(&format!(
        "\n{:.0}% of occurrences covered by the {} most frequent words (of {} distinct, {:.2}%)\n",
        c.target_fraction * 100.0,
        c.cutoff_rank,
        c.distinct_words,
        c.vocabulary_share()
    ));

    out.push_str(&format!(
        "\nAdjacency graph: {} nodes, {} edges\n",
        analysis.graph.node_count(),
        analysis.graph.edge_count()
    ));

    if let Some(pos) = &analysis.pos {
        let v = &pos.vocabulary;
        out.push_str(&format!(
            "\nTop nouns: {}\nTop adjectives: {}\nTop verbs: {}\n",
            v.nouns.iter().take(show).cloned().collect::<Vec<_>>().join(", "),
            v.adjectives.iter().take(show).cloned().collect::<Vec<_>>().join(", "),
            v.verbs.iter().take(show).cloned().collect::<Vec<_>>().join(", "),
        ));
        for kind in [RelationKind::AdjectiveNoun, RelationKind::VerbNoun] {
            let index = pos.relation(kind);
            out.push_str(&format!(
                "{} links: {} distinct, {} occurrences\n",
                kind.label(),
                index.link_count(),
                index.total()
            ));
        }
    }
    Ok(out)
}
