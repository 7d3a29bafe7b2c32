use std::fs::File;
use std::io::Write;
use std::path::Path;

use tempfile::tempdir;

use corpus_analysis::{AnalysisOptions, analyze_path, collect_files, load_corpus};

/// Minimal single-page PDF with correct xref offsets showing `text`.
fn write_minimal_pdf(target: &Path, text: &str) {
    fn esc_parens(s: &str) -> String {
        s.replace('(', r"\(").replace(')', r"\)")
    }
    let content = format!("BT\n/F1 12 Tf\n10 100 Td\n({}) Tj\nET\n", esc_parens(text));

    let mut pdf: Vec<u8> = Vec::new();
    let mut offsets = [0usize; 6];

    pdf.extend_from_slice(b"%PDF-1.4\n");

    offsets[1] = pdf.len();
    pdf.extend_from_slice(b"1 0 obj\n<< /Type /Catalog /Pages 2 0 R >>\nendobj\n");

    offsets[2] = pdf.len();
    pdf.extend_from_slice(b"2 0 obj\n<< /Type /Pages /Kids [3 0 R] /Count 1 >>\nendobj\n");

    offsets[3] = pdf.len();
    pdf.extend_from_slice(b"3 0 obj\n<< /Type /Page /Parent 2 0 R /MediaBox [0 0 200 200] /Contents 4 0 R /Resources << /Font << /F1 5 0 R >> >> >>\nendobj\n");

    offsets[4] = pdf.len();
    pdf.extend_from_slice(format!("4 0 obj\n<< /Length {} >>\nstream\n", content.len()).as_bytes());
    pdf.extend_from_slice(content.as_bytes());
    pdf.extend_from_slice(b"endstream\nendobj\n");

    offsets[5] = pdf.len();
    pdf.extend_from_slice(
        b"5 0 obj\n<< /Type /Font /Subtype /Type1 /BaseFont /Helvetica >>\nendobj\n",
    );

    let xref_pos = pdf.len();
    let mut xref = String::from("xref\n0 6\n0000000000 65535 f \n");
    for offset in &offsets[1..] {
        xref.push_str(&format!("{:010} 00000 n \n", offset));
    }
    pdf.extend_from_slice(xref.as_bytes());
    pdf.extend_from_slice(
        format!("trailer << /Size 6 /Root 1 0 R >>\nstartxref\n{}\n%%EOF\n", xref_pos).as_bytes(),
    );

    let mut f = File::create(target).expect("create pdf file");
    f.write_all(&pdf).expect("write pdf");
}

#[test]
fn pdf_corpus_is_extracted() {
    let dir = tempdir().expect("create tempdir");
    let path = dir.path().join("doc.pdf");
    write_minimal_pdf(&path, "Banana apple banana grape");

    let text = load_corpus(&path).expect("extract text from pdf");
    assert!(text.to_lowercase().contains("banana"));

    let analysis = analyze_path(&path, &AnalysisOptions::default(), None).expect("analysis runs");
    assert_eq!(analysis.table.get("banana").map(|e| e.frequency), Some(2));
}

#[test]
fn directory_mixes_txt_and_pdf() {
    let dir = tempdir().expect("create tempdir");
    std::fs::write(dir.path().join("a.txt"), "apple apple").unwrap();
    write_minimal_pdf(&dir.path().join("b.pdf"), "apple banana");
    std::fs::write(dir.path().join("c.csv"), "not,a,corpus").unwrap();

    let files = collect_files(dir.path());
    let names: Vec<String> = files
        .iter()
        .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
        .collect();
    assert_eq!(names, vec!["a.txt", "b.pdf"]);

    let analysis = analyze_path(dir.path(), &AnalysisOptions::default(), None).unwrap();
    assert_eq!(analysis.table.get("apple").map(|e| e.frequency), Some(3));
}
