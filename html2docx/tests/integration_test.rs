use html2docx::{Converter, ConverterConfig, LoggingContext};
use std::fs;
use std::io::Read;
use std::path::Path;

fn converter_with(config: ConverterConfig) -> Converter {
    Converter::new(config, LoggingContext::default())
}

/// Read `word/document.xml` out of a written package
fn document_xml(path: &Path) -> String {
    let file = fs::File::open(path).expect("document should exist");
    let mut archive = zip::ZipArchive::new(file).expect("document should be a zip package");
    let mut entry = archive
        .by_name("word/document.xml")
        .expect("package should contain word/document.xml");
    let mut xml = String::new();
    entry.read_to_string(&mut xml).unwrap();
    xml
}

#[test]
fn test_convert_writes_document_and_removes_source() {
    // Arrange
    let dir = tempfile::tempdir().unwrap();
    let source = dir.path().join("page.html");
    fs::write(
        &source,
        "<html><head><title>T</title></head><body><h1>Hi</h1><p>A <strong>B</strong> C</p></body></html>",
    )
    .unwrap();

    // Act
    let converted = Converter::default().convert(&source);

    // Assert
    assert!(converted);
    let output = dir.path().join("page.docx");
    assert!(output.is_file(), "page.docx should be written");
    assert!(!source.exists(), "source should be removed");

    let xml = document_xml(&output);
    assert!(xml.contains("Hi"));
    assert!(xml.contains("Heading1"));
    assert!(xml.contains("Title"));
}

#[test]
fn test_second_convert_of_same_path_fails() {
    let dir = tempfile::tempdir().unwrap();
    let source = dir.path().join("once.html");
    fs::write(&source, "<p>once</p>").unwrap();
    let converter = Converter::default();

    assert!(converter.convert(&source));
    assert!(!converter.convert(&source));
    assert!(dir.path().join("once.docx").is_file());
}

#[test]
fn test_missing_file_reports_failure_without_output() {
    let dir = tempfile::tempdir().unwrap();
    let source = dir.path().join("missing.html");

    assert!(!Converter::default().convert(&source));
    assert!(!dir.path().join("missing.docx").exists());
}

#[test]
fn test_plain_text_input_converts() {
    let dir = tempfile::tempdir().unwrap();
    let source = dir.path().join("plain.html");
    fs::write(&source, "just some words").unwrap();

    assert!(Converter::default().convert(&source));

    let xml = document_xml(&dir.path().join("plain.docx"));
    assert!(xml.contains("just some words"));
}

#[test]
fn test_keep_source_when_configured() {
    let dir = tempfile::tempdir().unwrap();
    let source = dir.path().join("kept.html");
    fs::write(&source, "<p>kept</p>").unwrap();
    let converter = converter_with(ConverterConfig {
        delete_source: false,
        ..ConverterConfig::default()
    });

    let report = converter.try_convert(&source).unwrap();

    assert!(source.exists());
    assert!(report.output.is_file());
    assert!(!report.source_removed);
}

#[test]
fn test_table_rows_are_truncated_to_first_row_width() {
    // Arrange
    let dir = tempfile::tempdir().unwrap();
    let source = dir.path().join("table.html");
    fs::write(
        &source,
        "<table><tr><th>H1</th><th>H2</th></tr><tr><td>a</td><td>b</td><td>overflow</td></tr></table>",
    )
    .unwrap();

    // Act
    let report = Converter::default().try_convert(&source).unwrap();

    // Assert
    assert_eq!(report.tables, 1);
    let xml = document_xml(&report.output);
    assert!(xml.contains("H2"));
    assert!(xml.contains(">b<"));
    assert!(!xml.contains("overflow"));
}

#[test]
fn test_styled_and_listed_content_converts() {
    let dir = tempfile::tempdir().unwrap();
    let source = dir.path().join("styled.html");
    fs::write(
        &source,
        r#"<body>
<p style="text-align: center; color: #ff0000">Centered <span style="color:#00FF00">red</span></p>
<ol><li>one</li><li>two</li></ol>
<ul><li>dot</li></ul>
</body>"#,
    )
    .unwrap();

    let report = Converter::default().try_convert(&source).unwrap();

    let xml = document_xml(&report.output);
    assert!(xml.contains("FF0000"));
    assert!(xml.contains("center"));
    assert!(xml.contains("numPr"));
    assert!(xml.contains("two"));
}

#[test]
fn test_convert_many_files_concurrently() {
    let dir = tempfile::tempdir().unwrap();
    let sources: Vec<_> = (0..8)
        .map(|i| {
            let path = dir.path().join(format!("doc{i}.html"));
            fs::write(&path, format!("<h2>Doc {i}</h2><p>body {i}</p>")).unwrap();
            path
        })
        .collect();
    let converter = Converter::default();

    let results: Vec<bool> = std::thread::scope(|scope| {
        let handles: Vec<_> = sources
            .iter()
            .map(|path| {
                let converter = &converter;
                scope.spawn(move || converter.convert(path))
            })
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    assert!(results.iter().all(|ok| *ok));
    for i in 0..8 {
        assert!(dir.path().join(format!("doc{i}.docx")).is_file());
        assert!(!dir.path().join(format!("doc{i}.html")).exists());
    }
}

#[test]
fn test_config_file_controls_conversion() {
    let dir = tempfile::tempdir().unwrap();
    let config_path = dir.path().join("html2docx.toml");
    fs::write(&config_path, "delete_source = false\nmargin_inches = 1.0\n").unwrap();
    let config = ConverterConfig::load(&config_path).unwrap();
    let source = dir.path().join("configured.html");
    fs::write(&source, "<p>x</p>").unwrap();

    assert!(converter_with(config).convert(&source));

    assert!(source.exists());
    let xml = document_xml(&dir.path().join("configured.docx"));
    assert!(xml.contains("w:pgMar"));
}

#[test]
fn test_oversized_line_height_still_converts() {
    // Arrange
    let dir = tempfile::tempdir().unwrap();
    let source = dir.path().join("tall.html");
    fs::write(&source, r#"<p style="line-height: 300000000px">x</p>"#).unwrap();

    // Act
    let converted = Converter::default().convert(&source);

    // Assert
    assert!(converted);
    let xml = document_xml(&dir.path().join("tall.docx"));
    assert!(xml.contains(">x<"));
}

#[test]
fn test_stylesheet_rules_are_not_applied() {
    let dir = tempfile::tempdir().unwrap();
    let source = dir.path().join("sheet.html");
    fs::write(
        &source,
        "<html><head><style>p { color: #FF0000; font-weight: bold }</style></head><body><p>x</p></body></html>",
    )
    .unwrap();

    let report = Converter::default().try_convert(&source).unwrap();

    assert_eq!(report.stylesheet_rules, 1);
    let xml = document_xml(&report.output);
    assert!(!xml.contains("FF0000"));
}
