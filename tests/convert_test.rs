//! End-to-end tests: generated PDF in, Markdown file out.

use std::fs;
use std::path::Path;

use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, Stream};

use pdf2md::{
    file_to_markdown, ConvertOptions, Converter, Error, ExtractOptions, OutputFormat,
    PageSelection, PdfExtractor,
};

/// A line of text: font size, x, y, text.
type Line = (i64, i64, i64, &'static str);

fn write_pdf(path: &Path, pages: &[Vec<Line>]) {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();
    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
        "Encoding" => "WinAnsiEncoding",
    });

    let mut kids: Vec<Object> = Vec::new();
    for lines in pages {
        let mut operations = Vec::new();
        for &(size, x, y, text) in lines {
            operations.push(Operation::new("BT", vec![]));
            operations.push(Operation::new("Tf", vec!["F1".into(), size.into()]));
            operations.push(Operation::new("Td", vec![x.into(), y.into()]));
            operations.push(Operation::new("Tj", vec![Object::string_literal(text)]));
            operations.push(Operation::new("ET", vec![]));
        }
        let content = Content { operations };
        let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode().unwrap()));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
            "Resources" => dictionary! {
                "Font" => dictionary! { "F1" => font_id },
            },
            "MediaBox" => vec![0.into(), 0.into(), 612.into(), 792.into()],
        });
        kids.push(page_id.into());
    }

    let count = kids.len() as i64;
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => count,
        }),
    );
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);
    doc.save(path).unwrap();
}

fn report_pages() -> Vec<Vec<Line>> {
    vec![
        vec![
            (24, 72, 760, "Annual Report"),
            (12, 72, 720, "This report summarizes the year."),
            (12, 72, 706, "- Revenue grew"),
            (12, 72, 692, "- Costs fell"),
            (12, 84, 678, "- Europe"),
            (12, 72, 640, "Outlook remains positive."),
        ],
        vec![
            (18, 72, 760, "Details"),
            (12, 72, 730, "Second page body text."),
        ],
    ]
}

#[test]
fn test_convert_report() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("report.pdf");
    let output = dir.path().join("report.md");
    write_pdf(&input, &report_pages());

    let summary = Converter::new(&input, &output).convert().unwrap();

    assert_eq!(
        fs::read_to_string(&output).unwrap(),
        "# Annual Report\n\n\
         This report summarizes the year.\n\n\
         - Revenue grew\n\
         - Costs fell\n  \
         - Europe\n\n\
         Outlook remains positive.\n\n\
         ## Details\n\n\
         Second page body text.\n"
    );
    assert_eq!(summary.output_path, output);
    assert_eq!(summary.pages_converted, 2);
    assert_eq!(summary.stats.page_count, 2);
    assert_eq!(summary.stats.heading_count, 2);
    assert_eq!(summary.stats.list_item_count, 3);
    assert_eq!(summary.stats.paragraph_count, 3);
    assert!(!summary.is_empty());
}

#[test]
fn test_extractor_fragments() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("report.pdf");
    write_pdf(&input, &report_pages());

    let extractor = PdfExtractor::open(&input).unwrap();
    assert_eq!(extractor.page_count(), 2);

    let extraction = extractor.extract().unwrap();
    let fragments = &extraction.fragments;
    assert_eq!(extraction.page_count, 2);
    assert_eq!(fragments[0].text, "Annual Report");
    assert_eq!(fragments[0].font_size, 24.0);
    assert_eq!(fragments[0].page, 1);
    assert!(fragments[1].text.contains("- Costs fell\n  - Europe"));

    let orders: Vec<u64> = fragments.iter().map(|f| f.order).collect();
    let expected: Vec<u64> = (0..fragments.len() as u64).collect();
    assert_eq!(orders, expected);
    assert_eq!(fragments.last().map(|f| f.page), Some(2));
}

#[test]
fn test_page_selection() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("report.pdf");
    let output = dir.path().join("page2.md");
    write_pdf(&input, &report_pages());

    let options = ConvertOptions::new()
        .with_extract_options(ExtractOptions::new().with_pages(PageSelection::parse("2").unwrap()));
    let summary = Converter::new(&input, &output)
        .with_options(options)
        .convert()
        .unwrap();

    assert_eq!(summary.pages_converted, 1);
    assert_eq!(
        fs::read_to_string(&output).unwrap(),
        "# Details\n\nSecond page body text.\n"
    );
}

#[test]
fn test_page_out_of_range() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("report.pdf");
    write_pdf(&input, &report_pages());

    let options = ConvertOptions::new()
        .with_extract_options(ExtractOptions::new().with_pages(PageSelection::Range(1..=5)));
    let err = Converter::new(&input, dir.path().join("out.md"))
        .with_options(options)
        .convert()
        .unwrap_err();
    assert!(matches!(err, Error::PageOutOfRange(5, 2)));
    assert_eq!(err.exit_code(), 5);
}

#[test]
fn test_json_output() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("report.pdf");
    let output = dir.path().join("report.json");
    write_pdf(&input, &report_pages());

    Converter::new(&input, &output)
        .with_options(ConvertOptions::new().with_format(OutputFormat::Json))
        .convert()
        .unwrap();

    let json: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&output).unwrap()).unwrap();
    let blocks = json.as_array().unwrap();
    assert_eq!(blocks[0]["type"], "heading");
    assert_eq!(blocks[0]["text"], "Annual Report");
    assert_eq!(blocks[2]["type"], "list_item");
}

#[test]
fn test_no_text_writes_empty_file() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("blank.pdf");
    let output = dir.path().join("blank.md");
    write_pdf(&input, &[vec![]]);

    let summary = Converter::new(&input, &output).convert().unwrap();
    assert!(summary.is_empty());
    assert_eq!(summary.stats.fragment_count, 0);
    assert_eq!(fs::read_to_string(&output).unwrap(), "");
}

#[test]
fn test_existing_output_requires_force() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("report.pdf");
    let output = dir.path().join("report.md");
    write_pdf(&input, &report_pages());
    fs::write(&output, "old").unwrap();

    let err = Converter::new(&input, &output).convert().unwrap_err();
    assert!(matches!(err, Error::OutputExists(_)));
    assert_eq!(fs::read_to_string(&output).unwrap(), "old");

    Converter::new(&input, &output)
        .with_options(ConvertOptions::new().with_force(true))
        .convert()
        .unwrap();
    assert!(fs::read_to_string(&output).unwrap().starts_with("# Annual Report"));
}

#[test]
fn test_invalid_inputs() {
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("out.md");

    let missing = Converter::new(dir.path().join("missing.pdf"), &output)
        .convert()
        .unwrap_err();
    assert_eq!(missing.exit_code(), 1);

    let html = dir.path().join("page.pdf");
    fs::write(&html, "<html><body>hi</body></html>").unwrap();
    let err = Converter::new(&html, &output).convert().unwrap_err();
    assert!(matches!(err, Error::UnknownFormat));
    assert_eq!(err.exit_code(), 2);

    let truncated = dir.path().join("truncated.pdf");
    fs::write(&truncated, "%PDF-1.7\n1 0 obj\n<<").unwrap();
    let err = Converter::new(&truncated, &output).convert().unwrap_err();
    assert_eq!(err.exit_code(), 2);
    assert!(!output.exists());
}

#[test]
fn test_file_to_markdown() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("report.pdf");
    write_pdf(&input, &report_pages());

    let markdown = file_to_markdown(&input).unwrap();
    assert!(markdown.starts_with("# Annual Report\n\n"));
    assert!(markdown.ends_with("Second page body text.\n"));
}
