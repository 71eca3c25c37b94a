use synopsis::application::ports::{FileLoader, FileLoaderError};
use synopsis::domain::{ExtractedText, UploadedDocument};
use synopsis::infrastructure::text_processing::{PdfAdapter, collect_page_text};

use crate::helpers::build_pdf;

#[tokio::test]
async fn given_single_page_pdf_when_extracting_then_returns_page_text() {
    let adapter = PdfAdapter::new();
    let document = UploadedDocument::new("hello.pdf", build_pdf(&[Some("Hello world.")]));

    let text = adapter.extract_text(&document).await.unwrap();

    assert!(text.as_str().contains("Hello world."));
}

#[tokio::test]
async fn given_multi_page_pdf_when_extracting_then_pages_keep_document_order() {
    let adapter = PdfAdapter::new();
    let document = UploadedDocument::new(
        "pages.pdf",
        build_pdf(&[Some("Alpha"), Some("Bravo"), Some("Charlie")]),
    );

    let text = adapter.extract_text(&document).await.unwrap();

    let alpha = text.as_str().find("Alpha").unwrap();
    let bravo = text.as_str().find("Bravo").unwrap();
    let charlie = text.as_str().find("Charlie").unwrap();
    assert!(alpha < bravo && bravo < charlie);
}

#[tokio::test]
async fn given_pdf_with_blank_page_when_extracting_then_blank_page_adds_nothing() {
    let with_blank = PdfAdapter::with_separator("|");
    let document = UploadedDocument::new(
        "gap.pdf",
        build_pdf(&[Some("First"), None, Some("Last")]),
    );

    let text = with_blank.extract_text(&document).await.unwrap();

    assert_eq!(text.as_str().matches('|').count(), 2);
    let middle = text.as_str().split('|').nth(1).unwrap();
    assert!(middle.trim().is_empty());
}

#[tokio::test]
async fn given_garbage_bytes_when_extracting_then_returns_extraction_failed() {
    let adapter = PdfAdapter::new();
    let document = UploadedDocument::new("broken.pdf", b"definitely not a pdf".to_vec());

    let result = adapter.extract_text(&document).await;

    assert!(matches!(result, Err(FileLoaderError::ExtractionFailed(_))));
}

#[tokio::test]
async fn given_non_pdf_filename_when_extracting_then_returns_unsupported_format() {
    let adapter = PdfAdapter::new();
    let document = UploadedDocument::new("hello.PDF", build_pdf(&[Some("Hello")]));

    let result = adapter.extract_text(&document).await;

    assert!(matches!(result, Err(FileLoaderError::UnsupportedFormat(_))));
}

async fn extract(pages: &[Option<&str>]) -> String {
    let document = UploadedDocument::new("doc.pdf", build_pdf(pages));
    PdfAdapter::new()
        .extract_text(&document)
        .await
        .unwrap()
        .as_str()
        .to_string()
}

#[tokio::test]
async fn given_default_adapter_when_extracting_then_pages_are_joined_without_separator() {
    let whole = extract(&[Some("Alpha"), None, Some("Bravo")]).await;

    let page_by_page = [
        extract(&[Some("Alpha")]).await,
        extract(&[None]).await,
        extract(&[Some("Bravo")]).await,
    ]
    .concat();

    assert_eq!(whole, page_by_page);
    assert_eq!(whole.split_whitespace().collect::<String>(), "AlphaBravo");
}

#[test]
fn given_pages_with_blank_middle_when_collecting_then_concatenation_is_exact() {
    let texts = ["Alpha", "", "Bravo"];

    let pages = collect_page_text(texts.len(), |i| Ok::<_, String>(texts[i].to_string())).unwrap();
    let text = ExtractedText::from_fragments(&pages, "");

    assert_eq!(pages, vec!["Alpha", "", "Bravo"]);
    assert_eq!(text.as_str(), "AlphaBravo");
}

#[test]
fn given_page_that_fails_to_parse_when_collecting_then_returns_extraction_failed() {
    let mut visited = Vec::new();

    let result = collect_page_text(3, |i| {
        visited.push(i);
        if i == 1 {
            Err("corrupt content stream")
        } else {
            Ok("text".to_string())
        }
    });

    let Err(FileLoaderError::ExtractionFailed(message)) = result else {
        panic!("expected extraction failure");
    };
    assert!(message.contains("page 1"));
    assert!(message.contains("corrupt content stream"));
    assert_eq!(visited, vec![0, 1]);
}
