use lopdf::{Dictionary, Document, Object, Stream};
use press_impose::*;
use std::path::{Path, PathBuf};

fn create_test_pdf(num_pages: usize, width: i64, height: i64) -> Document {
    let mut doc = Document::with_version("1.7");

    // Create page tree root ID
    let pages_id = doc.new_object_id();

    let mut kids = Vec::new();
    for _ in 0..num_pages {
        let content_id = doc.add_object(Stream::new(Dictionary::new(), b"q Q".to_vec()));

        let page_id = doc.add_object(Dictionary::from_iter(vec![
            ("Type", Object::Name(b"Page".to_vec())),
            ("Parent", Object::Reference(pages_id)),
            ("Resources", Object::Dictionary(Dictionary::new())),
            ("Contents", Object::Reference(content_id)),
        ]));
        kids.push(Object::Reference(page_id));
    }

    // MediaBox on the page tree root, inherited by every page
    let pages_dict = Dictionary::from_iter(vec![
        ("Type", Object::Name(b"Pages".to_vec())),
        ("Kids", Object::Array(kids)),
        ("Count", Object::Integer(num_pages as i64)),
        (
            "MediaBox",
            Object::Array(vec![
                Object::Integer(0),
                Object::Integer(0),
                Object::Integer(width),
                Object::Integer(height),
            ]),
        ),
    ]);
    doc.objects.insert(pages_id, Object::Dictionary(pages_dict));

    let catalog_id = doc.add_object(Dictionary::from_iter(vec![
        ("Type", Object::Name(b"Catalog".to_vec())),
        ("Pages", Object::Reference(pages_id)),
    ]));
    doc.trailer.set("Root", catalog_id);

    doc
}

fn write_pdf(dir: &Path, name: &str, mut doc: Document) -> PathBuf {
    let path = dir.join(name);
    let mut writer = Vec::new();
    doc.save_to(&mut writer).unwrap();
    std::fs::write(&path, writer).unwrap();
    path
}

fn project(body: PathBuf, cover: PathBuf) -> ProjectFile {
    ProjectFile {
        documents: vec![
            DocumentSource {
                id: DocumentId::new("body"),
                path: body,
            },
            DocumentSource {
                id: DocumentId::new("cover"),
                path: cover,
            },
        ],
        assembly: AssemblyRequest {
            cover_front: Some(SourceRange::page("cover", 0)),
            interior: Some(SourceRange::whole("body")),
            spine: None,
            cover_back: Some(SourceRange::page("cover", 1)),
        },
        specification: PrintSpecification::default(),
    }
}

#[tokio::test]
async fn test_load_pdf() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_pdf(dir.path(), "five.pdf", create_test_pdf(5, 396, 612));

    let loaded = load_pdf(&path).await.unwrap();
    assert_eq!(loaded.get_pages().len(), 5);
}

#[tokio::test]
async fn test_pdf_store_inherited_media_box() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_pdf(dir.path(), "wide.pdf", create_test_pdf(2, 792, 612));

    let mut store = PdfStore::new();
    let id = DocumentId::new("wide");
    let pages = store.load(id.clone(), &path).await.unwrap();

    assert_eq!(pages, 2);
    assert_eq!(
        store.page_dimensions(&id, 1).unwrap(),
        Dimensions::points(792.0, 612.0)
    );
}

#[tokio::test]
async fn test_load_missing_file() {
    let mut store = PdfStore::new();
    let result = store.load(DocumentId::new("x"), "/nonexistent/file.pdf").await;
    assert!(matches!(result, Err(ImposeError::Io(_))));
}

#[cfg(feature = "serde")]
#[tokio::test]
async fn test_project_save_and_load() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("book.json");

    let mut original = project(PathBuf::from("body.pdf"), PathBuf::from("cover.pdf"));
    original.specification.creep = Some(Length::new(0.5, Units::Millimeters));
    original.save(&path).await.unwrap();

    let loaded = ProjectFile::load(&path).await.unwrap();

    // Relative document paths resolve against the project directory
    assert_eq!(loaded.documents[0].path, dir.path().join("body.pdf"));
    assert_eq!(loaded.assembly, original.assembly);
    assert_eq!(loaded.specification, original.specification);
}

#[cfg(feature = "serde")]
#[tokio::test]
async fn test_project_parse_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("broken.json");
    tokio::fs::write(&path, b"{ not json").await.unwrap();

    match ProjectFile::load(&path).await {
        Err(ImposeError::Config(msg)) => assert!(msg.contains("Failed to parse project")),
        other => panic!("Expected Config error, got {:?}", other),
    }
}

#[cfg(feature = "serde")]
#[tokio::test]
async fn test_project_minimal_json_uses_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("minimal.json");
    let json = r#"{
        "documents": [{ "id": "body", "path": "body.pdf" }],
        "assembly": { "interior": { "document": "body" } },
        "specification": { "readingDirection": "rtl" }
    }"#;
    tokio::fs::write(&path, json).await.unwrap();

    let loaded = ProjectFile::load(&path).await.unwrap();
    assert!(loaded.validate().is_ok());
    assert_eq!(
        loaded.assembly.interior,
        Some(SourceRange::whole("body"))
    );
    assert_eq!(
        loaded.specification.reading_direction,
        Some(ReadingDirection::Rtl)
    );
    assert_eq!(loaded.specification.imposition_type, ImpositionType::Booklet);
}

#[tokio::test]
async fn test_project_end_to_end() {
    let dir = tempfile::tempdir().unwrap();
    let body = write_pdf(dir.path(), "body.pdf", create_test_pdf(6, 396, 612));
    let cover = write_pdf(dir.path(), "cover.pdf", create_test_pdf(2, 396, 612));
    let project = project(body, cover);

    let store = project.load_store().await.unwrap();
    let sequence = assemble(&project.assembly, &store).unwrap();
    assert_eq!(sequence.len(), 8);

    let spec = validate(&project.specification, &sequence).unwrap();
    let job = ExportJob::plan(&sequence, spec).unwrap();

    // Cover sheet plus two signatures for 6 pages padded to 8
    assert_eq!(job.layout.sheets.len(), 3);
    assert_eq!(job.layout.padding_added, 2);
}
