use press_impose::*;

fn sequence(pages: usize, covers: bool) -> PageSequence {
    let mut store = MemoryStore::new();
    store.insert_uniform("body", pages, Dimensions::inches(5.5, 8.5));
    store.insert_uniform("cover", 2, Dimensions::inches(5.5, 8.5));

    let request = AssemblyRequest {
        cover_front: covers.then(|| SourceRange::page("cover", 0)),
        interior: Some(SourceRange::whole("body")),
        spine: None,
        cover_back: covers.then(|| SourceRange::page("cover", 1)),
    };
    assemble(&request, &store).unwrap()
}

#[test]
fn test_booklet_statistics() {
    let seq = sequence(6, true);
    let spec = validate(&PrintSpecification::default(), &seq).unwrap();

    let stats = calculate_statistics(&seq, &spec).unwrap();

    assert_eq!(stats.sequence_pages, 8);
    assert_eq!(stats.interior_pages, 6);
    // Cover sheet plus two signature sheets
    assert_eq!(stats.output_sheets, 3);
    // Inside of the cover is never printed
    assert_eq!(stats.output_sides, 5);
    assert_eq!(stats.blank_pages_added, 2);
    assert_eq!(stats.slots_per_side, 2);
}

#[test]
fn test_stack_statistics() {
    let seq = sequence(5, false);
    let spec = PrintSpecification {
        dimensions: Dimensions::inches(5.5, 4.25),
        sheet: Some(Dimensions::inches(11.0, 8.5)),
        binding: Binding::LooseSheets,
        reading_direction: None,
        imposition_type: ImpositionType::Stack,
        ..Default::default()
    };
    let spec = validate(&spec, &seq).unwrap();

    let stats = calculate_statistics(&seq, &spec).unwrap();

    assert_eq!(stats.output_sheets, 2);
    assert_eq!(stats.output_sides, 2);
    assert_eq!(stats.blank_pages_added, 0);
    assert_eq!(stats.slots_per_side, 4);
}

#[test]
fn test_statistics_match_layout() {
    for pages in 1..=16 {
        let seq = sequence(pages, false);
        let spec = validate(&PrintSpecification::default(), &seq).unwrap();

        let layout = plan(&seq, &spec).unwrap();
        let stats = calculate_statistics(&seq, &spec).unwrap();

        assert_eq!(stats, layout_statistics(&seq, &layout));
        assert_eq!(stats.output_sheets * 4, pages + stats.blank_pages_added);
    }
}

#[test]
fn test_statistics_empty_sequence() {
    let mut seq = PageSequence::new();
    seq.insert_blank(0);
    let spec = validate(&PrintSpecification::default(), &seq).unwrap();

    assert!(matches!(
        calculate_statistics(&seq, &spec),
        Err(ImposeError::EmptySequence)
    ));
}
