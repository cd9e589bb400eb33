use lopdf::Object;
use rand::{distributions::Alphanumeric, Rng as _};
use std::path::PathBuf;

use barcode_sheet::{
    barcode::{BarcodeSymbology as _, Code128},
    font::StandardFont,
    generator::{self, GenerationSummary},
    layout::{self, PageLayout},
    request::GenerationRequest,
    translations::Language,
};

/// A string drawn on the page together with the position of its baseline.
#[derive(Debug, Clone, PartialEq)]
struct DrawnText {
    text: String,
    x: f32,
    y: f32,
}

/// What ended up on the single page of a rendered document.
struct RenderedPage {
    media_box: Vec<f32>,
    texts: Vec<DrawnText>,
    /// Rectangles grouped by fill operation, one group per barcode.
    barcodes: Vec<Vec<[f32; 4]>>,
}

fn number(object: &Object) -> f32 {
    match object {
        Object::Integer(integer) => *integer as f32,
        Object::Real(real) => *real as f32,
        other => panic!("{:?} is not a number", other),
    }
}

fn inspect(bytes: &[u8]) -> RenderedPage {
    let document = lopdf::Document::load_mem(bytes).unwrap();
    let pages = document.get_pages();
    assert_eq!(pages.len(), 1, "the document must have exactly one page");
    let page_id = *pages.get(&1).unwrap();

    let page = document.get_object(page_id).unwrap().as_dict().unwrap();
    let media_box = page
        .get(b"MediaBox")
        .unwrap()
        .as_array()
        .unwrap()
        .iter()
        .map(number)
        .collect();

    let content = document.get_page_content(page_id).unwrap();
    let operations = lopdf::content::Content::decode(&content).unwrap().operations;

    let mut texts = Vec::new();
    let mut barcodes = Vec::new();
    let mut position = [0.0, 0.0];
    let mut rectangles = Vec::new();
    for operation in operations {
        match operation.operator.as_str() {
            "Td" => position = [number(&operation.operands[0]), number(&operation.operands[1])],
            "Tj" => texts.push(DrawnText {
                text: String::from_utf8(operation.operands[0].as_str().unwrap().to_vec()).unwrap(),
                x: position[0],
                y: position[1],
            }),
            "re" => rectangles.push([
                number(&operation.operands[0]),
                number(&operation.operands[1]),
                number(&operation.operands[2]),
                number(&operation.operands[3]),
            ]),
            "f" => barcodes.push(std::mem::take(&mut rectangles)),
            _ => (),
        }
    }

    RenderedPage {
        media_box,
        texts,
        barcodes,
    }
}

fn render(request: &GenerationRequest) -> RenderedPage {
    let bytes = generator::render_document(request, &Code128)
        .unwrap()
        .save_to_bytes()
        .unwrap();
    inspect(&bytes)
}

fn temporary_path(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("barcode_sheet_{}_{}.pdf", name, std::process::id()))
}

fn assert_close(actual: f32, expected: f32) {
    assert!(
        (actual - expected).abs() < 1e-2,
        "{} is not close to {}",
        actual,
        expected
    );
}

#[test]
fn prefixed_values_are_drawn_bottom_to_top() {
    let request = GenerationRequest {
        start: 1,
        end: 3,
        zeros: 2,
        prefix: "AB-".into(),
        suffix: "-X".into(),
        ..Default::default()
    };
    let page = render(&request);

    let values = page
        .texts
        .iter()
        .map(|drawn| drawn.text.as_str())
        .collect::<Vec<_>>();
    similar_asserts::assert_eq!(values, vec!["AB-01-X", "AB-02-X", "AB-03-X"]);
    assert!(page.texts.windows(2).all(|pair| pair[0].y < pair[1].y));
    assert_eq!(page.barcodes.len(), 3);
}

#[test]
fn every_number_of_the_range_gets_a_barcode() {
    let request = GenerationRequest {
        start: 95,
        end: 120,
        ..Default::default()
    };
    let page = render(&request);
    let layout = PageLayout::for_request(&request);

    assert_eq!(page.barcodes.len(), 26);
    assert_eq!(page.texts.len(), 26);
    assert_eq!(page.media_box.len(), 4);
    assert_close(page.media_box[2], layout.page_width);
    assert_close(page.media_box[3], 26.0 * layout.item_height);
}

#[test]
fn descending_mirrors_ascending() {
    let ascending = GenerationRequest {
        start: 7,
        end: 11,
        zeros: 3,
        ..Default::default()
    };
    let descending = GenerationRequest {
        descending: true,
        ..ascending.clone()
    };

    let ascending_values = render(&ascending)
        .texts
        .into_iter()
        .map(|drawn| drawn.text)
        .collect::<Vec<_>>();
    let mut descending_values = render(&descending)
        .texts
        .into_iter()
        .map(|drawn| drawn.text)
        .collect::<Vec<_>>();

    assert_eq!(ascending_values.first(), descending_values.last());
    descending_values.reverse();
    similar_asserts::assert_eq!(ascending_values, descending_values);
}

#[test]
fn barcodes_and_values_are_centered() {
    let request = GenerationRequest {
        start: 9,
        end: 11,
        width: 8.0,
        bar_width: 0.9,
        ..Default::default()
    };
    let page = render(&request);
    let page_width = layout::centimeters_to_points(8.0);

    for bars in &page.barcodes {
        let left = bars.iter().map(|bar| bar[0]).fold(f32::INFINITY, f32::min);
        let right = bars
            .iter()
            .map(|bar| bar[0] + bar[2])
            .fold(f32::NEG_INFINITY, f32::max);
        assert_close((left + right) / 2.0, page_width / 2.0);
        assert!(bars.iter().all(|bar| (bar[3] - layout::BARCODE_HEIGHT).abs() < 1e-3));
    }

    for drawn in &page.texts {
        let width = StandardFont::Helvetica.string_width(&drawn.text, layout::TEXT_SIZE);
        assert_close(drawn.x, (page_width - width) / 2.0);
    }
}

#[test]
fn barcode_width_follows_the_bar_width() {
    let request = GenerationRequest {
        start: 42,
        end: 42,
        bar_width: 2.0,
        ..Default::default()
    };
    let page = render(&request);
    let barcode = Code128
        .render("42", layout::BARCODE_HEIGHT, 2.0)
        .unwrap();

    let bars = &page.barcodes[0];
    let left = bars[0][0];
    let last = bars[bars.len() - 1];
    assert_close(last[0] + last[2] - left, barcode.width() - 2.0 * barcode.quiet_zone());
}

#[test]
fn caption_sits_above_each_barcode() {
    let request = GenerationRequest {
        start: 1,
        end: 2,
        text: "Shelf B".into(),
        ..Default::default()
    };
    let page = render(&request);
    let items = PageLayout::for_request(&request).items(&request);

    let texts = page
        .texts
        .iter()
        .map(|drawn| drawn.text.as_str())
        .collect::<Vec<_>>();
    similar_asserts::assert_eq!(texts, vec!["Shelf B", "1", "Shelf B", "2"]);

    for (item, pair) in items.iter().zip(page.texts.chunks(2)) {
        assert_close(pair[0].y, item.y_position + layout::BARCODE_HEIGHT + layout::CAPTION_GAP);
        assert_close(pair[1].y, item.y_position - layout::VALUE_DROP);
    }
}

#[test]
fn single_number_gives_a_single_item() {
    let request = GenerationRequest {
        start: 5,
        end: 5,
        ..Default::default()
    };
    let page = render(&request);
    assert_eq!(page.barcodes.len(), 1);
    assert_eq!(page.texts[0].text, "5");
    assert_close(page.texts[0].y, layout::SPACING - layout::VALUE_DROP);
}

#[test]
fn inverted_range_writes_an_empty_degenerate_page() {
    let output_path = temporary_path("inverted");
    let request = GenerationRequest {
        output_path: output_path.clone(),
        start: 10,
        end: 5,
        ..Default::default()
    };

    let summary = generator::generate(&request).unwrap();
    assert_eq!(summary.item_count, -4);

    let page = inspect(&std::fs::read(&output_path).unwrap());
    assert!(page.barcodes.is_empty());
    assert!(page.texts.is_empty());
    assert!(page.media_box[3] < 0.0);

    std::fs::remove_file(output_path).unwrap();
}

#[test]
fn generation_is_reproducible_and_language_independent() {
    let first_path = temporary_path("first");
    let second_path = temporary_path("second");
    let request = GenerationRequest {
        output_path: first_path.clone(),
        start: 1,
        end: 12,
        text: "Lager".into(),
        zeros: 3,
        language: Language::De,
        ..Default::default()
    };
    generator::generate(&request).unwrap();
    generator::generate(&GenerationRequest {
        output_path: second_path.clone(),
        language: Language::En,
        ..request
    })
    .unwrap();

    let first = std::fs::read(&first_path).unwrap();
    let second = std::fs::read(&second_path).unwrap();
    assert!(first == second, "the two documents differ");

    std::fs::remove_file(first_path).unwrap();
    std::fs::remove_file(second_path).unwrap();
}

#[test]
fn unsupported_characters_fail_the_generation() {
    let output_path = temporary_path("unsupported");
    let request = GenerationRequest {
        output_path: output_path.clone(),
        start: 1,
        end: 2,
        prefix: "Nº".into(),
        ..Default::default()
    };

    let error = generator::generate(&request).unwrap_err();
    assert_eq!(error.kind, barcode_sheet::error::ErrorKind::Encoding);
    assert!(!output_path.exists());
}

#[test]
fn unwritable_output_fails_the_generation() {
    let request = GenerationRequest {
        output_path: std::env::temp_dir()
            .join("barcode_sheet_does_not_exist")
            .join("barcodes.pdf"),
        start: 1,
        end: 2,
        ..Default::default()
    };

    let error = generator::generate(&request).unwrap_err();
    assert_eq!(error.kind, barcode_sheet::error::ErrorKind::Io);
}

#[test]
fn summary_and_request_serialize_in_camel_case() {
    let summary = GenerationSummary {
        item_count: 3,
        output_path: "codes.pdf".into(),
    };
    similar_asserts::assert_eq!(
        serde_json::to_value(&summary).unwrap(),
        serde_json::json!({ "itemCount": 3, "outputPath": "codes.pdf" })
    );

    let request: GenerationRequest = serde_json::from_str(
        r#"{
            "outputPath": "codes.pdf",
            "width": 5.0,
            "start": 1,
            "end": 3,
            "text": "",
            "zeros": 2,
            "barWidth": 1.2,
            "prefix": "AB-",
            "suffix": "-X",
            "descending": false,
            "language": "de"
        }"#,
    )
    .unwrap();
    assert_eq!(request.language, Language::De);
    assert_eq!(request.encoded_value(3), "AB-03-X");
}

#[test]
fn random_requests_keep_padding_and_affixes() {
    let mut rng = rand::thread_rng();

    for _ in 0..200 {
        let start = rng.gen_range(-1_000..100_000i64);
        let length = rng.gen_range(1..40i64);
        let affix = |rng: &mut rand::rngs::ThreadRng| {
            let length = rng.gen_range(0..6);
            rng.sample_iter(&Alphanumeric)
                .take(length)
                .map(char::from)
                .collect::<String>()
        };
        let request = GenerationRequest {
            start,
            end: start + length - 1,
            zeros: rng.gen_range(0..12),
            prefix: affix(&mut rng),
            suffix: affix(&mut rng),
            descending: rng.gen(),
            ..Default::default()
        };

        let layout = PageLayout::for_request(&request);
        let items = layout.items(&request);
        assert_eq!(items.len() as i64, length);
        assert_eq!(layout.item_count, length);

        for item in &items {
            assert!(item.value.starts_with(&request.prefix));
            assert!(item.value.ends_with(&request.suffix));
            let numeric = &item.value
                [request.prefix.len()..item.value.len() - request.suffix.len()];
            assert!(numeric.len() >= request.zeros, "{:?} is too short", numeric);
            assert_eq!(numeric.parse::<i64>().unwrap(), item.number);
        }

        let mut numbers = items.iter().map(|item| item.number).collect::<Vec<_>>();
        numbers.sort_unstable();
        similar_asserts::assert_eq!(numbers, (request.start..=request.end).collect::<Vec<_>>());
    }
}
