use pixel_pickle::protocol::GridSize;
use pixel_pickle::{
    CalculatorKind, Error, HostState, LoadOutcome, PixelBuffer, Pickler, PicklerConfig, PngCodec,
    RasterCodec, encode,
};
use serde_json::{Value, json};

#[derive(Debug, Default)]
struct MemoryHost {
    state: Value,
    title: Option<String>,
    kind: CalculatorKind,
    set_state_calls: usize,
}

impl MemoryHost {
    fn with_state(state: Value) -> Self {
        Self {
            state,
            ..Self::default()
        }
    }
}

impl HostState for MemoryHost {
    fn state(&self) -> Value {
        self.state.clone()
    }

    fn set_state(&mut self, state: Value) {
        self.state = state;
        self.set_state_calls += 1;
    }

    fn title(&self) -> Option<String> {
        self.title.clone()
    }

    fn set_title(&mut self, title: &str) {
        self.title = Some(title.to_string());
    }

    fn kind(&self) -> CalculatorKind {
        self.kind.clone()
    }
}

fn graph_state() -> Value {
    json!({
        "version": 11,
        "graph": { "viewport": { "xmin": -5, "ymin": -5, "xmax": 5, "ymax": 5 } },
        "expressions": { "list": [{ "type": "expression", "id": "1", "latex": "y=x^2" }] }
    })
}

#[test]
fn save_then_load_restores_state_and_title() {
    let pickler = Pickler::new();
    let mut source = MemoryHost::with_state(graph_state());
    source.title = Some("Parabola".to_string());

    let saved = pickler.save(&source).unwrap();
    assert_eq!(saved.file_name, "Parabola.png");
    assert!(saved.bytes.starts_with(b"\x89PNG"));

    let mut target = MemoryHost::default();
    let outcome = pickler
        .load(&mut target, &saved.bytes, Some(saved.file_name.as_str()))
        .unwrap();

    assert_eq!(
        outcome,
        LoadOutcome::Restored {
            title: Some("Parabola".to_string())
        }
    );
    assert_eq!(target.state, graph_state());
    assert_eq!(target.title.as_deref(), Some("Parabola"));
}

#[test]
fn untitled_host_uses_placeholder() {
    let pickler = Pickler::new();
    let mut host = MemoryHost::with_state(graph_state());
    assert_eq!(pickler.save(&host).unwrap().file_name, "untitled.png");

    host.title = Some("   ".to_string());
    assert_eq!(pickler.save(&host).unwrap().file_name, "untitled.png");

    let custom = Pickler::with_codec(
        PngCodec::new(),
        PicklerConfig {
            default_title: "graph".to_string(),
            ..PicklerConfig::default()
        },
    );
    assert_eq!(custom.save(&host).unwrap().file_name, "graph.png");
}

#[test]
fn load_without_file_name_keeps_title() {
    let pickler = Pickler::new();
    let saved = pickler.save(&MemoryHost::with_state(graph_state())).unwrap();

    let mut host = MemoryHost::default();
    host.title = Some("Existing".to_string());
    let outcome = pickler.load(&mut host, &saved.bytes, None).unwrap();

    assert_eq!(outcome, LoadOutcome::Restored { title: None });
    assert_eq!(host.title.as_deref(), Some("Existing"));
}

#[test]
fn ordinary_png_is_ignored() {
    let codec = PngCodec::new();
    let plain = PixelBuffer::from_rgba(2, 2, vec![0x10; 16]).unwrap();
    let file = codec.encode_image(&plain).unwrap();

    let mut host = MemoryHost::with_state(graph_state());
    let outcome = Pickler::new()
        .load(&mut host, &file, Some("photo.png"))
        .unwrap();

    assert_eq!(outcome, LoadOutcome::Ignored);
    assert_eq!(host.set_state_calls, 0);
    assert_eq!(host.title, None);
    assert_eq!(host.state, graph_state());
}

#[test]
fn truncated_pickle_leaves_host_untouched() {
    let codec = PngCodec::new();
    let buffer = encode(br#"{"a":1}"#).unwrap();
    let mut channels = buffer.to_channels();
    channels[4..8].copy_from_slice(&u32::MAX.to_be_bytes());
    let file = codec
        .encode_image(&PixelBuffer::pack(buffer.grid(), &channels))
        .unwrap();

    let mut host = MemoryHost::with_state(graph_state());
    let result = Pickler::new().load(&mut host, &file, Some("broken.png"));

    assert!(matches!(result, Err(Error::TruncatedData { .. })));
    assert_eq!(host.set_state_calls, 0);
    assert_eq!(host.title, None);
}

#[test]
fn corrupt_payload_leaves_host_untouched() {
    let codec = PngCodec::new();
    let file = codec
        .encode_image(&encode(b"{\"expressions\":").unwrap())
        .unwrap();

    let mut host = MemoryHost::with_state(graph_state());
    let result = Pickler::new().load(&mut host, &file, None);

    assert!(matches!(result, Err(Error::PayloadCorrupt(_))));
    assert_eq!(host.set_state_calls, 0);
}

#[test]
fn unreadable_file_is_a_raster_error() {
    let mut host = MemoryHost::default();
    let result = Pickler::new().load(&mut host, b"GIF89a", None);
    assert!(matches!(result, Err(Error::Raster(_))));
    assert_eq!(host.set_state_calls, 0);
}

#[test]
fn missing_viewport_filled_for_host_kind() {
    let pickler = Pickler::with_codec(
        PngCodec::new(),
        PicklerConfig {
            fill_missing_viewport: true,
            ..PicklerConfig::default()
        },
    );
    let saved = pickler
        .save(&MemoryHost::with_state(json!({ "expressions": { "list": [] } })))
        .unwrap();

    let mut host = MemoryHost {
        kind: CalculatorKind::ThreeD,
        ..MemoryHost::default()
    };
    pickler.load(&mut host, &saved.bytes, None).unwrap();

    let viewport = &host.state["graph"]["viewport"];
    assert_eq!(viewport["zmin"], json!(-10.0));
    assert_eq!(viewport["zmax"], json!(10.0));
}

#[test]
fn default_load_restores_exactly_the_saved_document() {
    let pickler = Pickler::new();
    let document = json!({ "expressions": { "list": [] } });
    let saved = pickler.save(&MemoryHost::with_state(document.clone())).unwrap();

    for kind in [
        CalculatorKind::Graphing,
        CalculatorKind::Geometry,
        CalculatorKind::ThreeD,
    ] {
        let mut host = MemoryHost {
            kind,
            ..MemoryHost::default()
        };
        pickler.load(&mut host, &saved.bytes, None).unwrap();
        assert_eq!(host.state, document);
    }
}

#[test]
fn saved_grid_matches_document_size() {
    let pickler = Pickler::new();
    let saved = pickler.save(&MemoryHost::with_state(json!({}))).unwrap();
    assert_eq!(saved.grid, GridSize::new(2, 2));
}
