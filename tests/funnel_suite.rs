use std::path::{Path, PathBuf};

use funnel_chart::{FunnelConfig, layout_chart, load_config, render_svg, rows_from_json};

fn fixture_root() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
}

fn assert_valid_svg(svg: &str, fixture: &str) {
    assert!(svg.contains("<svg"), "{fixture}: missing <svg tag");
    assert!(svg.contains("</svg>"), "{fixture}: missing </svg tag");
}

fn render_fixture(rows_rel: &str, config_rel: Option<&str>) -> String {
    let root = fixture_root();
    let input = std::fs::read_to_string(root.join(rows_rel)).expect("fixture read failed");
    let rows = rows_from_json(&input).expect("rows decode failed");
    let config = match config_rel {
        Some(rel) => load_config(Some(&root.join(rel))).expect("config load failed"),
        None => FunnelConfig::default(),
    };
    let layout = layout_chart(&rows, &config).expect("layout failed");
    render_svg(&layout, &config)
}

#[test]
fn render_all_fixtures() {
    // Keep this list explicit so new fixture pairs must be added intentionally.
    let candidates = [
        ("rows/basic.json", None),
        ("rows/basic.json", Some("config/curved.json5")),
        ("rows/basic.json", Some("config/inverted.json5")),
        ("rows/pipeline.json", Some("config/dynamic.json5")),
        ("rows/pipeline.json", Some("config/pinched.json5")),
        ("rows/colored.json", Some("config/gradient.json5")),
    ];

    for (rows_rel, config_rel) in candidates {
        let root = fixture_root();
        assert!(
            root.join(rows_rel).exists(),
            "fixture missing: {rows_rel}"
        );
        if let Some(rel) = config_rel {
            assert!(root.join(rel).exists(), "fixture missing: {rel}");
        }
        let svg = render_fixture(rows_rel, config_rel);
        assert_valid_svg(&svg, rows_rel);
    }
}

#[test]
fn block_count_survives_every_mode() {
    let root = fixture_root();
    let input = std::fs::read_to_string(root.join("rows/pipeline.json")).unwrap();
    let rows = rows_from_json(&input).unwrap();

    for config_rel in [
        None,
        Some("config/curved.json5"),
        Some("config/inverted.json5"),
        Some("config/dynamic.json5"),
        Some("config/pinched.json5"),
    ] {
        let config = match config_rel {
            Some(rel) => load_config(Some(&root.join(rel))).unwrap(),
            None => FunnelConfig::default(),
        };
        let layout = layout_chart(&rows, &config).unwrap();
        assert_eq!(
            layout.blocks.len(),
            rows.len(),
            "one outline per row under {config_rel:?}"
        );
        let sum: f32 = layout.blocks.iter().map(|block| block.ratio).sum();
        assert!((sum - 1.0).abs() < 1e-4);
    }
}

#[test]
fn curved_fixture_gets_a_top_cap() {
    let root = fixture_root();
    let input = std::fs::read_to_string(root.join("rows/basic.json")).unwrap();
    let rows = rows_from_json(&input).unwrap();
    let config = load_config(Some(&root.join("config/curved.json5"))).unwrap();
    let layout = layout_chart(&rows, &config).unwrap();
    assert!(layout.top_cap.is_some());

    let svg = render_svg(&layout, &config);
    assert_eq!(svg.matches("<path").count(), rows.len() + 1);
}

#[test]
fn gradient_fixture_defines_gradients() {
    let svg = render_fixture("rows/colored.json", Some("config/gradient.json5"));
    assert!(svg.contains("<linearGradient id=\"gradient-0\""));
    assert!(svg.contains("url(#gradient-0)"));
}

#[test]
fn row_supplied_colors_survive_to_the_svg() {
    let svg = render_fixture("rows/colored.json", None);
    assert!(svg.contains("fill=\"#d62728\""));
}
