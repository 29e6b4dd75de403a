use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::color::{self, Palette};
use crate::label::LabelFormat;

/// How block interiors are painted by the SVG output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum FillMode {
    #[default]
    Solid,
    Gradient,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurveConfig {
    pub enabled: bool,
    pub height: f32,
}

impl Default for CurveConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            height: 20.0,
        }
    }
}

/// Chart geometry. `width`/`height` are the drawable area in pixels;
/// `bottom_width` is a fraction of `width`.
#[derive(Debug, Clone)]
pub struct ChartConfig {
    pub width: f32,
    pub height: f32,
    pub bottom_width: f32,
    pub bottom_pinch: usize,
    pub inverted: bool,
    pub curve: CurveConfig,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            width: 350.0,
            height: 400.0,
            bottom_width: 1.0 / 3.0,
            bottom_pinch: 0,
            inverted: false,
            curve: CurveConfig::default(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct BlockConfig {
    pub dynamic_height: bool,
    pub min_height: Option<f32>,
    pub fill_mode: FillMode,
    pub scale: Palette,
}

impl Default for BlockConfig {
    fn default() -> Self {
        Self {
            dynamic_height: false,
            min_height: None,
            fill_mode: FillMode::Solid,
            scale: Palette::default(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct LabelConfig {
    pub format: LabelFormat,
    pub fill: String,
    pub font_size: f32,
}

impl Default for LabelConfig {
    fn default() -> Self {
        Self {
            format: LabelFormat::default(),
            fill: "#fff".to_string(),
            font_size: 14.0,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Margin {
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
    pub left: f32,
}

/// SVG-level presentation. The layout engine never sees these; margins
/// offset the viewport around the drawable area.
#[derive(Debug, Clone)]
pub struct RenderConfig {
    pub background: Option<String>,
    pub show_border: bool,
    pub border_color: String,
    pub border_thickness: f32,
    pub border_alpha: f32,
    pub margin: Margin,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            background: None,
            show_border: false,
            border_color: "#666666".to_string(),
            border_thickness: 4.0,
            border_alpha: 100.0,
            margin: Margin::default(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct FunnelConfig {
    pub chart: ChartConfig,
    pub block: BlockConfig,
    pub label: LabelConfig,
    pub render: RenderConfig,
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct CurveConfigFile {
    enabled: Option<bool>,
    height: Option<f32>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct ChartConfigFile {
    width: Option<f32>,
    height: Option<f32>,
    bottom_width: Option<f32>,
    bottom_pinch: Option<usize>,
    inverted: Option<bool>,
    curve: Option<CurveConfigFile>,
}

// The option surface accepts `false` to disable the floor height, so the
// file form has to take either a number or a bool.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum MinHeightFile {
    Pixels(f32),
    Toggle(bool),
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct FillConfigFile {
    #[serde(rename = "type")]
    mode: Option<FillMode>,
    scale: Option<Vec<String>>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct BlockConfigFile {
    dynamic_height: Option<bool>,
    min_height: Option<MinHeightFile>,
    fill: Option<FillConfigFile>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct LabelConfigFile {
    format: Option<String>,
    fill: Option<String>,
    font_size: Option<f32>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct MarginConfigFile {
    top: Option<f32>,
    right: Option<f32>,
    bottom: Option<f32>,
    left: Option<f32>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct RenderConfigFile {
    background: Option<String>,
    show_border: Option<bool>,
    border_color: Option<String>,
    border_thickness: Option<f32>,
    border_alpha: Option<f32>,
    margin: Option<MarginConfigFile>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct ConfigFile {
    chart: Option<ChartConfigFile>,
    block: Option<BlockConfigFile>,
    label: Option<LabelConfigFile>,
    render: Option<RenderConfigFile>,
}

pub fn load_config(path: Option<&Path>) -> anyhow::Result<FunnelConfig> {
    let config = FunnelConfig::default();
    let Some(path) = path else {
        return Ok(config);
    };

    let contents = std::fs::read_to_string(path)?;
    let parsed: ConfigFile = json5::from_str(&contents)?;
    apply_config_file(config, parsed)
}

fn apply_config_file(mut config: FunnelConfig, file: ConfigFile) -> anyhow::Result<FunnelConfig> {
    if let Some(chart) = file.chart {
        if let Some(v) = chart.width {
            config.chart.width = v;
        }
        if let Some(v) = chart.height {
            config.chart.height = v;
        }
        if let Some(v) = chart.bottom_width {
            config.chart.bottom_width = v;
        }
        if let Some(v) = chart.bottom_pinch {
            config.chart.bottom_pinch = v;
        }
        if let Some(v) = chart.inverted {
            config.chart.inverted = v;
        }
        if let Some(curve) = chart.curve {
            if let Some(v) = curve.enabled {
                config.chart.curve.enabled = v;
            }
            if let Some(v) = curve.height {
                config.chart.curve.height = v;
            }
        }
    }

    if let Some(block) = file.block {
        if let Some(v) = block.dynamic_height {
            config.block.dynamic_height = v;
        }
        match block.min_height {
            Some(MinHeightFile::Pixels(v)) => config.block.min_height = Some(v),
            Some(MinHeightFile::Toggle(_)) => config.block.min_height = None,
            None => {}
        }
        if let Some(fill) = block.fill {
            if let Some(v) = fill.mode {
                config.block.fill_mode = v;
            }
            if let Some(colors) = fill.scale {
                color::validate_colors(&colors)?;
                config.block.scale = Palette::List(colors);
            }
        }
    }

    if let Some(label) = file.label {
        if let Some(v) = label.format {
            config.label.format = LabelFormat::Template(v);
        }
        if let Some(v) = label.fill {
            config.label.fill = v;
        }
        if let Some(v) = label.font_size {
            config.label.font_size = v;
        }
    }

    if let Some(render) = file.render {
        if let Some(v) = render.background {
            config.render.background = Some(v);
        }
        if let Some(v) = render.show_border {
            config.render.show_border = v;
        }
        if let Some(v) = render.border_color {
            config.render.border_color = v;
        }
        if let Some(v) = render.border_thickness {
            config.render.border_thickness = v;
        }
        if let Some(v) = render.border_alpha {
            config.render.border_alpha = v;
        }
        if let Some(margin) = render.margin {
            if let Some(v) = margin.top {
                config.render.margin.top = v;
            }
            if let Some(v) = margin.right {
                config.render.margin.right = v;
            }
            if let Some(v) = margin.bottom {
                config.render.margin.bottom = v;
            }
            if let Some(v) = margin.left {
                config.render.margin.left = v;
            }
        }
    }

    Ok(config)
}
