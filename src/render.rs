use std::path::Path;

use anyhow::Result;

use crate::color::shade;
use crate::config::{FillMode, FunnelConfig};
use crate::layout::FunnelLayout;
use crate::path::path_data;

const GRADIENT_EDGE_SHADE: f32 = -0.25;

/// Serializes a computed layout into a standalone SVG document.
pub fn render_svg(layout: &FunnelLayout, config: &FunnelConfig) -> String {
    let margin = &config.render.margin;
    let outer_width = layout.width + margin.left + margin.right;
    let outer_height = layout.height + margin.top + margin.bottom;

    let mut svg = String::new();
    svg.push_str(&format!(
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{outer_width}\" height=\"{outer_height}\" viewBox=\"0 0 {outer_width} {outer_height}\">",
    ));

    if config.render.show_border {
        let fill = config.render.background.as_deref().unwrap_or("none");
        svg.push_str(&format!(
            "<rect x=\"0\" y=\"0\" width=\"{outer_width}\" height=\"{outer_height}\" fill=\"{fill}\" stroke=\"{}\" stroke-width=\"{}\" stroke-opacity=\"{}\"/>",
            config.render.border_color,
            config.render.border_thickness,
            config.render.border_alpha / 100.0,
        ));
    } else if let Some(background) = &config.render.background {
        svg.push_str(&format!(
            "<rect x=\"0\" y=\"0\" width=\"{outer_width}\" height=\"{outer_height}\" fill=\"{background}\"/>",
        ));
    }

    if config.block.fill_mode == FillMode::Gradient {
        svg.push_str("<defs>");
        for (index, block) in layout.blocks.iter().enumerate() {
            let edge =
                shade(&block.fill, GRADIENT_EDGE_SHADE).unwrap_or_else(|_| block.fill.clone());
            svg.push_str(&format!(
                "<linearGradient id=\"gradient-{index}\" x1=\"0%\" x2=\"100%\" y1=\"0%\" y2=\"0%\">"
            ));
            for (offset, color) in [(0, &edge), (40, &block.fill), (60, &block.fill), (100, &edge)]
            {
                svg.push_str(&format!(
                    "<stop offset=\"{offset}%\" style=\"stop-color:{color}\"/>"
                ));
            }
            svg.push_str("</linearGradient>");
        }
        svg.push_str("</defs>");
    }

    svg.push_str(&format!(
        "<g transform=\"translate({},{})\">",
        margin.left, margin.top
    ));

    if let Some(cap) = &layout.top_cap {
        svg.push_str(&format!(
            "<path fill=\"{}\" d=\"{}\"/>",
            cap.fill,
            path_data(&cap.outline)
        ));
    }

    for (index, block) in layout.blocks.iter().enumerate() {
        let fill = match config.block.fill_mode {
            FillMode::Solid => block.fill.clone(),
            FillMode::Gradient => format!("url(#gradient-{index})"),
        };
        svg.push_str(&format!(
            "<path fill=\"{fill}\" d=\"{}\"/>",
            path_data(&block.outline)
        ));
        svg.push_str(&format!(
            "<text x=\"{:.2}\" y=\"{:.2}\" text-anchor=\"middle\" dominant-baseline=\"middle\" fill=\"{}\" font-size=\"{}\" pointer-events=\"none\">{}</text>",
            block.label_x,
            block.label_y,
            block.label_color,
            config.label.font_size,
            escape_xml(&block.label_text)
        ));
    }

    svg.push_str("</g></svg>");
    svg
}

pub fn write_output_svg(svg: &str, output: Option<&Path>) -> Result<()> {
    match output {
        Some(path) => {
            std::fs::write(path, svg)?;
        }
        None => {
            print!("{}", svg);
        }
    }
    Ok(())
}

#[cfg(feature = "png")]
pub fn write_output_png(svg: &str, output: &Path, width: f32, height: f32) -> Result<()> {
    let mut opt = usvg::Options::default();
    opt.default_size = usvg::Size::from_wh(width, height)
        .unwrap_or(usvg::Size::from_wh(350.0, 400.0).unwrap());

    let tree = usvg::Tree::from_str(svg, &opt)?;
    let size = tree.size().to_int_size();
    let mut pixmap = resvg::tiny_skia::Pixmap::new(size.width(), size.height())
        .ok_or_else(|| anyhow::anyhow!("Failed to allocate pixmap"))?;

    let mut pixmap_mut = pixmap.as_mut();
    resvg::render(&tree, resvg::tiny_skia::Transform::default(), &mut pixmap_mut);
    pixmap.save_png(output)?;
    Ok(())
}

fn escape_xml(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}
