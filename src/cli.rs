use crate::config::load_config;
use crate::data::rows_from_json;
use crate::layout::layout_chart;
use crate::layout_dump::write_layout_dump;
#[cfg(feature = "png")]
use crate::render::write_output_png;
use crate::render::{render_svg, write_output_svg};
use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use std::io::{self, Read};
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(name = "funnelc", version, about = "Funnel and pyramid chart renderer")]
pub struct Args {
    /// Input rows JSON file or '-' for stdin
    #[arg(short = 'i', long = "input")]
    pub input: Option<PathBuf>,

    /// Output file (svg/png). Defaults to stdout for SVG if omitted.
    #[arg(short = 'o', long = "output")]
    pub output: Option<PathBuf>,

    /// Output format
    #[arg(short = 'e', long = "outputFormat", value_enum, default_value = "svg")]
    pub output_format: OutputFormat,

    /// Config file (JSON5, chart/block/label/render sections)
    #[arg(short = 'c', long = "configFile")]
    pub config: Option<PathBuf>,

    /// Chart width in pixels (overrides the config file)
    #[arg(short = 'w', long = "width")]
    pub width: Option<f32>,

    /// Chart height in pixels (overrides the config file)
    #[arg(short = 'H', long = "height")]
    pub height: Option<f32>,

    /// Also write the computed layout as JSON
    #[arg(long = "dumpLayout")]
    pub dump_layout: Option<PathBuf>,
}

#[derive(ValueEnum, Debug, Clone, Copy)]
pub enum OutputFormat {
    Svg,
    #[cfg(feature = "png")]
    Png,
}

pub fn run() -> Result<()> {
    let args = Args::parse();
    let mut config = load_config(args.config.as_deref())?;
    if let Some(width) = args.width {
        config.chart.width = width;
    }
    if let Some(height) = args.height {
        config.chart.height = height;
    }

    let input = read_input(args.input.as_deref())?;
    let rows = rows_from_json(&input)?;
    let layout = layout_chart(&rows, &config)?;

    if let Some(path) = &args.dump_layout {
        write_layout_dump(path, &layout)
            .with_context(|| format!("failed to write layout dump to {}", path.display()))?;
    }

    let svg = render_svg(&layout, &config);
    match args.output_format {
        OutputFormat::Svg => {
            write_output_svg(&svg, args.output.as_deref())?;
        }
        #[cfg(feature = "png")]
        OutputFormat::Png => {
            let output = args
                .output
                .as_deref()
                .context("--output is required for png")?;
            let margin = &config.render.margin;
            write_output_png(
                &svg,
                output,
                config.chart.width + margin.left + margin.right,
                config.chart.height + margin.top + margin.bottom,
            )?;
        }
    }
    Ok(())
}

fn read_input(path: Option<&Path>) -> Result<String> {
    match path {
        Some(path) if path.as_os_str() != "-" => std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display())),
        _ => {
            let mut buffer = String::new();
            io::stdin().read_to_string(&mut buffer)?;
            Ok(buffer)
        }
    }
}
