use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use serde::Serialize;

use crate::layout::FunnelLayout;
use crate::path::path_data;

/// A flattened, serializable snapshot of a computed layout, for debugging
/// and downstream tooling.
#[derive(Debug, Serialize)]
pub struct LayoutDump {
    pub width: f32,
    pub height: f32,
    pub blocks: Vec<BlockDump>,
    pub top_cap: Option<TopCapDump>,
}

#[derive(Debug, Serialize)]
pub struct BlockDump {
    pub index: usize,
    pub value: f32,
    pub ratio: f32,
    pub fill: String,
    pub label: String,
    pub label_color: String,
    pub label_x: f32,
    pub label_y: f32,
    pub path: String,
}

#[derive(Debug, Serialize)]
pub struct TopCapDump {
    pub fill: String,
    pub path: String,
}

impl LayoutDump {
    pub fn from_layout(layout: &FunnelLayout) -> Self {
        let blocks = layout
            .blocks
            .iter()
            .enumerate()
            .map(|(index, block)| BlockDump {
                index,
                value: block.value,
                ratio: block.ratio,
                fill: block.fill.clone(),
                label: block.label_text.clone(),
                label_color: block.label_color.clone(),
                label_x: block.label_x,
                label_y: block.label_y,
                path: path_data(&block.outline),
            })
            .collect();
        let top_cap = layout.top_cap.as_ref().map(|cap| TopCapDump {
            fill: cap.fill.clone(),
            path: path_data(&cap.outline),
        });
        Self {
            width: layout.width,
            height: layout.height,
            blocks,
            top_cap,
        }
    }
}

pub fn write_layout_dump(path: &Path, layout: &FunnelLayout) -> anyhow::Result<()> {
    let file = File::create(path)?;
    let writer = BufWriter::new(file);
    serde_json::to_writer_pretty(writer, &LayoutDump::from_layout(layout))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::FunnelConfig;
    use crate::data::Row;
    use crate::layout::layout_chart;

    #[test]
    fn dump_mirrors_the_layout() {
        let mut config = FunnelConfig::default();
        config.chart.curve.enabled = true;
        let rows = vec![Row::new("A", 70.0), Row::new("B", 30.0)];
        let layout = layout_chart(&rows, &config).unwrap();

        let dump = LayoutDump::from_layout(&layout);
        assert_eq!(dump.blocks.len(), 2);
        assert_eq!(dump.blocks[0].index, 0);
        assert_eq!(dump.blocks[0].ratio, 0.7);
        assert!(dump.blocks[0].path.starts_with("M0,10"));
        assert!(dump.top_cap.is_some());

        let json = serde_json::to_string(&dump).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["blocks"][1]["label"], "B: 30");
        assert_eq!(value["width"], 350.0);
    }
}
