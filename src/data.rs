use serde_json::Value;

use crate::color;
use crate::config::FunnelConfig;
use crate::error::FunnelError;

/// One raw input category. Order across rows is significant: it defines the
/// stacking order from the wide end toward the narrow end.
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    pub label: String,
    pub value: f32,
    /// Display text used for `{f}` instead of the default grouped value.
    pub formatted_value: Option<String>,
    pub color: Option<String>,
    pub label_color: Option<String>,
}

impl Row {
    pub fn new(label: impl Into<String>, value: f32) -> Self {
        Self {
            label: label.into(),
            value,
            formatted_value: None,
            color: None,
            label_color: None,
        }
    }

    pub fn with_formatted_value(mut self, text: impl Into<String>) -> Self {
        self.formatted_value = Some(text.into());
        self
    }

    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    pub fn with_label_color(mut self, color: impl Into<String>) -> Self {
        self.label_color = Some(color.into());
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct BlockLabel {
    pub raw: String,
    pub formatted: String,
    pub color: String,
}

/// A normalized category ready for layout.
#[derive(Debug, Clone, PartialEq)]
pub struct Block {
    pub index: usize,
    pub value: f32,
    /// Share of the total, in (0, 1]; all ratios sum to 1.
    pub ratio: f32,
    /// Uniform height estimate (`chart.height * ratio`). Only feeds the
    /// pinch slope correction; dynamic layout recomputes real heights.
    pub height: f32,
    pub fill: String,
    pub label: BlockLabel,
}

/// Converts raw rows into standardized blocks: totals, ratios, resolved
/// fills and formatted labels.
pub fn standardize(rows: &[Row], config: &FunnelConfig) -> Result<Vec<Block>, FunnelError> {
    if rows.is_empty() {
        return Err(FunnelError::InvalidData("no rows supplied".to_string()));
    }
    config.block.scale.validate()?;

    let total: f32 = rows.iter().map(|row| row.value).sum();
    if !total.is_finite() || total <= 0.0 {
        return Err(FunnelError::DegenerateLayout(format!(
            "total row value must be positive, got {total}"
        )));
    }

    let mut blocks = Vec::with_capacity(rows.len());
    for (index, row) in rows.iter().enumerate() {
        let ratio = row.value / total;
        let fill = match &row.color {
            Some(hex) if color::is_hex_color(hex) => hex.clone(),
            _ => config.block.scale.color_at(index),
        };
        let label_color = match &row.label_color {
            Some(hex) if color::is_hex_color(hex) => hex.clone(),
            _ => config.label.fill.clone(),
        };
        let formatted =
            config
                .label
                .format
                .format(&row.label, row.value, row.formatted_value.as_deref());

        blocks.push(Block {
            index,
            value: row.value,
            ratio,
            height: config.chart.height * ratio,
            fill,
            label: BlockLabel {
                raw: row.label.clone(),
                formatted,
                color: label_color,
            },
        });
    }

    Ok(blocks)
}

/// Decodes the ordered tuple form used by data files:
/// `[["label", value | [value, "formatted"], "#color"?, "#labelColor"?], ...]`.
pub fn rows_from_json(input: &str) -> Result<Vec<Row>, FunnelError> {
    let document: Value = serde_json::from_str(input)
        .map_err(|err| FunnelError::InvalidData(format!("rows are not valid JSON: {err}")))?;
    let Value::Array(entries) = document else {
        return Err(FunnelError::InvalidData(
            "rows must be an ordered array".to_string(),
        ));
    };
    if entries.is_empty() {
        return Err(FunnelError::InvalidData("no rows supplied".to_string()));
    }
    entries.iter().map(row_from_value).collect()
}

fn row_from_value(entry: &Value) -> Result<Row, FunnelError> {
    let Value::Array(fields) = entry else {
        return Err(FunnelError::InvalidData(
            "each row must be an array".to_string(),
        ));
    };
    if fields.len() < 2 {
        return Err(FunnelError::InvalidData(
            "each row needs a label and a value".to_string(),
        ));
    }
    let label = fields[0]
        .as_str()
        .ok_or_else(|| FunnelError::InvalidData("row label must be a string".to_string()))?;

    let (value, formatted_value) = match &fields[1] {
        Value::Number(number) => (number_to_f32(number)?, None),
        Value::Array(pair) if pair.len() == 2 => {
            let raw = pair[0].as_number().ok_or_else(|| {
                FunnelError::InvalidData("row value pair must start with a number".to_string())
            })?;
            let text = pair[1].as_str().ok_or_else(|| {
                FunnelError::InvalidData("row value pair must end with a string".to_string())
            })?;
            (number_to_f32(raw)?, Some(text.to_string()))
        }
        _ => {
            return Err(FunnelError::InvalidData(
                "row value must be a number or a [number, string] pair".to_string(),
            ));
        }
    };

    let mut row = Row::new(label, value);
    row.formatted_value = formatted_value;
    row.color = fields.get(2).and_then(Value::as_str).map(str::to_string);
    row.label_color = fields.get(3).and_then(Value::as_str).map(str::to_string);
    Ok(row)
}

fn number_to_f32(number: &serde_json::Number) -> Result<f32, FunnelError> {
    number
        .as_f64()
        .map(|value| value as f32)
        .ok_or_else(|| FunnelError::InvalidData(format!("row value {number} is out of range")))
}
