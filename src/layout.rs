use crate::color;
use crate::config::FunnelConfig;
use crate::data::{Block, Row, standardize};
use crate::error::FunnelError;
use crate::path::{PathCommand, Point};

// Vertical room reserved above the first block of a curved chart so the top
// cap has somewhere to sit.
const CURVE_TOP_RESERVE: f32 = 10.0;

const TOP_CAP_SHADE: f32 = -0.4;

/// One block's computed geometry plus everything a renderer needs to paint
/// and caption it.
#[derive(Debug, Clone)]
pub struct BlockLayout {
    pub outline: Vec<PathCommand>,
    pub value: f32,
    pub ratio: f32,
    pub fill: String,
    pub label_x: f32,
    pub label_y: f32,
    pub label_text: String,
    pub label_color: String,
}

/// The oval capping the first block of a curved chart.
#[derive(Debug, Clone)]
pub struct TopCap {
    pub outline: Vec<PathCommand>,
    pub fill: String,
}

#[derive(Debug, Clone)]
pub struct FunnelLayout {
    pub width: f32,
    pub height: f32,
    pub blocks: Vec<BlockLayout>,
    pub top_cap: Option<TopCap>,
}

// Corner state carried from one block to the next. Block i+1's top edge is
// exactly block i's bottom edge.
struct Corners {
    left_x: f32,
    right_x: f32,
    height: f32,
}

/// Standardizes rows and lays them out in one call.
pub fn layout_chart(rows: &[Row], config: &FunnelConfig) -> Result<FunnelLayout, FunnelError> {
    let blocks = standardize(rows, config)?;
    compute_layout(&blocks, config)
}

/// Computes the ordered block outlines for a standardized block sequence.
///
/// The chart narrows from `width` at the top to `width * bottom_width` at
/// the bottom (the reverse when inverted). Heights are uniform unless
/// `dynamic_height` makes them proportional to each block's ratio, with
/// `min_height` as a guaranteed floor carved out of the budget first.
/// `bottom_pinch` holds the sides of the last blocks on the narrow end
/// vertical.
pub fn compute_layout(
    blocks: &[Block],
    config: &FunnelConfig,
) -> Result<FunnelLayout, FunnelError> {
    if blocks.is_empty() {
        return Err(FunnelError::InvalidData("no blocks to lay out".to_string()));
    }

    let chart = &config.chart;
    let count = blocks.len();
    let width = chart.width;
    let height = chart.height;
    let bottom_width = width * chart.bottom_width;
    let bottom_left_x = (width - bottom_width) / 2.0;
    let pinch = chart.bottom_pinch;
    let curved = chart.curve.enabled;
    let curve_height = chart.curve.height;
    let middle = width / 2.0;

    // Baseline velocities. A pinch reserves the full convergence over fewer
    // steps, so the remaining blocks converge more sharply.
    let dx0 = if pinch > 0 {
        bottom_left_x / (count - pinch.min(count)) as f32
    } else {
        bottom_left_x / count as f32
    };
    let dy0 = if curved {
        (height - curve_height) / count as f32
    } else {
        height / count as f32
    };

    // Dynamic budget. The floor height is greedy: every block gets the floor
    // plus its ratio's share of whatever is left.
    let total_height = match config.block.min_height {
        Some(min) => height - min * count as f32,
        None => height,
    };

    // Pinched blocks never converge, so the sloped edge has to finish inside
    // the unpinched span. Estimated block heights stand in for real ones.
    let mut slope_height = height;
    if pinch > 0 {
        for (i, block) in blocks.iter().enumerate() {
            let pinched = if chart.inverted {
                i < pinch
            } else {
                i >= count.saturating_sub(pinch)
            };
            if pinched {
                slope_height -= block.height;
            }
        }
    }
    let slope = 2.0 * slope_height / (width - bottom_width);

    let mut corners = if chart.inverted {
        Corners {
            left_x: bottom_left_x,
            right_x: width - bottom_left_x,
            height: 0.0,
        }
    } else {
        Corners {
            left_x: 0.0,
            right_x: width,
            height: 0.0,
        }
    };
    if curved {
        corners.height = CURVE_TOP_RESERVE;
    }

    let mut dx = dx0;
    let mut dy = dy0;

    let mut laid_out = Vec::with_capacity(count);
    for (i, block) in blocks.iter().enumerate() {
        if config.block.dynamic_height {
            // Slice off the height proportional to this block.
            dy = total_height * block.ratio;
            if let Some(min) = config.block.min_height {
                dy += min;
            }
            if curved {
                dy -= curve_height / count as f32;
            }

            // Invert the edge line y = slope * x (offset by the full height
            // for a pyramid) at the new cumulative height.
            let mut next_left_x = (corners.height + dy) / slope;
            if chart.inverted {
                next_left_x = (corners.height + dy - height) / -slope;
            }

            // A zero bottom width converges to a point; snap the last block
            // there instead of trusting accumulated rounding.
            if bottom_width == 0.0 && i == count - 1 {
                next_left_x = if chart.inverted { 0.0 } else { width / 2.0 };
            }
            // A full-width bottom never converges at all.
            if bottom_width == width {
                next_left_x = corners.left_x;
            }

            dx = next_left_x - corners.left_x;
            if chart.inverted {
                dx = corners.left_x - next_left_x;
            }
        }

        if pinch > 0 {
            if !chart.inverted {
                if i >= count.saturating_sub(pinch) {
                    dx = 0.0;
                }
            } else {
                // With uniform heights the velocity left over from a pinched
                // neighbor is stale; re-baseline before the zeroing test.
                if !config.block.dynamic_height {
                    dx = dx0;
                }
                if i < pinch {
                    dx = 0.0;
                }
            }
        }

        let (next_left_x, next_right_x) = if chart.inverted {
            (corners.left_x - dx, corners.right_x + dx)
        } else {
            (corners.left_x + dx, corners.right_x - dx)
        };
        let next_height = corners.height + dy;

        let outline = if curved {
            vec![
                PathCommand::Move(Point::new(corners.left_x, corners.height)),
                PathCommand::Quad {
                    control: Point::new(middle, corners.height + curve_height - CURVE_TOP_RESERVE),
                    end: Point::new(corners.right_x, corners.height),
                },
                PathCommand::Line(Point::new(next_right_x, next_height)),
                PathCommand::Quad {
                    control: Point::new(middle, next_height + curve_height),
                    end: Point::new(next_left_x, next_height),
                },
                PathCommand::Line(Point::new(corners.left_x, corners.height)),
            ]
        } else {
            vec![
                PathCommand::Move(Point::new(corners.left_x, corners.height)),
                PathCommand::Line(Point::new(corners.right_x, corners.height)),
                PathCommand::Line(Point::new(next_right_x, next_height)),
                PathCommand::Line(Point::new(next_left_x, next_height)),
                PathCommand::Line(Point::new(corners.left_x, corners.height)),
            ]
        };
        ensure_finite(&outline)?;

        // Anchor the caption at the mean of the top and bottom edges.
        let label_y = if curved {
            (corners.height + next_height) / 2.0 + curve_height / count as f32
        } else {
            (corners.height + next_height) / 2.0
        };

        laid_out.push(BlockLayout {
            outline,
            value: block.value,
            ratio: block.ratio,
            fill: block.fill.clone(),
            label_x: middle,
            label_y,
            label_text: block.label.formatted.clone(),
            label_color: block.label.color.clone(),
        });

        corners = Corners {
            left_x: next_left_x,
            right_x: next_right_x,
            height: next_height,
        };
    }

    let top_cap = if curved {
        Some(compute_top_cap(blocks, config, bottom_left_x)?)
    } else {
        None
    };

    Ok(FunnelLayout {
        width,
        height,
        blocks: laid_out,
        top_cap,
    })
}

fn compute_top_cap(
    blocks: &[Block],
    config: &FunnelConfig,
    bottom_left_x: f32,
) -> Result<TopCap, FunnelError> {
    let chart = &config.chart;
    let (left_x, right_x) = if chart.inverted {
        (bottom_left_x, chart.width - bottom_left_x)
    } else {
        (0.0, chart.width)
    };
    let center_x = chart.width / 2.0;
    let curve_height = chart.curve.height;

    let outline = vec![
        PathCommand::Move(Point::new(left_x, CURVE_TOP_RESERVE)),
        PathCommand::Quad {
            control: Point::new(center_x, 2.0 * curve_height - CURVE_TOP_RESERVE),
            end: Point::new(right_x, CURVE_TOP_RESERVE),
        },
        PathCommand::Move(Point::new(right_x, CURVE_TOP_RESERVE)),
        PathCommand::Quad {
            control: Point::new(center_x, 0.0),
            end: Point::new(left_x, CURVE_TOP_RESERVE),
        },
    ];
    ensure_finite(&outline)?;

    Ok(TopCap {
        fill: color::shade(&blocks[0].fill, TOP_CAP_SHADE)?,
        outline,
    })
}

fn ensure_finite(outline: &[PathCommand]) -> Result<(), FunnelError> {
    let finite = |point: &Point| point.x.is_finite() && point.y.is_finite();
    for command in outline {
        let ok = match command {
            PathCommand::Move(point) | PathCommand::Line(point) => finite(point),
            PathCommand::Quad { control, end } => finite(control) && finite(end),
        };
        if !ok {
            return Err(FunnelError::DegenerateLayout(
                "non-finite coordinate in block outline".to_string(),
            ));
        }
    }
    Ok(())
}
