#[cfg(feature = "cli")]
pub mod cli;
pub mod color;
pub mod config;
pub mod data;
pub mod error;
pub mod label;
pub mod layout;
pub mod layout_dump;
pub mod path;
pub mod render;

pub use color::{Palette, expand_hex, normalize_hex, shade};
pub use config::{
    BlockConfig, ChartConfig, CurveConfig, FillMode, FunnelConfig, LabelConfig, Margin,
    RenderConfig, load_config,
};
pub use data::{Block, BlockLabel, Row, rows_from_json, standardize};
pub use error::FunnelError;
pub use label::LabelFormat;
pub use layout::{BlockLayout, FunnelLayout, TopCap, compute_layout, layout_chart};
pub use layout_dump::LayoutDump;
pub use path::{PathCommand, Point, path_data};
pub use render::render_svg;

#[cfg(feature = "cli")]
pub use cli::run;
