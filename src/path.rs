/// A 2D coordinate in pixels, origin top-left, y increasing downward.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// One segment of a block outline. Outlines close with an explicit line
/// back to their first point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PathCommand {
    Move(Point),
    Line(Point),
    Quad { control: Point, end: Point },
}

impl PathCommand {
    /// The point the pen rests on after the command.
    pub fn end(&self) -> Point {
        match self {
            PathCommand::Move(point) | PathCommand::Line(point) => *point,
            PathCommand::Quad { end, .. } => *end,
        }
    }
}

/// Compiles an ordered command list into a compact path descriptor.
pub fn path_data(commands: &[PathCommand]) -> String {
    let mut d = String::new();
    for command in commands {
        if !d.is_empty() {
            d.push(' ');
        }
        match command {
            PathCommand::Move(point) => {
                d.push_str(&format!("M{},{}", point.x, point.y));
            }
            PathCommand::Line(point) => {
                d.push_str(&format!("L{},{}", point.x, point.y));
            }
            PathCommand::Quad { control, end } => {
                d.push_str(&format!("Q{},{} {},{}", control.x, control.y, end.x, end.y));
            }
        }
    }
    d
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_commands_in_order() {
        let commands = [
            PathCommand::Move(Point::new(0.0, 0.0)),
            PathCommand::Line(Point::new(350.0, 0.0)),
            PathCommand::Quad {
                control: Point::new(175.0, 110.0),
                end: Point::new(25.0, 100.0),
            },
            PathCommand::Line(Point::new(0.0, 0.0)),
        ];
        assert_eq!(path_data(&commands), "M0,0 L350,0 Q175,110 25,100 L0,0");
    }

    #[test]
    fn fractional_coordinates_keep_minimal_form() {
        let commands = [PathCommand::Move(Point::new(37.5, 0.0))];
        assert_eq!(path_data(&commands), "M37.5,0");
    }

    #[test]
    fn end_point_tracks_curve_destination() {
        let quad = PathCommand::Quad {
            control: Point::new(1.0, 2.0),
            end: Point::new(3.0, 4.0),
        };
        assert_eq!(quad.end(), Point::new(3.0, 4.0));
    }

    #[test]
    fn empty_command_list_yields_empty_descriptor() {
        assert_eq!(path_data(&[]), "");
    }
}
