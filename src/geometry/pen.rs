//! Drawing capability shared by the encoder and decoder
//!
//! The encoder only ever talks to a [`DrawingPen`]. Recording into an
//! [`OutlineProgram`] gives a replayable program; drawing into a
//! [`kurbo::BezPath`] gives a path for rendering or bounds queries.

use kurbo::{BezPath, PathEl, Point};

/// Minimal polyline drawing interface
pub trait DrawingPen {
    /// Begin a new contour at (x, y)
    fn move_to(&mut self, x: f64, y: f64);
    /// Straight segment from the current point to (x, y)
    fn line_to(&mut self, x: f64, y: f64);
    /// Close the current contour
    fn close(&mut self);
}

/// One recorded drawing operation
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PathOp {
    MoveTo(f64, f64),
    LineTo(f64, f64),
    Close,
}

/// Ordered recording of drawing operations
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OutlineProgram {
    ops: Vec<PathOp>,
}

impl OutlineProgram {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ops(&self) -> &[PathOp] {
        &self.ops
    }

    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    /// Number of closed contours in the program
    pub fn contour_count(&self) -> usize {
        self.ops.iter().filter(|op| matches!(op, PathOp::Close)).count()
    }

    /// Replay the program into another pen
    pub fn draw<P: DrawingPen + ?Sized>(&self, pen: &mut P) {
        for op in &self.ops {
            match *op {
                PathOp::MoveTo(x, y) => pen.move_to(x, y),
                PathOp::LineTo(x, y) => pen.line_to(x, y),
                PathOp::Close => pen.close(),
            }
        }
    }

    pub fn to_bezpath(&self) -> BezPath {
        let mut path = BezPath::new();
        self.draw(&mut path);
        path
    }
}

impl DrawingPen for OutlineProgram {
    fn move_to(&mut self, x: f64, y: f64) {
        self.ops.push(PathOp::MoveTo(x, y));
    }

    fn line_to(&mut self, x: f64, y: f64) {
        self.ops.push(PathOp::LineTo(x, y));
    }

    fn close(&mut self) {
        self.ops.push(PathOp::Close);
    }
}

impl DrawingPen for BezPath {
    fn move_to(&mut self, x: f64, y: f64) {
        BezPath::move_to(self, Point::new(x, y));
    }

    fn line_to(&mut self, x: f64, y: f64) {
        BezPath::line_to(self, Point::new(x, y));
    }

    fn close(&mut self) {
        self.close_path();
    }
}

/// Replay a kurbo path into a pen.
///
/// Curve segments contribute only their end point, as a straight line.
/// Pixel outlines never contain curves; this keeps foreign glyphs sampleable.
pub fn draw_bezpath<P: DrawingPen + ?Sized>(path: &BezPath, pen: &mut P) {
    for el in path.elements() {
        match *el {
            PathEl::MoveTo(p) => pen.move_to(p.x, p.y),
            PathEl::LineTo(p) | PathEl::QuadTo(_, p) | PathEl::CurveTo(_, _, p) => {
                pen.line_to(p.x, p.y)
            }
            PathEl::ClosePath => pen.close(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square(pen: &mut impl DrawingPen) {
        pen.move_to(0.0, 0.0);
        pen.line_to(0.0, 50.0);
        pen.line_to(50.0, 50.0);
        pen.line_to(50.0, 0.0);
        pen.close();
    }

    #[test]
    fn test_recording_counts_contours() {
        let mut program = OutlineProgram::new();
        square(&mut program);
        square(&mut program);
        assert_eq!(program.ops().len(), 10);
        assert_eq!(program.contour_count(), 2);
    }

    #[test]
    fn test_bezpath_round_trip() {
        let mut program = OutlineProgram::new();
        square(&mut program);

        let path = program.to_bezpath();
        // MoveTo, 3x LineTo, ClosePath
        assert_eq!(path.elements().len(), 5);

        let mut replayed = OutlineProgram::new();
        draw_bezpath(&path, &mut replayed);
        assert_eq!(replayed, program);
    }

    #[test]
    fn test_curves_become_lines() {
        let mut path = BezPath::new();
        path.move_to((0.0, 0.0));
        path.quad_to((10.0, 10.0), (20.0, 0.0));
        path.close_path();

        let mut program = OutlineProgram::new();
        draw_bezpath(&path, &mut program);
        assert_eq!(
            program.ops(),
            &[PathOp::MoveTo(0.0, 0.0), PathOp::LineTo(20.0, 0.0), PathOp::Close]
        );
    }
}
