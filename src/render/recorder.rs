//! In-memory and no-op renderers.

use super::{Frame, RenderError, Renderer};

/// Keeps the plain-text rendering of every frame it receives.
#[derive(Debug, Default, Clone)]
pub struct FrameRecorder {
    frames: Vec<RecordedFrame>,
}

/// One captured frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedFrame {
    pub generation: u64,
    pub text: String,
}

impl FrameRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn frames(&self) -> &[RecordedFrame] {
        &self.frames
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn last(&self) -> Option<&RecordedFrame> {
        self.frames.last()
    }
}

impl Renderer for FrameRecorder {
    fn render(&mut self, frame: &Frame<'_>) -> Result<(), RenderError> {
        self.frames.push(RecordedFrame {
            generation: frame.generation(),
            text: frame.to_text(),
        });
        Ok(())
    }
}

/// Discards every frame.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullRenderer;

impl Renderer for NullRenderer {
    fn render(&mut self, _frame: &Frame<'_>) -> Result<(), RenderError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compute::{Grid, Point};
    use crate::schema::{Dimensions, Seed};

    #[test]
    fn test_recorder_captures_text() {
        let seed = Seed::new(Dimensions::new(2, 1)).with_alive([Point::new(2, 1)]);
        let grid = Grid::from_seed(&seed).unwrap();
        let mut recorder = FrameRecorder::new();
        assert!(recorder.is_empty());

        recorder.render(&Frame::new(0, &grid)).unwrap();
        recorder.render(&Frame::new(1, &grid)).unwrap();

        assert_eq!(recorder.len(), 2);
        assert_eq!(
            recorder.last(),
            Some(&RecordedFrame {
                generation: 1,
                text: ".#\n".to_string()
            })
        );
    }

    #[test]
    fn test_null_renderer() {
        let grid = Grid::new(Dimensions::new(2, 2));
        assert!(NullRenderer.render(&Frame::new(0, &grid)).is_ok());
    }
}
