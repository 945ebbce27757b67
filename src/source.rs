use crate::Frame;
use std::collections::VecDeque;

/// A supplier of frames, in step order.
pub trait StepSource {
    /// Gets the next frame, or `None` once the sequence is exhausted.
    fn next_frame(&mut self) -> Option<Frame>;
}

/// A finite, in-memory sequence of frames.
#[derive(Clone, Debug, Default)]
pub struct FrameSequence {
    frames: VecDeque<Frame>,
}

impl FrameSequence {
    /// Creates a sequence from frames which are already in step order.
    pub fn new(frames: impl IntoIterator<Item = Frame>) -> Self {
        Self {
            frames: frames.into_iter().collect(),
        }
    }

    /// The number of frames left in the sequence.
    pub fn remaining(&self) -> usize {
        self.frames.len()
    }
}

impl StepSource for FrameSequence {
    fn next_frame(&mut self) -> Option<Frame> {
        self.frames.pop_front()
    }
}

impl<S: StepSource + ?Sized> StepSource for &mut S {
    fn next_frame(&mut self) -> Option<Frame> {
        (**self).next_frame()
    }
}
