//=========================================================================
// Animation
//=========================================================================
//
// Frame sequencer for sprite animations.
//
// An `Animation` only tracks which frame of a sheet to show; the caller
// maps the index to an image name or sheet region when drawing.
//
// Timing:
//   each frame lasts `duration / frames`; every call adds the tick to
//   the elapsed and per-frame clocks, and the frame advances once the
//   per-frame clock reaches that length.
//
// Modes:
//   play          0 1 2 … n-1 (stays on n-1)
//   play_reverse  n-1 … 1 0   (stays on 0)
//   play_looped   0 1 2 … n-1 0 1 2 …
//   ping_pong     0 1 2 1 0 1 2 …
//   pause         still frame, or the current one
//
//=========================================================================

//=== External Dependencies ===============================================

use std::fmt;

use thiserror::Error;

//=== AnimationError ======================================================

#[derive(Debug, Error, Clone, PartialEq)]
pub enum AnimationError {
    #[error("an animation needs at least one frame")]
    NoFrames,

    #[error("animation duration must be positive (got {0})")]
    InvalidDuration(f64),

    #[error("still frame {frame} is out of range for {frames} frames")]
    StillFrameOutOfRange { frame: usize, frames: usize },
}

//=== Animation ===========================================================

#[derive(Debug, Clone, PartialEq)]
pub struct Animation {
    frames: usize,
    duration: f64,
    frame_length: f64,
    current: usize,
    elapsed: f64,
    frame_time: f64,
    reverse: bool,
    still_frame: Option<usize>,
}

impl Animation {
    /// `duration` is in the same unit as the ticks passed to the play
    /// methods.
    pub fn new(frames: usize, duration: f64) -> Result<Self, AnimationError> {
        if frames == 0 {
            return Err(AnimationError::NoFrames);
        }
        check_duration(duration)?;

        Ok(Self {
            frames,
            duration,
            frame_length: duration / frames as f64,
            current: 0,
            elapsed: 0.0,
            frame_time: 0.0,
            reverse: false,
            still_frame: None,
        })
    }

    /// Frame shown by `pause`.
    pub fn with_still_frame(mut self, frame: usize) -> Result<Self, AnimationError> {
        if frame >= self.frames {
            return Err(AnimationError::StillFrameOutOfRange {
                frame,
                frames: self.frames,
            });
        }
        self.still_frame = Some(frame);
        Ok(self)
    }

    //--- Accessors --------------------------------------------------------

    pub fn frames(&self) -> usize {
        self.frames
    }

    pub fn duration(&self) -> f64 {
        self.duration
    }

    pub fn set_duration(&mut self, duration: f64) -> Result<(), AnimationError> {
        check_duration(duration)?;
        self.duration = duration;
        self.frame_length = duration / self.frames as f64;
        Ok(())
    }

    pub fn current_frame(&self) -> usize {
        self.current
    }

    pub fn is_finished(&self) -> bool {
        self.elapsed >= self.duration
    }

    /// Rewinds to the first frame.
    pub fn reset(&mut self) {
        self.elapsed = 0.0;
        self.frame_time = 0.0;
        self.current = 0;
    }

    //--- Playback ---------------------------------------------------------

    /// Plays once forwards; returns the frame to show.
    pub fn play(&mut self, tick: f64) -> usize {
        if self.is_finished() {
            self.current = self.last();
        } else if self.advance_clock(tick) {
            self.current = (self.current + 1).min(self.last());
        }
        self.current
    }

    /// Plays once backwards; returns the frame to show.
    ///
    /// A fresh (or reset) animation starts from the last frame.
    pub fn play_reverse(&mut self, tick: f64) -> usize {
        if self.is_finished() {
            self.current = 0;
            return 0;
        }
        if self.elapsed == 0.0 {
            self.current = self.last();
        }
        if self.advance_clock(tick) {
            self.current = self.current.saturating_sub(1);
        }
        self.current
    }

    /// Plays forwards, starting over once finished.
    pub fn play_looped(&mut self, tick: f64) -> usize {
        if self.is_finished() {
            self.reset();
        }
        self.play(tick)
    }

    /// Bounces between the first and last frame.
    pub fn ping_pong(&mut self, tick: f64) -> usize {
        if self.is_finished() {
            self.elapsed = 0.0;
        }
        if !self.advance_clock(tick) || self.frames == 1 {
            return self.current;
        }

        if self.reverse {
            if self.current == 0 {
                self.reverse = false;
                self.current = 1;
            } else {
                self.current -= 1;
            }
        } else if self.current == self.last() {
            self.reverse = true;
            self.current -= 1;
        } else {
            self.current += 1;
        }
        self.current
    }

    /// Holds the still frame if one is set, else the current frame.
    ///
    /// The per-frame clock keeps running so playback resumes on time.
    pub fn pause(&mut self, tick: f64) -> usize {
        if let Some(frame) = self.still_frame {
            return frame;
        }
        self.frame_time += tick;
        self.current
    }

    //--- Internal Helpers -------------------------------------------------

    fn last(&self) -> usize {
        self.frames - 1
    }

    /// Adds `tick` to both clocks; true when the frame should advance.
    fn advance_clock(&mut self, tick: f64) -> bool {
        self.elapsed += tick;
        self.frame_time += tick;
        if self.frame_time < self.frame_length {
            return false;
        }
        self.frame_time = 0.0;
        true
    }
}

impl fmt::Display for Animation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Animation(frame {}/{}, reverse: {}, elapsed: {:.1}/{:.1})",
            self.current, self.frames, self.reverse, self.elapsed, self.duration
        )
    }
}

fn check_duration(duration: f64) -> Result<(), AnimationError> {
    if duration.is_finite() && duration > 0.0 {
        Ok(())
    } else {
        Err(AnimationError::InvalidDuration(duration))
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
