use thiserror::Error;

/// Rejected playback or board configuration.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("step size must be a positive finite number of pixels, got {0}")]
    StepSize(f32),

    #[error("step duration must be longer than zero")]
    StepDuration,

    #[error("walk frame distance must be a positive finite number of pixels, got {0}")]
    WalkFrameDistance(f32),

    #[error("the walk cycle needs at least one frame")]
    WalkFrames,

    #[error("default pen width must be a non-negative finite number, got {0}")]
    PenWidth(f32),

    #[error("board dimensions must be positive and finite, got {width}x{height}")]
    BoardSize { width: f32, height: f32 },
}
