//! Progress reporting for pipelines

/// Progress callback type
pub type ProgressCallback<'a> = &'a dyn Fn(&OpProgress);

/// Stage of a pipeline
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpPhase {
    /// Reading and decoding the input file
    ReadingInput,
    /// Scanning an unframed blob for records
    Scanning,
    /// Loading the translation table
    LoadingTable,
    /// Merging translations into entries
    Merging,
    /// Encoding and writing the output file
    WritingOutput,
    /// Pipeline finished
    Complete,
}

impl OpPhase {
    /// Get a human-readable description of this phase
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::ReadingInput => "Reading input",
            Self::Scanning => "Scanning records",
            Self::LoadingTable => "Loading translation table",
            Self::Merging => "Merging translations",
            Self::WritingOutput => "Writing output",
            Self::Complete => "Complete",
        }
    }
}

/// Progress information during a pipeline
#[derive(Debug, Clone)]
pub struct OpProgress {
    /// Current stage
    pub phase: OpPhase,
    /// Current step number (1-indexed)
    pub current: usize,
    /// Total number of steps
    pub total: usize,
    /// Extra detail for display
    pub message: Option<String>,
}

impl OpProgress {
    /// Create a new progress update
    #[must_use]
    pub fn new(phase: OpPhase, current: usize, total: usize) -> Self {
        Self {
            phase,
            current,
            total,
            message: None,
        }
    }

    /// Create a progress update with a detail message
    #[must_use]
    pub fn with_message(
        phase: OpPhase,
        current: usize,
        total: usize,
        message: impl Into<String>,
    ) -> Self {
        Self {
            phase,
            current,
            total,
            message: Some(message.into()),
        }
    }

    /// Message if set, otherwise the phase description
    #[must_use]
    pub fn describe(&self) -> &str {
        self.message.as_deref().unwrap_or(self.phase.as_str())
    }
}
