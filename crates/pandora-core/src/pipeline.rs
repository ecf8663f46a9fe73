//! Ordered step lists and the runner that executes them.
//!
//! A [`Step`] is pure data: an adjustment or filter with its parameters, or
//! a fill. A [`Preset`] is an ordered list of steps that replays identically
//! on identical input. Step lists serialize to JSON, one object per step
//! tagged by `type`:
//!
//! ```json
//! [
//!   { "type": "fill", "mode": "difference", "source": { "color": "#dc2b3b" }, "opacity": 0.22 },
//!   { "type": "adjust", "adjustment": "brightness", "params": [20] },
//!   { "type": "filter", "filter": "sepia" }
//! ]
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::adjustments::Adjustment;
use crate::error::{PandoraError, PandoraResult};
use crate::fill::{apply_fill, Fill, FillSource};
use crate::filters::Filter;
use crate::PixelBuffer;

/// One pipeline operation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Step {
    Adjust {
        adjustment: Adjustment,
        #[serde(default)]
        params: Vec<f64>,
    },
    Filter {
        filter: Filter,
        #[serde(default)]
        params: Vec<f64>,
    },
    Fill(Fill),
}

impl Step {
    pub fn adjust(adjustment: Adjustment, params: &[f64]) -> Self {
        Step::Adjust {
            adjustment,
            params: params.to_vec(),
        }
    }

    pub fn filter(filter: Filter, params: &[f64]) -> Self {
        Step::Filter {
            filter,
            params: params.to_vec(),
        }
    }

    pub fn fill(fill: Fill) -> Self {
        Step::Fill(fill)
    }

    /// Apply this step to `buffer`.
    ///
    /// On error the buffer may be partially modified; [`run`] guards against
    /// that by working on a copy.
    pub fn apply(&self, buffer: &mut PixelBuffer) -> PandoraResult<()> {
        match self {
            Step::Adjust { adjustment, params } => adjustment.apply(buffer, params),
            Step::Filter { filter, params } => filter.apply(buffer, params),
            Step::Fill(fill) => {
                apply_fill(buffer, fill);
                Ok(())
            }
        }
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Step::Adjust { adjustment, params } => write!(f, "adjust {} {:?}", adjustment, params),
            Step::Filter { filter, params } => write!(f, "filter {} {:?}", filter, params),
            Step::Fill(fill) => {
                let source = match fill.source {
                    FillSource::Color(color) => color.to_string(),
                    FillSource::Gradient(gradient) => gradient.name().to_string(),
                };
                write!(f, "fill {} {} {}", fill.mode, source, fill.opacity)
            }
        }
    }
}

/// Run `steps` over `buffer` in order.
///
/// The run is all-or-nothing: steps execute on a copy that replaces
/// `buffer` only when every step succeeded.
pub fn run(buffer: &mut PixelBuffer, steps: &[Step]) -> PandoraResult<()> {
    debug!(
        width = buffer.width,
        height = buffer.height,
        steps = steps.len(),
        "run pipeline"
    );

    let mut work = buffer.clone();
    for (index, step) in steps.iter().enumerate() {
        debug!(index, %step, "step");
        if let Err(err) = step.apply(&mut work) {
            warn!(index, %step, error = %err, "pipeline aborted");
            return Err(err);
        }
    }

    *buffer = work;
    Ok(())
}

/// An ordered, replayable list of steps.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Preset {
    pub steps: Vec<Step>,
}

impl Preset {
    pub fn new(steps: Vec<Step>) -> Self {
        Self { steps }
    }

    /// Parse a JSON array of steps.
    ///
    /// Unknown operation names and malformed steps are reported as
    /// [`PandoraError::InvalidPreset`].
    pub fn from_json(json: &str) -> PandoraResult<Self> {
        serde_json::from_str(json).map_err(|e| PandoraError::InvalidPreset(e.to_string()))
    }

    /// Serialize the step list to JSON.
    pub fn to_json(&self) -> PandoraResult<String> {
        serde_json::to_string(self).map_err(|e| PandoraError::InvalidPreset(e.to_string()))
    }

    /// Run every step over `buffer`. See [`run`].
    pub fn apply(&self, buffer: &mut PixelBuffer) -> PandoraResult<()> {
        run(buffer, &self.steps)
    }
}

impl From<Vec<Step>> for Preset {
    fn from(steps: Vec<Step>) -> Self {
        Self::new(steps)
    }
}
