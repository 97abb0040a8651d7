use crate::foundation::core::Raster;

/// A styling stage, in pipeline order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PipelineStage {
    /// Gradient recolor of dark pixels.
    Gradient,
    /// Module reshaping by carving.
    ModuleShape,
    /// Border and caption compositing.
    Frame,
    /// Centered logo overlay.
    Logo,
}

impl std::fmt::Display for PipelineStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            PipelineStage::Gradient => "gradient",
            PipelineStage::ModuleShape => "module_shape",
            PipelineStage::Frame => "frame",
            PipelineStage::Logo => "logo",
        };
        f.write_str(name)
    }
}

/// How a stage ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StageStatus {
    /// The stage ran and produced a new raster.
    Applied,
    /// The stage was not configured and passed its input through.
    Skipped,
    /// The stage failed; the pipeline continued with the stage's input.
    Failed,
}

/// One entry in the pipeline's stage log.
#[derive(Clone, Debug)]
pub struct StageEvent {
    /// Which stage the entry describes.
    pub stage: PipelineStage,
    /// How the stage ended.
    pub status: StageStatus,
    /// Failure detail, present when `status` is [`StageStatus::Failed`].
    pub message: Option<String>,
}

/// Final raster plus the per-stage outcome log.
#[derive(Clone, Debug)]
pub struct StyleReport {
    /// The styled output.
    pub raster: Raster,
    /// One event per stage, in execution order.
    pub events: Vec<StageEvent>,
}

impl StyleReport {
    /// True when no stage failed.
    pub fn succeeded(&self) -> bool {
        self.events.iter().all(|e| e.status != StageStatus::Failed)
    }

    /// The failed stages' events, in execution order.
    pub fn failures(&self) -> impl Iterator<Item = &StageEvent> {
        self.events
            .iter()
            .filter(|e| e.status == StageStatus::Failed)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/pipeline/report.rs"]
mod tests;
