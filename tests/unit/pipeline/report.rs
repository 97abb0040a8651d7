use super::*;
use crate::foundation::core::{Raster, Rgba8Premul};

fn raster() -> Raster {
    Raster::new(2, 2, Rgba8Premul::transparent()).unwrap()
}

fn event(stage: PipelineStage, status: StageStatus) -> StageEvent {
    StageEvent {
        stage,
        status,
        message: match status {
            StageStatus::Failed => Some("boom".to_string()),
            _ => None,
        },
    }
}

#[test]
fn report_without_failures_succeeds() {
    let report = StyleReport {
        raster: raster(),
        events: vec![
            event(PipelineStage::Gradient, StageStatus::Applied),
            event(PipelineStage::ModuleShape, StageStatus::Skipped),
        ],
    };
    assert!(report.succeeded());
    assert_eq!(report.failures().count(), 0);
}

#[test]
fn one_failed_stage_fails_the_report() {
    let report = StyleReport {
        raster: raster(),
        events: vec![
            event(PipelineStage::Gradient, StageStatus::Applied),
            event(PipelineStage::Logo, StageStatus::Failed),
        ],
    };
    assert!(!report.succeeded());
    let failures: Vec<_> = report.failures().collect();
    assert_eq!(failures.len(), 1);
    assert_eq!(failures[0].stage, PipelineStage::Logo);
    assert_eq!(failures[0].message.as_deref(), Some("boom"));
}

#[test]
fn stage_names_are_stable() {
    assert_eq!(PipelineStage::Gradient.to_string(), "gradient");
    assert_eq!(PipelineStage::ModuleShape.to_string(), "module_shape");
    assert_eq!(PipelineStage::Frame.to_string(), "frame");
    assert_eq!(PipelineStage::Logo.to_string(), "logo");
}
