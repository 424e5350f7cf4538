use gp_report::LogStatus;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunStage {
    LoadingInput,
    CheckingCache,
    LoadingCachedResult,
    ReadingModel,
    ComputingGeometry,
    RelativeMotion,
    Fatigue,
    StressCheck,
    BoreDistortion,
    CamDistortion,
    SectionForces,
    BoltForces,
    SavingResults,
    Completed,
}

impl RunStage {
    pub fn label(&self) -> &'static str {
        match self {
            RunStage::LoadingInput => "Loading input",
            RunStage::CheckingCache => "Checking cache",
            RunStage::LoadingCachedResult => "Loading cached result",
            RunStage::ReadingModel => "Reading model",
            RunStage::ComputingGeometry => "Element geometry",
            RunStage::RelativeMotion => "Relative motion",
            RunStage::Fatigue => "Fatigue",
            RunStage::StressCheck => "Stress ratio check",
            RunStage::BoreDistortion => "Bore distortion",
            RunStage::CamDistortion => "Cam distortion",
            RunStage::SectionForces => "Section forces",
            RunStage::BoltForces => "Bolt forces",
            RunStage::SavingResults => "Saving results",
            RunStage::Completed => "Completed",
        }
    }
}

#[derive(Debug, Clone)]
pub struct RunProgressEvent {
    pub stage: RunStage,
    pub elapsed_wall_s: f64,
    pub message: Option<String>,
    /// Set when the event mirrors a run log entry.
    pub status: Option<LogStatus>,
}

impl RunProgressEvent {
    pub fn stage(stage: RunStage, elapsed_wall_s: f64, message: Option<String>) -> Self {
        Self {
            stage,
            elapsed_wall_s,
            message,
            status: None,
        }
    }
}
