#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunStage {
    BuildingGraph,
    SelectingBoundary,
    Solving,
    Assembling,
    Completed,
}

impl RunStage {
    pub fn label(self) -> &'static str {
        match self {
            RunStage::BuildingGraph => "building graph",
            RunStage::SelectingBoundary => "selecting boundary",
            RunStage::Solving => "solving",
            RunStage::Assembling => "assembling",
            RunStage::Completed => "completed",
        }
    }
}

#[derive(Debug, Clone)]
pub struct RunProgressEvent {
    pub stage: RunStage,
    pub elapsed_wall_s: f64,
    pub message: Option<String>,
}

impl RunProgressEvent {
    pub fn stage(stage: RunStage, elapsed_wall_s: f64, message: Option<String>) -> Self {
        Self {
            stage,
            elapsed_wall_s,
            message,
        }
    }
}
