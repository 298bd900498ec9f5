//! Application services - Use case implementations

mod route_orchestrator;

pub use route_orchestrator::{
    MapSnapshot, NavigationPhase, OperationOutcome, OrchestratorConfig, RouteOrchestrator,
    ZOOM_IN_FACTOR, ZOOM_OUT_FACTOR,
};
