//! Plain-text rendering of the map state

use std::fmt::Write;

use application::{MapSnapshot, NavigationPhase, OperationOutcome};
use domain::value_objects::TransportMode;

/// Multi-line description of everything the map screen would show
pub fn render_snapshot(snapshot: &MapSnapshot) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "Status:      {}", phase_label(snapshot.phase()));
    let _ = writeln!(out, "Mode:        {}", snapshot.transport_mode);
    if !snapshot.query.is_empty() {
        let _ = writeln!(out, "Query:       {}", snapshot.query);
    }
    match &snapshot.destination {
        Some(place) => {
            let _ = writeln!(out, "Destination: {place}");
        },
        None => {
            let _ = writeln!(out, "Destination: none");
        },
    }
    if let Some(summary) = snapshot.route_summary() {
        let points = snapshot.route.as_ref().map_or(0, |r| r.polyline().len());
        let _ = writeln!(out, "Route:       {summary} ({points} points)");
    }
    let _ = writeln!(out, "Camera:      {}", snapshot.camera);

    let _ = writeln!(out, "Markers:");
    for marker in snapshot.markers() {
        let _ = writeln!(
            out,
            "  [{}] {} @ {}",
            marker.kind.tint(),
            marker.label,
            marker.location
        );
    }

    if let Some(error) = &snapshot.error_message {
        let _ = writeln!(out, "Error:       {error}");
    }
    out
}

/// One line per transport mode with its routing profile
pub fn render_modes(current: Option<TransportMode>) -> String {
    let mut out = String::new();
    for mode in TransportMode::ALL {
        let marker = if Some(mode) == current { "*" } else { " " };
        let _ = writeln!(out, "{marker} {:<8}{}", mode.label(), mode.routing_profile());
    }
    out
}

/// Lifecycle phase as shown on the status line
pub const fn phase_label(phase: NavigationPhase) -> &'static str {
    match phase {
        NavigationPhase::Idle => "idle",
        NavigationPhase::DestinationSelected => "destination selected, no route",
        NavigationPhase::Routed => "routed",
    }
}

/// Short status word for an operation outcome
pub const fn outcome_label(outcome: OperationOutcome) -> &'static str {
    match outcome {
        OperationOutcome::Applied => "ok",
        OperationOutcome::Failed => "failed",
        OperationOutcome::Superseded => "superseded",
        OperationOutcome::Skipped => "skipped",
    }
}
