//! Line commands of the interactive session

use std::str::FromStr;

use domain::value_objects::{GeoLocation, TransportMode};

pub const HELP: &str = "\
Commands:
  search <text>        find a destination and route to it
  mode <auto|transit|walk|cycle>
  zoom <in|out|factor> zoom around the last panned position
  pan <lat> <lon>      move the map center
  locate <lat> <lon>   report a location fix
  show                 print the map state
  help                 this text
  quit                 leave";

/// A parsed session command
#[derive(Debug, Clone, PartialEq)]
pub enum SessionCommand {
    Search(String),
    Mode(TransportMode),
    ZoomIn,
    ZoomOut,
    Zoom(f64),
    Pan(GeoLocation),
    Locate(GeoLocation),
    Show,
    Help,
    Quit,
}

impl FromStr for SessionCommand {
    type Err = String;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim();
        let (verb, rest) = line
            .split_once(char::is_whitespace)
            .map_or((line, ""), |(verb, rest)| (verb, rest.trim()));

        match verb.to_lowercase().as_str() {
            "search" | "s" => {
                if rest.is_empty() {
                    Err("usage: search <text>".to_string())
                } else {
                    Ok(Self::Search(rest.to_string()))
                }
            },
            "mode" | "m" => rest
                .parse()
                .map(Self::Mode)
                .map_err(|e: domain::DomainError| e.to_string()),
            "zoom" | "z" => match rest {
                "in" | "+" => Ok(Self::ZoomIn),
                "out" | "-" => Ok(Self::ZoomOut),
                factor => factor
                    .parse()
                    .map(Self::Zoom)
                    .map_err(|_| format!("invalid zoom factor: {factor}")),
            },
            "pan" => parse_location(rest).map(Self::Pan),
            "locate" => parse_location(rest).map(Self::Locate),
            "show" | "" => Ok(Self::Show),
            "help" | "?" => Ok(Self::Help),
            "quit" | "exit" | "q" => Ok(Self::Quit),
            other => Err(format!("unknown command: {other} (try 'help')")),
        }
    }
}

/// `<lat> <lon>`, separated by whitespace or a comma
fn parse_location(text: &str) -> Result<GeoLocation, String> {
    let parts: Vec<&str> = text
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|part| !part.is_empty())
        .collect();
    let [lat, lon] = parts.as_slice() else {
        return Err("expected: <lat> <lon>".to_string());
    };
    let lat: f64 = lat.parse().map_err(|_| format!("invalid latitude: {lat}"))?;
    let lon: f64 = lon.parse().map_err(|_| format!("invalid longitude: {lon}"))?;
    GeoLocation::new(lat, lon).map_err(|e| e.to_string())
}
