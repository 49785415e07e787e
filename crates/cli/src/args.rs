//! Value parsers for command-line arguments.

use anyhow::{Context, Result, anyhow, bail};
use font_mutator::Location;
use matrix_core::{Spot, Weights};

/// A master cell with its weights, written `B2=250/100`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MasterArg {
    pub spot: Spot,
    pub weights: Weights,
}

/// A scalar sample, written `h=0,v=100:42`.
#[derive(Debug, Clone, PartialEq)]
pub struct SampleArg {
    pub location: Location,
    pub value: f64,
}

pub fn parse_master(s: &str) -> Result<MasterArg> {
    let (spot, weights) = s.split_once('=').ok_or_else(|| anyhow!("expected SPOT=H/V, got '{s}'"))?;
    Ok(MasterArg {
        spot: spot.parse().with_context(|| format!("Invalid master '{s}'"))?,
        weights: weights.parse().with_context(|| format!("Invalid master '{s}'"))?,
    })
}

pub fn parse_sample(s: &str) -> Result<SampleArg> {
    let (location, value) =
        s.rsplit_once(':').ok_or_else(|| anyhow!("expected AXIS=V,...:VALUE, got '{s}'"))?;
    Ok(SampleArg {
        location: parse_location(location)?,
        value: value.trim().parse().with_context(|| format!("Invalid sample value in '{s}'"))?,
    })
}

/// Parse `axis=value` pairs separated by commas. An empty string is the origin.
pub fn parse_location(s: &str) -> Result<Location> {
    let mut location = Location::new();
    for pair in s.split(',').map(str::trim).filter(|p| !p.is_empty()) {
        let (axis, value) =
            pair.split_once('=').ok_or_else(|| anyhow!("expected AXIS=VALUE, got '{pair}'"))?;
        let axis = axis.trim();
        if axis.is_empty() {
            bail!("missing axis name in '{pair}'");
        }
        if location.get(axis).is_some() {
            bail!("axis '{axis}' given twice in '{s}'");
        }
        let value =
            value.trim().parse().with_context(|| format!("Invalid coordinate in '{pair}'"))?;
        location.insert(axis, value);
    }
    Ok(location)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn master() {
        let master = parse_master("B2=250/100").unwrap();
        assert_eq!(master.spot, Spot::new(1, 1));
        assert_eq!(master.weights, Weights::new(250.0, 100.0));

        assert!(parse_master("B2").is_err());
        assert!(parse_master("B0=1/1").is_err());
        assert!(parse_master("B2=1").is_err());
    }

    #[test]
    fn sample() {
        let sample = parse_sample("h=0, v=100:42.5").unwrap();
        assert_eq!(sample.location, Location::new().with("h", 0.0).with("v", 100.0));
        assert_eq!(sample.value, 42.5);

        let origin = parse_sample(":7").unwrap();
        assert!(origin.location.is_empty());
        assert!(parse_sample("h=0").is_err());
    }

    #[test]
    fn location() {
        assert_eq!(parse_location("wght=400").unwrap(), Location::new().with("wght", 400.0));
        assert!(parse_location("wght").is_err());
        assert!(parse_location("=1").is_err());
        assert!(parse_location("a=1,a=2").is_err());
        assert!(parse_location("a=x").is_err());
    }
}
