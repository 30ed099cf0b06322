use crate::coord::Coordinate;
use serde::Serialize;

/// A non-fatal advisory attached to an operation's result.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Warning {
    /// The position is inside the region but within the boundary margin.
    NearBoundary { margin_degrees: f64 },
    /// A search radius (in cells) was reduced to the supported maximum.
    RadiusCapped { requested: u64, applied: u32 },
    /// The search center lies outside the region, so nothing was searched.
    OutsideRegion { coordinate: Coordinate },
    /// A metre radius is larger than any sensible search within the region.
    LargeRadius { meters: f64 },
}

impl std::fmt::Display for Warning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Warning::NearBoundary { margin_degrees } => write!(
                f,
                "near region boundary ({:.4} degrees from the edge)",
                margin_degrees
            ),
            Warning::RadiusCapped { requested, applied } => {
                write!(f, "radius capped at {} cells (requested {})", applied, requested)
            }
            Warning::OutsideRegion { coordinate } => {
                write!(f, "search center {} is outside the region", coordinate)
            }
            Warning::LargeRadius { meters } => {
                write!(f, "radius of {:.0} m exceeds the region scale", meters)
            }
        }
    }
}

/// A value together with the warnings raised while producing it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Annotated<T> {
    pub value: T,
    pub warnings: Vec<Warning>,
}

impl<T> Annotated<T> {
    pub fn new(value: T) -> Self {
        Self {
            value,
            warnings: Vec::new(),
        }
    }

    pub fn with_warnings(value: T, warnings: Vec<Warning>) -> Self {
        Self { value, warnings }
    }

    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    pub fn into_inner(self) -> T {
        self.value
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Annotated<U> {
        Annotated {
            value: f(self.value),
            warnings: self.warnings,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_annotated_map_keeps_warnings() {
        let annotated = Annotated::with_warnings(
            vec![1, 2, 3],
            vec![Warning::RadiusCapped {
                requested: 250,
                applied: 100,
            }],
        );
        let mapped = annotated.map(|v| v.len());

        assert_eq!(mapped.value, 3);
        assert!(mapped.has_warnings());
        assert_eq!(mapped.warnings[0].to_string(), "radius capped at 100 cells (requested 250)");
    }

    #[test]
    fn test_new_has_no_warnings() {
        let annotated = Annotated::new("value");
        assert!(!annotated.has_warnings());
        assert_eq!(annotated.into_inner(), "value");
    }
}
