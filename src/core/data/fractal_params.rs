use crate::core::data::complex::Complex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

pub const DEFAULT_JULIA_C: Complex = Complex {
    real: -0.8,
    imag: 0.156,
};

#[derive(Debug, Clone, PartialEq, Error)]
pub enum FractalParamsError {
    #[error("maximum iterations must be greater than zero")]
    ZeroMaxIterations,
    #[error("julia constant is required for the julia set")]
    MissingJuliaConstant,
    #[error("julia constant must be finite: ({real}, {imag})")]
    NonFiniteJuliaConstant { real: f64, imag: f64 },
    #[error("palette offset must be finite: {0}")]
    NonFinitePaletteOffset(f64),
    #[error("unknown fractal kind: {0}")]
    UnknownKind(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FractalKind {
    #[default]
    Mandelbrot,
    Julia,
    BurningShip,
}

impl FractalKind {
    pub const ALL: [Self; 3] = [Self::Mandelbrot, Self::Julia, Self::BurningShip];

    #[must_use]
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Mandelbrot => "Mandelbrot",
            Self::Julia => "Julia",
            Self::BurningShip => "Burning Ship",
        }
    }

    /// Identifier used on the wire and in export file names.
    #[must_use]
    pub fn wire_name(&self) -> &'static str {
        match self {
            Self::Mandelbrot => "mandelbrot",
            Self::Julia => "julia",
            Self::BurningShip => "burningShip",
        }
    }
}

impl fmt::Display for FractalKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.wire_name())
    }
}

impl FromStr for FractalKind {
    type Err = FractalParamsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "mandelbrot" => Ok(Self::Mandelbrot),
            "julia" => Ok(Self::Julia),
            "burningShip" | "burning-ship" | "burning_ship" => Ok(Self::BurningShip),
            other => Err(FractalParamsError::UnknownKind(other.to_string())),
        }
    }
}

/// Everything besides the viewport and raster size that decides the colour of
/// a pixel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FractalParams {
    pub kind: FractalKind,
    pub julia_c: Option<Complex>,
    pub max_iterations: u32,
    pub palette_offset: f64,
}

impl FractalParams {
    #[must_use]
    pub fn mandelbrot(max_iterations: u32) -> Self {
        Self {
            kind: FractalKind::Mandelbrot,
            julia_c: None,
            max_iterations,
            palette_offset: 0.0,
        }
    }

    #[must_use]
    pub fn julia(julia_c: Complex, max_iterations: u32) -> Self {
        Self {
            kind: FractalKind::Julia,
            julia_c: Some(julia_c),
            max_iterations,
            palette_offset: 0.0,
        }
    }

    #[must_use]
    pub fn burning_ship(max_iterations: u32) -> Self {
        Self {
            kind: FractalKind::BurningShip,
            julia_c: None,
            max_iterations,
            palette_offset: 0.0,
        }
    }

    #[must_use]
    pub fn with_palette_offset(mut self, palette_offset: f64) -> Self {
        self.palette_offset = palette_offset;
        self
    }

    /// The constant the Julia kernel iterates with.
    #[must_use]
    pub fn julia_constant(&self) -> Complex {
        self.julia_c.unwrap_or(DEFAULT_JULIA_C)
    }

    pub fn validate(&self) -> Result<(), FractalParamsError> {
        if self.max_iterations == 0 {
            return Err(FractalParamsError::ZeroMaxIterations);
        }

        if !self.palette_offset.is_finite() {
            return Err(FractalParamsError::NonFinitePaletteOffset(
                self.palette_offset,
            ));
        }

        match (self.kind, self.julia_c) {
            (FractalKind::Julia, None) => Err(FractalParamsError::MissingJuliaConstant),
            (_, Some(c)) if !c.is_finite() => Err(FractalParamsError::NonFiniteJuliaConstant {
                real: c.real,
                imag: c.imag,
            }),
            _ => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fractal_kind_round_trips_through_wire_name() {
        for kind in FractalKind::ALL {
            assert_eq!(kind.wire_name().parse::<FractalKind>().unwrap(), kind);
        }
    }

    #[test]
    fn test_fractal_kind_accepts_cli_spelling() {
        assert_eq!(
            "burning-ship".parse::<FractalKind>().unwrap(),
            FractalKind::BurningShip
        );
        assert_eq!(
            "tricorn".parse::<FractalKind>(),
            Err(FractalParamsError::UnknownKind("tricorn".to_string()))
        );
    }

    #[test]
    fn test_fractal_kind_serde_names() {
        assert_eq!(
            serde_json::to_string(&FractalKind::BurningShip).unwrap(),
            "\"burningShip\""
        );
        assert_eq!(
            serde_json::from_str::<FractalKind>("\"julia\"").unwrap(),
            FractalKind::Julia
        );
    }

    #[test]
    fn test_validate_accepts_defaults() {
        assert_eq!(FractalParams::mandelbrot(100).validate(), Ok(()));
        assert_eq!(FractalParams::burning_ship(1).validate(), Ok(()));
        assert_eq!(FractalParams::julia(DEFAULT_JULIA_C, 50).validate(), Ok(()));
    }

    #[test]
    fn test_validate_rejects_zero_iterations() {
        assert_eq!(
            FractalParams::mandelbrot(0).validate(),
            Err(FractalParamsError::ZeroMaxIterations)
        );
    }

    #[test]
    fn test_validate_rejects_julia_without_constant() {
        let params = FractalParams {
            julia_c: None,
            ..FractalParams::julia(DEFAULT_JULIA_C, 100)
        };

        assert_eq!(
            params.validate(),
            Err(FractalParamsError::MissingJuliaConstant)
        );
    }

    #[test]
    fn test_validate_rejects_non_finite_values() {
        let params = FractalParams::mandelbrot(100).with_palette_offset(f64::NAN);
        assert!(matches!(
            params.validate(),
            Err(FractalParamsError::NonFinitePaletteOffset(_))
        ));

        let params = FractalParams::julia(Complex::new(f64::INFINITY, 0.0), 100);
        assert!(matches!(
            params.validate(),
            Err(FractalParamsError::NonFiniteJuliaConstant { .. })
        ));
    }

    #[test]
    fn test_julia_constant_falls_back_to_default() {
        assert_eq!(FractalParams::mandelbrot(10).julia_constant(), DEFAULT_JULIA_C);
        assert_eq!(
            FractalParams::julia(Complex::new(0.3, 0.5), 10).julia_constant(),
            Complex::new(0.3, 0.5)
        );
    }
}
