use crate::core::data::complex::Complex;
use crate::core::data::fractal_params::{FractalKind, FractalParams};
use crate::core::data::raster_job::{InvalidJobError, RasterJob};
use crate::core::data::viewport::Viewport;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobMessage {
    pub id: u64,
    pub width: u32,
    pub height: u32,
    pub min_re: f64,
    pub max_re: f64,
    pub min_im: f64,
    pub max_im: f64,
    pub max_iter: u32,
    pub fractal_type: FractalKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub julia_cr: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub julia_ci: Option<f64>,
    #[serde(default)]
    pub palette_offset: f64,
    #[serde(default)]
    pub preview: bool,
}

impl TryFrom<JobMessage> for RasterJob {
    type Error = InvalidJobError;

    fn try_from(message: JobMessage) -> Result<Self, Self::Error> {
        let viewport = Viewport::new(
            message.min_re,
            message.max_re,
            message.min_im,
            message.max_im,
        )?;

        // Half a constant is no constant.
        let julia_c = match (message.julia_cr, message.julia_ci) {
            (Some(real), Some(imag)) => Some(Complex::new(real, imag)),
            _ => None,
        };

        let params = FractalParams {
            kind: message.fractal_type,
            julia_c,
            max_iterations: message.max_iter,
            palette_offset: message.palette_offset,
        };

        RasterJob::new(
            message.id,
            message.width,
            message.height,
            viewport,
            params,
            message.preview,
        )
    }
}

impl From<&RasterJob> for JobMessage {
    fn from(job: &RasterJob) -> Self {
        let viewport = job.viewport();
        let params = job.params();

        Self {
            id: job.request_id(),
            width: job.width(),
            height: job.height(),
            min_re: viewport.min_re(),
            max_re: viewport.max_re(),
            min_im: viewport.min_im(),
            max_im: viewport.max_im(),
            max_iter: params.max_iterations,
            fractal_type: params.kind,
            julia_cr: params.julia_c.map(|c| c.real),
            julia_ci: params.julia_c.map(|c| c.imag),
            palette_offset: params.palette_offset,
            preview: job.preview(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::data::fractal_params::FractalParamsError;
    use crate::core::data::viewport::ViewportError;

    fn message() -> JobMessage {
        serde_json::from_str(
            r#"{
                "id": 7,
                "width": 320,
                "height": 200,
                "minRe": -2.5,
                "maxRe": 1.0,
                "minIm": -1.1,
                "maxIm": 1.1,
                "maxIter": 150,
                "fractalType": "burningShip",
                "paletteOffset": 0.25,
                "preview": true
            }"#,
        )
        .unwrap()
    }

    #[test]
    fn test_parses_wire_json_into_job() {
        let job = RasterJob::try_from(message()).unwrap();

        assert_eq!(job.request_id(), 7);
        assert_eq!((job.width(), job.height()), (320, 200));
        assert_eq!(job.params().kind, FractalKind::BurningShip);
        assert_eq!(job.params().max_iterations, 150);
        assert_eq!(job.params().julia_c, None);
        assert!(job.preview());
    }

    #[test]
    fn test_optional_fields_default() {
        let json = r#"{"id":1,"width":1,"height":1,"minRe":0,"maxRe":1,"minIm":0,"maxIm":1,"maxIter":1,"fractalType":"mandelbrot"}"#;
        let message: JobMessage = serde_json::from_str(json).unwrap();

        assert_eq!(message.palette_offset, 0.0);
        assert!(!message.preview);
    }

    #[test]
    fn test_julia_without_constant_is_invalid() {
        let message = JobMessage {
            fractal_type: FractalKind::Julia,
            julia_cr: Some(0.3),
            ..message()
        };

        assert_eq!(
            RasterJob::try_from(message),
            Err(InvalidJobError::Params(FractalParamsError::MissingJuliaConstant))
        );
    }

    #[test]
    fn test_inverted_bounds_are_invalid() {
        let message = JobMessage {
            min_re: 1.0,
            max_re: -1.0,
            ..message()
        };

        assert!(matches!(
            RasterJob::try_from(message),
            Err(InvalidJobError::Viewport(ViewportError::InvalidSize { .. }))
        ));
    }

    #[test]
    fn test_zero_iterations_are_invalid() {
        let message = JobMessage {
            max_iter: 0,
            ..message()
        };

        assert_eq!(
            RasterJob::try_from(message),
            Err(InvalidJobError::Params(FractalParamsError::ZeroMaxIterations))
        );
    }

    #[test]
    fn test_job_serializes_with_julia_constant() {
        let viewport = Viewport::new(-1.5, 1.5, -1.0, 1.0).unwrap();
        let job = RasterJob::new(
            3,
            30,
            20,
            viewport,
            FractalParams::julia(Complex::new(-0.4, 0.6), 90),
            false,
        )
        .unwrap();

        let json = serde_json::to_value(JobMessage::from(&job)).unwrap();

        assert_eq!(json["fractalType"], "julia");
        assert_eq!(json["juliaCr"], -0.4);
        assert_eq!(json["juliaCi"], 0.6);
        assert_eq!(json["maxIter"], 90);
        assert_eq!(RasterJob::try_from(JobMessage::from(&job)).unwrap(), job);
    }
}
