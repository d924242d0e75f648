use std::num::NonZeroU32;
use std::sync::mpsc::Receiver;
use std::time::{Duration, Instant};

use fractal_explorer::{
    Band, BandMessage, BandOutcome, ChannelMessagePort, Complex, ControllerState, ExplorerConfig,
    ExplorerSession, FractalKind, FractalParams, JobMessage, NeverCancel, PaletteCache, PixelBuffer,
    RasterJob, RasterWorker, RasterizeOptions, RenderJobController, Viewport, WorkerMessage,
    ZoomDirection, evaluate, rasterize_cancelable,
};

const TIMEOUT: Duration = Duration::from_secs(20);

fn options(band_height: u32) -> RasterizeOptions {
    RasterizeOptions {
        band_height: NonZeroU32::new(band_height).unwrap(),
        smooth_colouring: true,
    }
}

/// Renders `job` synchronously into a full image.
fn reference_image(job: &RasterJob, band_height: u32) -> PixelBuffer {
    let mut image = PixelBuffer::new(job.width(), job.height());
    rasterize_cancelable(
        job,
        options(band_height),
        &mut PaletteCache::default(),
        &NeverCancel,
        &mut |band: Band| {
            image.write_rows(band.y_start(), band.pixels());
        },
    )
    .unwrap();
    image
}

/// Feeds worker messages to the controller until `request_id` completes.
fn pump_until_complete<D: fractal_explorer::JobDispatcher>(
    controller: &mut RenderJobController<D>,
    receiver: &Receiver<WorkerMessage>,
    request_id: u64,
) -> Vec<BandOutcome> {
    let mut outcomes = Vec::new();

    loop {
        let message = receiver.recv_timeout(TIMEOUT).expect("worker stalled");
        let outcome = controller.on_worker_message(message).expect("band message");
        outcomes.push(outcome);

        if outcome == (BandOutcome::Completed { request_id }) {
            return outcomes;
        }
    }
}

#[test]
fn test_worker_render_matches_synchronous_render() {
    let (port, receiver) = ChannelMessagePort::channel();
    let worker = RasterWorker::spawn(options(7), port).unwrap();
    let mut controller = RenderJobController::new(worker);
    let viewport = Viewport::default_framing(48, 30).unwrap();
    let params = FractalParams::burning_ship(120).with_palette_offset(0.3);

    let id = controller.submit(viewport, params, 48, 30, false).unwrap();
    let outcomes = pump_until_complete(&mut controller, &receiver, id);

    // 30 rows in bands of 7: 7, 7, 7, 7, 2
    assert_eq!(outcomes.len(), 5);
    assert_eq!(controller.state(), ControllerState::Idle);
    assert_eq!(controller.last_completed(), id);

    let job = RasterJob::new(id, 48, 30, viewport, params, false).unwrap();
    assert_eq!(controller.surface().buffer(), &reference_image(&job, 7));
}

#[test]
fn test_superseded_job_never_reaches_the_surface() {
    let (port, receiver) = ChannelMessagePort::channel();
    let worker = RasterWorker::spawn(options(1), port).unwrap();
    let mut controller = RenderJobController::new(worker);
    let viewport = Viewport::default_framing(64, 64).unwrap();

    let first = controller
        .submit(viewport, FractalParams::mandelbrot(400), 64, 64, false)
        .unwrap();
    let second = controller
        .submit(viewport, FractalParams::julia(fractal_explorer::DEFAULT_JULIA_C, 50), 16, 16, true)
        .unwrap();

    let outcomes = pump_until_complete(&mut controller, &receiver, second);
    let composited = outcomes
        .iter()
        .filter(|outcome| !matches!(outcome, BandOutcome::Stale))
        .count();

    assert!(first < second);
    assert_eq!(composited, 16);
    assert_eq!(controller.surface().buffer().width(), 16);
}

#[test]
fn test_session_drives_preview_then_final_render() {
    let (port, receiver) = ChannelMessagePort::channel();
    let config = ExplorerConfig {
        band_height: 8,
        ..ExplorerConfig::default()
    };
    let worker = RasterWorker::spawn(config.rasterize_options(), port).unwrap();
    let mut session = ExplorerSession::new(worker, config, 40, 30).unwrap();
    let start = Instant::now();

    session.set_fractal_kind(FractalKind::Julia).unwrap();
    let initial = session.frame(start).unwrap().unwrap();

    session
        .zoom_steps(3, ZoomDirection::In, None, start)
        .unwrap();
    let preview = session.frame(start).unwrap().unwrap();
    assert_eq!(session.raster_size(), (20, 15));

    let settled = start + Duration::from_millis(200);
    let final_render = session.frame(settled).unwrap().unwrap();
    assert!(initial < preview && preview < final_render);

    let deadline = Instant::now() + TIMEOUT;
    while session.controller().last_completed() != final_render {
        assert!(Instant::now() < deadline, "final render never completed");
        if let Ok(message) = receiver.recv_timeout(Duration::from_millis(50)) {
            session.on_worker_message(message);
        }
    }

    assert_eq!(session.surface().width(), 40);
    assert_eq!(session.surface().height(), 30);
    assert!(session.surface().pixels().chunks_exact(4).all(|p| p[3] == 255));
}

#[test]
fn test_wire_messages_describe_worker_output() {
    let json = r#"{"id":5,"width":12,"height":9,"minRe":-2,"maxRe":1,"minIm":-1.2,"maxIm":1.2,"maxIter":40,"fractalType":"mandelbrot"}"#;
    let message: JobMessage = serde_json::from_str(json).unwrap();
    let job = RasterJob::try_from(message).unwrap();

    let (port, receiver) = ChannelMessagePort::channel();
    let worker = RasterWorker::spawn(options(4), port).unwrap();
    let mut controller = RenderJobController::new(worker);
    let id = controller
        .submit(*job.viewport(), *job.params(), job.width(), job.height(), job.preview())
        .unwrap();

    let message = receiver.recv_timeout(TIMEOUT).unwrap();
    let WorkerMessage::Band(band) = message else {
        panic!("expected a band, got {message:?}");
    };
    let wire = BandMessage::from_band(&band, job.height());

    assert_eq!(wire.id, id);
    assert_eq!(wire.height, 9);
    assert_eq!(wire.y_start, 0);
    assert_eq!(wire.band_height, 4);
    assert_eq!(wire.buffer.len(), 12 * 4 * 4);
    assert_eq!(Band::try_from(wire).unwrap(), band);
}

#[test]
fn test_orbits_start_at_the_pixel() {
    // 1 -> 2 -> 5 escapes on the second step, inside a budget of three
    let near = evaluate(FractalKind::Mandelbrot, Complex::new(1.0, 0.0), 3, None);
    assert_eq!(near.iterations, 2);
    assert!(!near.is_inside(3));

    let far = Complex::new(-2.5, 0.5);
    for kind in [FractalKind::Mandelbrot, FractalKind::BurningShip, FractalKind::Julia] {
        assert_eq!(evaluate(kind, far, 100, None).iterations, 0, "{kind:?}");
    }
}
