//! Scatter plot rendering for the paired sample.

use crate::Result;
use crate::report::{PairedSample, Verdict};

use plotters::prelude::*;

/// Fixed axis range in seconds, both axes, log scale.
pub const AXIS_MIN_SECS: f64 = 0.1;
pub const AXIS_MAX_SECS: f64 = 3600.0;

/// Square canvas so the y = x diagonal reads at 45 degrees.
const PLOT_SIZE: (u32, u32) = (800, 800);

/// Keep a point inside the fixed axis range. Sub-0.1s runs land on the
/// axis edge instead of drifting into the label margin.
fn clamp_to_axis(secs: f64) -> f64 {
    secs.clamp(AXIS_MIN_SECS, AXIS_MAX_SECS)
}

/// Render the log-log comparison scatter to `out` (PNG, overwritten).
///
/// x = baseline seconds, y = treatment seconds, green below the diagonal
/// (treatment faster), red on or above it, with a y = x reference line.
pub fn render_scatter(sample: &PairedSample, out: &str) -> Result<()> {
    let root = BitMapBackend::new(out, PLOT_SIZE).into_drawing_area();
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root)
        .caption(
            "Pono wall clock time: baseline vs treatment",
            ("sans-serif", 24),
        )
        .margin(20)
        .set_label_area_size(LabelAreaPosition::Left, 60)
        .set_label_area_size(LabelAreaPosition::Bottom, 40)
        .build_cartesian_2d(
            (AXIS_MIN_SECS..AXIS_MAX_SECS).log_scale(),
            (AXIS_MIN_SECS..AXIS_MAX_SECS).log_scale(),
        )?;

    chart
        .configure_mesh()
        .x_desc("Baseline time (s)")
        .y_desc("Treatment time (s)")
        .x_label_style(("sans-serif", 15))
        .y_label_style(("sans-serif", 15))
        .draw()?;

    chart
        .draw_series(LineSeries::new(
            vec![
                (AXIS_MIN_SECS, AXIS_MIN_SECS),
                (AXIS_MAX_SECS, AXIS_MAX_SECS),
            ],
            BLACK.stroke_width(1),
        ))?
        .label("y = x")
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], BLACK));

    let points = |verdict: Verdict| {
        sample
            .runs
            .iter()
            .filter(move |r| r.verdict == verdict)
            .map(|r| (clamp_to_axis(r.baseline_secs), clamp_to_axis(r.treatment_secs)))
    };

    chart
        .draw_series(
            points(Verdict::Improved).map(|xy| Circle::new(xy, 3, GREEN.mix(0.5).filled())),
        )?
        .label("treatment faster")
        .legend(|(x, y)| Circle::new((x + 10, y), 3, GREEN.filled()));

    chart
        .draw_series(
            points(Verdict::Regressed).map(|xy| Circle::new(xy, 3, RED.mix(0.5).filled())),
        )?
        .label("treatment slower")
        .legend(|(x, y)| Circle::new((x + 10, y), 3, RED.filled()));

    chart
        .configure_series_labels()
        .background_style(WHITE.filled())
        .border_style(BLACK)
        .position(SeriesLabelPosition::UpperLeft)
        .draw()?;

    root.present()?;
    Ok(())
}
