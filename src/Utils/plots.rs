// Copyright (c)  by Gleb E. Zaslavkiy
//MIT License
use plotters::prelude::*;
use std::error::Error;

/// axis scales of a convergence plot
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AxisScale {
    /// both axes logarithmic (error vs sampling step)
    LogLog,
    /// linear x, logarithmic y (error vs number of Gauss points)
    SemiLogY,
}

/// points usable on the chosen axes: finite, and positive on logarithmic axes
fn plottable_points(x: &[f64], y: &[f64], scale: AxisScale) -> Vec<(f64, f64)> {
    x.iter()
        .zip(y.iter())
        .map(|(&x, &y)| (x, y))
        .filter(|&(x, y)| x.is_finite() && y.is_finite() && y > 0.0)
        .filter(|&(x, _)| scale == AxisScale::SemiLogY || x > 0.0)
        .collect()
}

/// range with some room around the data; on log axes a degenerate range is widened by a factor of 2
fn padded_range(values: impl Iterator<Item = f64>, log: bool) -> Option<(f64, f64)> {
    let (min, max) = values.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
        (lo.min(v), hi.max(v))
    });
    if !min.is_finite() || !max.is_finite() {
        return None;
    }
    if log {
        Some((min / 2.0, max * 2.0))
    } else if min == max {
        Some((min - 1.0, max + 1.0))
    } else {
        let pad = 0.05 * (max - min);
        Some((min - pad, max + pad))
    }
}

/// plot of a sampled signal, e.g. seismic velocity vs time
pub fn plot_trace(
    filename: &str,
    title: &str,
    x_desc: &str,
    y_desc: &str,
    x: &[f64],
    y: &[f64],
) -> Result<(), Box<dyn Error>> {
    let series: Vec<(f64, f64)> = x.iter().zip(y.iter()).map(|(&x, &y)| (x, y)).collect();
    let (x_min, x_max) =
        padded_range(series.iter().map(|p| p.0), false).ok_or("nothing to plot")?;
    let (y_min, y_max) =
        padded_range(series.iter().map(|p| p.1), false).ok_or("nothing to plot")?;

    let root_area = BitMapBackend::new(filename, (800, 600)).into_drawing_area();
    root_area.fill(&WHITE)?;
    let mut chart = ChartBuilder::on(&root_area)
        .caption(title, ("sans-serif", 40))
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(60)
        .build_cartesian_2d(x_min..x_max, y_min..y_max)?;

    chart.configure_mesh().x_desc(x_desc).y_desc(y_desc).draw()?;

    chart
        .draw_series(LineSeries::new(series, &Palette99::pick(0)))?
        .label(y_desc)
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], &Palette99::pick(0)));

    chart
        .configure_series_labels()
        .background_style(&WHITE.mix(0.8))
        .border_style(&BLACK)
        .draw()?;
    root_area.present()?;
    log::info!("trace plot saved to {}", filename);
    Ok(())
}

/// plot of one or more error curves, each given as (label, x, y)
pub fn plot_convergence(
    filename: &str,
    title: &str,
    x_desc: &str,
    y_desc: &str,
    curves: &[(String, Vec<f64>, Vec<f64>)],
    scale: AxisScale,
) -> Result<(), Box<dyn Error>> {
    let curves: Vec<(String, Vec<(f64, f64)>)> = curves
        .iter()
        .map(|(label, x, y)| (label.clone(), plottable_points(x, y, scale)))
        .collect();
    let all_points = || curves.iter().flat_map(|(_, points)| points.iter());
    let (y_min, y_max) =
        padded_range(all_points().map(|p| p.1), true).ok_or("no positive errors to plot")?;

    let root_area = BitMapBackend::new(filename, (800, 600)).into_drawing_area();
    root_area.fill(&WHITE)?;

    match scale {
        AxisScale::LogLog => {
            let (x_min, x_max) =
                padded_range(all_points().map(|p| p.0), true).ok_or("nothing to plot")?;
            let mut chart = ChartBuilder::on(&root_area)
                .caption(title, ("sans-serif", 40))
                .margin(10)
                .x_label_area_size(40)
                .y_label_area_size(70)
                .build_cartesian_2d((x_min..x_max).log_scale(), (y_min..y_max).log_scale())?;
            chart
                .configure_mesh()
                .x_desc(x_desc)
                .y_desc(y_desc)
                .y_label_formatter(&|y| format!("{:.0e}", y))
                .draw()?;
            for (idx, (label, points)) in curves.iter().enumerate() {
                let color = Palette99::pick(idx);
                chart
                    .draw_series(LineSeries::new(points.clone(), &color))?
                    .label(label.as_str())
                    .legend(move |(x, y)| {
                        PathElement::new(vec![(x, y), (x + 20, y)], &Palette99::pick(idx))
                    });
                chart.draw_series(
                    points
                        .iter()
                        .map(|&p| Circle::new(p, 4, Palette99::pick(idx).filled())),
                )?;
            }
            chart
                .configure_series_labels()
                .background_style(&WHITE.mix(0.8))
                .border_style(&BLACK)
                .draw()?;
        }
        AxisScale::SemiLogY => {
            let (x_min, x_max) =
                padded_range(all_points().map(|p| p.0), false).ok_or("nothing to plot")?;
            let mut chart = ChartBuilder::on(&root_area)
                .caption(title, ("sans-serif", 40))
                .margin(10)
                .x_label_area_size(40)
                .y_label_area_size(70)
                .build_cartesian_2d(x_min..x_max, (y_min..y_max).log_scale())?;
            chart
                .configure_mesh()
                .x_desc(x_desc)
                .y_desc(y_desc)
                .y_label_formatter(&|y| format!("{:.0e}", y))
                .draw()?;
            for (idx, (label, points)) in curves.iter().enumerate() {
                let color = Palette99::pick(idx);
                chart
                    .draw_series(LineSeries::new(points.clone(), &color))?
                    .label(label.as_str())
                    .legend(move |(x, y)| {
                        PathElement::new(vec![(x, y), (x + 20, y)], &Palette99::pick(idx))
                    });
                chart.draw_series(
                    points
                        .iter()
                        .map(|&p| Circle::new(p, 4, Palette99::pick(idx).filled())),
                )?;
            }
            chart
                .configure_series_labels()
                .background_style(&WHITE.mix(0.8))
                .border_style(&BLACK)
                .draw()?;
        }
    }
    root_area.present()?;
    log::info!("convergence plot saved to {}", filename);
    Ok(())
}
