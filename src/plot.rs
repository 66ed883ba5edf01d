//! Training-curve plots.

use std::collections::HashMap;
use std::fmt::Display;
use std::path::{Path, PathBuf};

use plotters::prelude::*;

use crate::error::{Error, Result};
use crate::image::with_default_extension;

/// Pixel size of rendered loss plots.
pub const PLOT_SIZE: (u32, u32) = (800, 600);

const TITLE: &str = "Loss over epochs";

/// A named per-epoch series.
#[derive(Debug, Clone, PartialEq)]
pub struct LossCurve {
    /// Legend label.
    pub name: String,
    /// One value per epoch.
    pub values: Vec<f64>,
}

/// Ordered loss curves sharing one sequence of epoch indices.
///
/// Curves keep insertion order, which is also the legend order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LossHistory {
    epochs: Vec<u32>,
    curves: Vec<LossCurve>,
}

impl LossHistory {
    /// Create an empty history over the given epoch indices.
    #[must_use]
    pub fn new(epochs: Vec<u32>) -> Self {
        Self {
            epochs,
            curves: Vec::new(),
        }
    }

    /// Builder form of [`insert`](Self::insert).
    #[must_use]
    pub fn with_curve(mut self, name: impl Into<String>, values: Vec<f64>) -> Self {
        self.insert(name, values);
        self
    }

    /// Add a curve, replacing an existing curve of the same name in place.
    pub fn insert(&mut self, name: impl Into<String>, values: Vec<f64>) {
        let name = name.into();
        match self.curves.iter_mut().find(|c| c.name == name) {
            Some(curve) => curve.values = values,
            None => self.curves.push(LossCurve { name, values }),
        }
    }

    /// Build a history from a training log holding a `loss` curve and,
    /// optionally, a `val_loss` curve. Other keys are ignored.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidParameter`] if `loss` is missing.
    pub fn from_training(history: &HashMap<String, Vec<f64>>, epochs: &[u32]) -> Result<Self> {
        let loss = history
            .get("loss")
            .ok_or_else(|| Error::invalid("history", "no `loss` curve"))?;

        let mut losses = Self::new(epochs.to_vec()).with_curve("loss", loss.clone());
        if let Some(val_loss) = history.get("val_loss") {
            losses.insert("val_loss", val_loss.clone());
        }
        Ok(losses)
    }

    /// Epoch indices, one per value of every curve.
    #[must_use]
    pub fn epochs(&self) -> &[u32] {
        &self.epochs
    }

    /// Curves in insertion order.
    #[must_use]
    pub fn curves(&self) -> &[LossCurve] {
        &self.curves
    }

    /// Values of the curve called `name`, if present.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&[f64]> {
        self.curves
            .iter()
            .find(|c| c.name == name)
            .map(|c| c.values.as_slice())
    }

    fn validate(&self) -> Result<()> {
        if self.epochs.is_empty() {
            return Err(Error::invalid("epochs", "at least one epoch is required"));
        }
        if self.curves.is_empty() {
            return Err(Error::invalid("history", "at least one curve is required"));
        }

        for curve in &self.curves {
            if curve.values.len() != self.epochs.len() {
                return Err(Error::shape(
                    format!("{} values (one per epoch)", self.epochs.len()),
                    format!("{} values in `{}`", curve.values.len(), curve.name),
                ));
            }
            if curve.values.iter().any(|v| !v.is_finite()) {
                return Err(Error::invalid(
                    "history",
                    format!("`{}` contains non-finite values", curve.name),
                ));
            }
        }

        Ok(())
    }

    /// Padded `(min, max)` over every curve value.
    fn value_bounds(&self) -> Option<(f64, f64)> {
        let mut values = self.curves.iter().flat_map(|c| c.values.iter().copied());
        let first = values.next()?;
        let (min, max) = values.fold((first, first), |(lo, hi), v| (lo.min(v), hi.max(v)));

        let pad = if max > min { (max - min) * 0.05 } else { 1.0 };
        Some((min - pad, max + pad))
    }
}

/// Plot every curve of `history` against its epoch indices and save it.
///
/// Each curve is a marked line; the chart is titled "Loss over epochs", the
/// x axis is labelled "Epochs" with epoch tick labels, and the legend sits in
/// the upper-right corner. A `.png` extension is appended when `path` has
/// none.
///
/// # Errors
///
/// Returns [`Error::InvalidParameter`] for an empty history or non-finite
/// values, [`Error::Shape`] if a curve length differs from the epoch count, and
/// [`Error::Plot`] if rendering or writing fails.
pub fn save_loss_plot<P: AsRef<Path>>(path: P, history: &LossHistory) -> Result<PathBuf> {
    let path = with_default_extension(path.as_ref());
    history.validate()?;

    tracing::info!(
        "Plotting {} curves over {} epochs to {}",
        history.curves.len(),
        history.epochs.len(),
        path.display()
    );

    render(&path, history)?;
    Ok(path)
}

/// Plot the `loss` (and, if present, `val_loss`) curves of a training log.
///
/// # Errors
///
/// Same as [`save_loss_plot`], plus [`Error::InvalidParameter`] when the log
/// has no `loss` curve.
pub fn save_history_loss<P: AsRef<Path>>(
    path: P,
    history: &HashMap<String, Vec<f64>>,
    epochs: &[u32],
) -> Result<PathBuf> {
    save_loss_plot(path, &LossHistory::from_training(history, epochs)?)
}

fn render(path: &Path, history: &LossHistory) -> Result<()> {
    let plot_err = plot_error(path);

    let epochs: Vec<i64> = history.epochs.iter().map(|&e| i64::from(e)).collect();
    let x_min = epochs.iter().copied().min().unwrap_or(0);
    let x_max = epochs.iter().copied().max().unwrap_or(0);
    let (y_min, y_max) = history.value_bounds().unwrap_or((0.0, 1.0));

    let root = BitMapBackend::new(path, PLOT_SIZE).into_drawing_area();
    root.fill(&WHITE).map_err(&plot_err)?;

    let mut chart = ChartBuilder::on(&root)
        .margin(20)
        .caption(TITLE, ("sans-serif", 24))
        .x_label_area_size(40)
        .y_label_area_size(60)
        .build_cartesian_2d(
            ((x_min - 1)..(x_max + 1)).with_key_points(epochs.clone()),
            y_min..y_max,
        )
        .map_err(&plot_err)?;

    chart
        .configure_mesh()
        .x_desc("Epochs")
        .y_desc("Loss")
        .x_label_formatter(&|x| x.to_string())
        .draw()
        .map_err(&plot_err)?;

    for (idx, curve) in history.curves.iter().enumerate() {
        let color = Palette99::pick(idx).to_rgba();
        let points: Vec<(i64, f64)> = epochs.iter().copied().zip(curve.values.iter().copied()).collect();

        chart
            .draw_series(LineSeries::new(points.clone(), color.stroke_width(2)))
            .map_err(&plot_err)?
            .label(curve.name.as_str())
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], color.stroke_width(2)));

        chart
            .draw_series(points.into_iter().map(|p| Circle::new(p, 3, color.filled())))
            .map_err(&plot_err)?;
    }

    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::UpperRight)
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .draw()
        .map_err(&plot_err)?;

    root.present().map_err(&plot_err)?;
    Ok(())
}

fn plot_error<E: Display>(path: &Path) -> impl Fn(E) -> Error + '_ {
    move |err| Error::Plot {
        path: path.to_path_buf(),
        reason: err.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn training_log() -> HashMap<String, Vec<f64>> {
        HashMap::from([
            ("loss".to_string(), vec![1.0, 0.6, 0.4]),
            ("val_loss".to_string(), vec![1.1, 0.8, 0.7]),
            ("accuracy".to_string(), vec![0.2, 0.5, 0.7]),
        ])
    }

    #[test]
    fn test_from_training_picks_loss_curves() {
        let history = LossHistory::from_training(&training_log(), &[1, 2, 3]).unwrap();
        let names: Vec<&str> = history.curves().iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["loss", "val_loss"]);
        assert_eq!(history.get("val_loss"), Some(&[1.1, 0.8, 0.7][..]));
        assert!(history.get("accuracy").is_none());
    }

    #[test]
    fn test_from_training_requires_loss() {
        let log = HashMap::from([("val_loss".to_string(), vec![1.0])]);
        assert!(matches!(
            LossHistory::from_training(&log, &[1]),
            Err(Error::InvalidParameter { .. })
        ));
    }

    #[test]
    fn test_insert_replaces_in_place() {
        let mut history = LossHistory::new(vec![1, 2])
            .with_curve("loss", vec![2.0, 1.0])
            .with_curve("val_loss", vec![3.0, 2.0]);
        history.insert("loss", vec![0.5, 0.25]);
        assert_eq!(history.curves()[0].values, vec![0.5, 0.25]);
        assert_eq!(history.curves().len(), 2);
    }

    #[test]
    fn test_value_bounds() {
        let history = LossHistory::new(vec![1, 2]).with_curve("loss", vec![0.0, 10.0]);
        assert_eq!(history.value_bounds(), Some((-0.5, 10.5)));

        let flat = LossHistory::new(vec![1]).with_curve("loss", vec![2.0]);
        assert_eq!(flat.value_bounds(), Some((1.0, 3.0)));
    }

    #[test]
    fn test_rejects_invalid_histories() {
        let dir = tempdir().unwrap();
        let out = dir.path().join("loss");

        let no_epochs = LossHistory::new(Vec::new()).with_curve("loss", Vec::new());
        assert!(matches!(
            save_loss_plot(&out, &no_epochs),
            Err(Error::InvalidParameter { .. })
        ));

        let short = LossHistory::new(vec![1, 2, 3]).with_curve("loss", vec![1.0]);
        assert!(matches!(save_loss_plot(&out, &short), Err(Error::Shape { .. })));

        let nan = LossHistory::new(vec![1]).with_curve("loss", vec![f64::NAN]);
        assert!(matches!(
            save_loss_plot(&out, &nan),
            Err(Error::InvalidParameter { .. })
        ));

        assert!(!out.with_extension("png").exists());
    }

    #[test]
    fn test_render_history() {
        let dir = tempdir().unwrap();
        let path = save_history_loss(dir.path().join("loss"), &training_log(), &[1, 2, 3]).unwrap();
        assert_eq!(path, dir.path().join("loss.png"));

        let img = ::image::open(&path).unwrap();
        assert_eq!((img.width(), img.height()), PLOT_SIZE);
    }

    #[test]
    fn test_render_sparse_epochs() {
        let dir = tempdir().unwrap();
        let history = LossHistory::new(vec![10, 20, 30]).with_curve("loss", vec![0.9, 0.5, 0.3]);
        let path = save_loss_plot(dir.path().join("sparse.png"), &history).unwrap();
        assert!(path.exists());
    }
}
