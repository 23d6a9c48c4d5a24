//! Pie-chart slice geometry.
//!
//! A [`PieChart`] turns raw counts into angular slices. Each [`PieSlice`]
//! carries a fan outline (centre followed by the tessellated arc) ready to
//! be filled as a polygon, and a label anchor just outside the rim.

use std::collections::BTreeMap;

use crate::error::{Error, Result};
use crate::geometry::{Point, Polygon};
use crate::raster::arc_points;

/// Per-slice adjustment of the label anchor.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "config", derive(serde::Serialize, serde::Deserialize))]
pub struct LabelPlacement {
    /// Extra distance from the rim, added to [`PieLayout::label_offset`].
    #[cfg_attr(feature = "config", serde(default))]
    pub radius_offset: f32,
    /// Rotation of the anchor away from the slice's mid-angle, in degrees.
    #[cfg_attr(feature = "config", serde(default))]
    pub angular_offset_deg: f32,
}

/// Layout parameters shared by every slice of a chart.
#[derive(Debug, Clone, PartialEq)]
pub struct PieLayout {
    /// Angle of the first slice's leading edge, in degrees counter-clockwise
    /// from the positive x axis.
    pub start_deg: f32,
    /// Distance of label anchors beyond the rim.
    pub label_offset: f32,
    /// Maximum distance between the tessellated outline and the true arc.
    pub tolerance: f32,
    /// Placement overrides keyed by slice index.
    pub overrides: BTreeMap<usize, LabelPlacement>,
}

impl Default for PieLayout {
    fn default() -> Self {
        Self { start_deg: 0.0, label_offset: 0.15, tolerance: 0.001, overrides: BTreeMap::new() }
    }
}

impl PieLayout {
    /// Add or replace the label override for slice `index`.
    #[must_use]
    pub fn with_override(mut self, index: usize, placement: LabelPlacement) -> Self {
        self.overrides.insert(index, placement);
        self
    }

    fn placement(&self, index: usize) -> LabelPlacement {
        self.overrides.get(&index).copied().unwrap_or_default()
    }
}

/// One slice of a pie chart.
#[derive(Debug, Clone, PartialEq)]
pub struct PieSlice {
    /// Position of the value in the chart's input.
    pub index: usize,
    /// Leading edge angle in degrees.
    pub start_deg: f32,
    /// Angular extent in degrees.
    pub sweep_deg: f32,
    /// Share of the total, in `[0, 1]`.
    pub fraction: f32,
    /// Fan outline: the centre, then arc points from start to end.
    pub outline: Vec<Point>,
    /// Where the slice's label should be drawn.
    pub label_anchor: Point,
    /// Name given to the value, if any.
    pub label: Option<String>,
}

impl PieSlice {
    /// Share of the total as a percentage.
    #[must_use]
    pub fn percentage(&self) -> f32 {
        self.fraction * 100.0
    }

    /// Label text: `"Name (xx.x%)"`, or just the percentage when the slice
    /// has no name.
    #[must_use]
    pub fn caption(&self) -> String {
        match &self.label {
            Some(name) => format!("{name} ({:.1}%)", self.percentage()),
            None => format!("{:.1}%", self.percentage()),
        }
    }

    /// Angle halfway through the slice, in degrees.
    #[must_use]
    pub fn mid_deg(&self) -> f32 {
        self.start_deg + self.sweep_deg / 2.0
    }

    /// The outline as a closed polygon for filling.
    ///
    /// # Errors
    ///
    /// Fails only if the outline has non-finite coordinates.
    pub fn polygon(&self) -> Result<Polygon> {
        Polygon::new(self.outline.clone())
    }
}

/// A validated set of pie-chart values.
#[derive(Debug, Clone, PartialEq)]
pub struct PieChart {
    values: Vec<f32>,
    labels: Vec<String>,
    total: f32,
}

impl PieChart {
    /// Create a chart from non-negative values.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyData`] for no values and [`Error::InvalidData`]
    /// for negative or non-finite values, or a zero total.
    pub fn new(values: Vec<f32>) -> Result<Self> {
        if values.is_empty() {
            return Err(Error::EmptyData);
        }
        if let Some((i, v)) = values.iter().enumerate().find(|(_, v)| !(v.is_finite() && **v >= 0.0)) {
            return Err(Error::InvalidData(format!("pie value {i} must be finite and non-negative, got {v}")));
        }

        let total: f32 = values.iter().sum();
        if total <= 0.0 {
            return Err(Error::InvalidData("pie values sum to zero".to_string()));
        }
        Ok(Self { values, labels: Vec::new(), total })
    }

    /// Name each value, in input order.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidData`] unless there is exactly one label per
    /// value.
    pub fn with_labels<S: Into<String>>(mut self, labels: impl IntoIterator<Item = S>) -> Result<Self> {
        let labels: Vec<String> = labels.into_iter().map(Into::into).collect();
        if labels.len() != self.values.len() {
            return Err(Error::InvalidData(format!(
                "{} labels for {} pie values",
                labels.len(),
                self.values.len()
            )));
        }
        self.labels = labels;
        Ok(self)
    }

    /// Value names, empty when the chart is unlabelled.
    #[must_use]
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    /// The input values.
    #[must_use]
    pub fn values(&self) -> &[f32] {
        &self.values
    }

    /// Sum of all values.
    #[must_use]
    pub const fn total(&self) -> f32 {
        self.total
    }

    /// Number of slices.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Always false; construction rejects empty data.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Lay out every slice around `center`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidGeometry`] for a non-positive radius or
    /// tolerance.
    pub fn slices(&self, center: Point, radius: f32, layout: &PieLayout) -> Result<Vec<PieSlice>> {
        let mut slices = Vec::with_capacity(self.values.len());
        let mut cumulative = 0.0_f32;

        for (index, &value) in self.values.iter().enumerate() {
            let fraction = value / self.total;
            // Angles come from the running sum so rounding never accumulates
            // past a full turn.
            let start_deg = layout.start_deg + 360.0 * cumulative / self.total;
            cumulative += value;
            let end_deg = layout.start_deg + 360.0 * cumulative / self.total;
            let sweep_deg = end_deg - start_deg;

            let mut outline = Vec::new();
            outline.push(center);
            outline.extend(arc_points(center, radius, start_deg, sweep_deg, layout.tolerance)?);

            let placement = layout.placement(index);
            let label_angle = (start_deg + sweep_deg / 2.0 + placement.angular_offset_deg).to_radians();
            let label_radius = radius + layout.label_offset + placement.radius_offset;
            let (sin, cos) = label_angle.sin_cos();

            slices.push(PieSlice {
                index,
                start_deg,
                sweep_deg,
                fraction,
                outline,
                label_anchor: Point::new(center.x + label_radius * cos, center.y + label_radius * sin),
                label: self.labels.get(index).cloned(),
            });
        }

        log::debug!("pie: {} slices, total {}", slices.len(), self.total);
        Ok(slices)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    const FRUIT: [f32; 6] = [36.0, 41.0, 19.0, 28.0, 30.0, 16.0];

    #[test]
    fn test_sweeps_cover_full_turn() {
        let chart = PieChart::new(FRUIT.to_vec()).unwrap();
        let slices = chart.slices(Point::ORIGIN, 0.6, &PieLayout::default()).unwrap();
        assert_eq!(slices.len(), 6);

        let sweep: f32 = slices.iter().map(|s| s.sweep_deg).sum();
        let fraction: f32 = slices.iter().map(|s| s.fraction).sum();
        assert_abs_diff_eq!(sweep, 360.0, epsilon = 1e-3);
        assert_abs_diff_eq!(fraction, 1.0, epsilon = 1e-5);

        for pair in slices.windows(2) {
            assert_abs_diff_eq!(pair[0].start_deg + pair[0].sweep_deg, pair[1].start_deg, epsilon = 1e-4);
        }
    }

    #[test]
    fn test_percentages() {
        let chart = PieChart::new(FRUIT.to_vec()).unwrap();
        assert_abs_diff_eq!(chart.total(), 170.0);
        let slices = chart.slices(Point::ORIGIN, 1.0, &PieLayout::default()).unwrap();
        assert_abs_diff_eq!(slices[1].percentage(), 24.117_647, epsilon = 1e-3);
    }

    #[test]
    fn test_outline_on_circle() {
        let center = Point::new(2.0, -1.0);
        let chart = PieChart::new(vec![1.0, 3.0]).unwrap();
        let slices = chart.slices(center, 5.0, &PieLayout::default()).unwrap();
        for slice in &slices {
            assert_eq!(slice.outline[0], center);
            for p in &slice.outline[1..] {
                assert_abs_diff_eq!(p.distance(center), 5.0, epsilon = 1e-4);
            }
            assert!(slice.polygon().is_ok());
        }
        // First slice spans 0..90 degrees.
        let last = *slices[0].outline.last().unwrap();
        assert_abs_diff_eq!(last.x, 2.0, epsilon = 1e-4);
        assert_abs_diff_eq!(last.y, 4.0, epsilon = 1e-4);
    }

    #[test]
    fn test_label_overrides_by_index() {
        let chart = PieChart::new(FRUIT.to_vec()).unwrap();
        let layout = PieLayout::default()
            .with_override(2, LabelPlacement { radius_offset: 0.1, angular_offset_deg: 0.0 })
            .with_override(3, LabelPlacement { radius_offset: 0.05, angular_offset_deg: 0.0 });
        let slices = chart.slices(Point::ORIGIN, 0.6, &layout).unwrap();

        assert_abs_diff_eq!(slices[0].label_anchor.distance(Point::ORIGIN), 0.75, epsilon = 1e-5);
        assert_abs_diff_eq!(slices[2].label_anchor.distance(Point::ORIGIN), 0.85, epsilon = 1e-5);
        assert_abs_diff_eq!(slices[3].label_anchor.distance(Point::ORIGIN), 0.80, epsilon = 1e-5);

        let mid = slices[0].mid_deg().to_radians();
        assert_abs_diff_eq!(slices[0].label_anchor.y.atan2(slices[0].label_anchor.x), mid, epsilon = 1e-5);
    }

    #[test]
    fn test_labelled_captions() {
        let chart = PieChart::new(FRUIT.to_vec())
            .unwrap()
            .with_labels(["Avocado", "Orange", "Banana", "Kiwifruit", "Mangos", "Grapes"])
            .unwrap();
        let slices = chart.slices(Point::ORIGIN, 0.6, &PieLayout::default()).unwrap();
        assert_eq!(slices[0].caption(), "Avocado (21.2%)");
        assert_eq!(slices[5].caption(), "Grapes (9.4%)");
        assert_eq!(slices[1].label.as_deref(), Some("Orange"));
    }

    #[test]
    fn test_unlabelled_caption_and_mismatch() {
        let chart = PieChart::new(vec![1.0, 3.0]).unwrap();
        assert!(chart.labels().is_empty());
        let slices = chart.slices(Point::ORIGIN, 1.0, &PieLayout::default()).unwrap();
        assert_eq!(slices[1].label, None);
        assert_eq!(slices[1].caption(), "75.0%");

        assert!(matches!(chart.with_labels(["only one"]), Err(Error::InvalidData(_))));
    }

    #[test]
    fn test_start_angle() {
        let chart = PieChart::new(vec![1.0, 1.0]).unwrap();
        let layout = PieLayout { start_deg: 90.0, ..PieLayout::default() };
        let slices = chart.slices(Point::ORIGIN, 1.0, &layout).unwrap();
        assert_abs_diff_eq!(slices[0].start_deg, 90.0);
        assert_abs_diff_eq!(slices[1].start_deg, 270.0);
    }

    #[test]
    fn test_zero_value_slice() {
        let chart = PieChart::new(vec![0.0, 2.0]).unwrap();
        let slices = chart.slices(Point::ORIGIN, 1.0, &PieLayout::default()).unwrap();
        assert_abs_diff_eq!(slices[0].sweep_deg, 0.0);
        assert_eq!(slices[0].fraction, 0.0);
    }

    #[test]
    fn test_invalid_data() {
        assert!(matches!(PieChart::new(vec![]), Err(Error::EmptyData)));
        assert!(matches!(PieChart::new(vec![1.0, -1.0]), Err(Error::InvalidData(_))));
        assert!(matches!(PieChart::new(vec![f32::NAN]), Err(Error::InvalidData(_))));
        assert!(matches!(PieChart::new(vec![0.0, 0.0]), Err(Error::InvalidData(_))));

        let chart = PieChart::new(vec![1.0]).unwrap();
        assert!(chart.slices(Point::ORIGIN, 0.0, &PieLayout::default()).is_err());
    }
}
