//! Data handed to a gel renderer
//!
//! No image is produced here: the frame carries band positions, widths and
//! intensities plus the geometry a renderer needs to lay out lanes.

/// Default resolution \[px/in\]
pub const DEFAULT_RESOLUTION_PX_PER_IN: f64 = 500.0;

/// Snapshot of a run in centimetres, ready for drawing
#[derive(Debug, Clone, PartialEq)]
pub struct RenderFrame {
    pub lane_names: Vec<String>,
    /// Band centres measured from the well \[cm\]
    pub distances: Vec<Vec<f64>>,
    /// Band widths used for the intensities \[cm\]
    pub bandwidths: Vec<Vec<f64>>,
    pub intensities: Vec<Vec<f64>>,
    /// \[cm\]
    pub well_width: f64,
    /// \[cm\]
    pub well_height: f64,
    /// \[cm\]
    pub well_separation: f64,
    /// \[cm\]
    pub gel_length: f64,
    /// \[px/cm\]
    pub resolution: f64,
    /// \[s\]
    pub run_time: f64,
    /// \[V/cm\]
    pub field: f64,
    /// \[%\]
    pub percent: f64,
    /// \[K\]
    pub temperature: f64,
    pub exposure: f64,
}

impl RenderFrame {
    /// Length in centimetres expressed in whole pixels
    pub fn pixels(&self, cm: f64) -> u32 {
        (cm * self.resolution).round().max(0.0) as u32
    }

    /// Image size (width, height) in pixels: lanes side by side with one
    /// well separation as margin, and the full gel length
    pub fn image_size(&self) -> (u32, u32) {
        let n = self.lane_names.len() as f64;
        let width = n * self.well_width + (n + 1.0) * self.well_separation;
        (self.pixels(width), self.pixels(self.gel_length + self.well_height))
    }

    /// Horizontal centre of lane `lane` \[cm\]
    pub fn lane_center(&self, lane: usize) -> f64 {
        let i = lane as f64;
        self.well_separation * (i + 1.0) + self.well_width * (i + 0.5)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn frame() -> RenderFrame {
        RenderFrame {
            lane_names: vec!["a".into(), "b".into()],
            distances: vec![vec![1.0], vec![2.0]],
            bandwidths: vec![vec![0.1], vec![0.2]],
            intensities: vec![vec![1.0], vec![0.5]],
            well_width: 0.7,
            well_height: 0.2,
            well_separation: 0.2,
            gel_length: 8.0,
            resolution: 100.0,
            run_time: 3600.0,
            field: 5.0,
            percent: 1.0,
            temperature: 295.15,
            exposure: 0.5,
        }
    }

    #[test]
    fn test_image_size() {
        // 2·0.7 + 3·0.2 = 2.0 cm wide, 8.2 cm tall
        assert_eq!(frame().image_size(), (200, 820));
    }

    #[test]
    fn test_lane_centers() {
        let f = frame();
        assert_relative_eq!(f.lane_center(0), 0.55, max_relative = 1e-12);
        assert_relative_eq!(f.lane_center(1), 1.45, max_relative = 1e-12);
    }
}
