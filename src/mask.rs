pub mod fit;
pub mod silhouette;
pub mod threshold;

pub use fit::{FitPlacement, fit_centered};
pub use silhouette::{MaskReport, MaskSettings, SilhouetteMasker};
pub use threshold::{ThresholdStats, apply_adaptive_threshold, luminance, mean_luminance};
