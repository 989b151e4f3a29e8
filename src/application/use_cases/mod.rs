mod predict_risks;

pub use predict_risks::*;
