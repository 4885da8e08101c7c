use eframe::egui::Color32;

// ---------------------------------------------------------------------------
// Fixed series colours (CSS red / green / orange)
// ---------------------------------------------------------------------------

pub const TEMPERATURE: Color32 = Color32::from_rgb(255, 0, 0);
pub const HUMIDITY: Color32 = Color32::from_rgb(0, 128, 0);
pub const PRESSURE: Color32 = Color32::from_rgb(255, 165, 0);

/// Status / error text.
pub const ERROR: Color32 = Color32::from_rgb(220, 50, 50);
