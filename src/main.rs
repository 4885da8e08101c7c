use eframe::egui;

use weather_dashboard::app::WeatherDashboardApp;
use weather_dashboard::config::Config;

fn main() -> eframe::Result {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            log::error!("{e}");
            return Err(eframe::Error::AppCreation(Box::new(e)));
        }
    };
    log::info!(
        "Data file {} (time base {:?})",
        config.data_path.display(),
        config.time_base
    );

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 800.0])
            .with_min_inner_size([600.0, 400.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Weather Data Dashboard",
        options,
        Box::new(move |_cc| Ok(Box::new(WeatherDashboardApp::new(&config)))),
    )
}
