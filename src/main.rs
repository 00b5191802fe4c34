/// DropDown application entry point
fn main() {
    use dropdown::constants::{DEFAULT_WINDOW_SIZE, MIN_WINDOW_SIZE, WINDOW_TITLE};
    use dropdown::{AppConfig, DropdownApp};
    use dropdown_ui::theme::{current_theme, set_theme, Theme};
    use dropdown_ui::{run, GpuConfig, Settings};

    // The logger starts inside `run`, so config problems go to stderr
    let config = AppConfig::load().unwrap_or_else(|e| {
        eprintln!("Ignoring configuration: {}", e);
        AppConfig::default()
    });

    if set_theme(Theme::dark()).is_err() {
        eprintln!("Theme was already set");
    }

    let settings = Settings::new()
        .title(WINDOW_TITLE)
        .size(DEFAULT_WINDOW_SIZE.0, DEFAULT_WINDOW_SIZE.1)
        .min_size(MIN_WINDOW_SIZE.0, MIN_WINDOW_SIZE.1)
        .log_level(config.log_level.to_level_filter())
        .clear_color(current_theme().clear_color())
        .gpu_config(GpuConfig::power_saving());

    if let Err(e) = run(DropdownApp::from_config(&config), settings) {
        eprintln!("Application error: {}", e);
    }
}
