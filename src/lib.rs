mod app;
mod commands;
mod config;
mod error;
mod hotkey;

pub fn run() {
    commands::logging::init_logger();

    let result = tauri::Builder::default()
        // Must be the first plugin: a second launch just brings the existing window forward.
        .plugin(tauri_plugin_single_instance::init(|app, _argv, _cwd| {
            if let Some(window) = app::window::main_window(app) {
                app::window::reveal(&window, false);
            }
        }))
        .plugin(tauri_plugin_global_shortcut::Builder::new().build())
        .plugin(tauri_plugin_store::Builder::default().build())
        .plugin(tauri_plugin_opener::init())
        .manage(app::clock::ClockState::default())
        .manage(hotkey::HotkeyState::default())
        .on_window_event(app::events::handle_window_event)
        .invoke_handler(tauri::generate_handler![
            // Window commands
            commands::window::greet,
            commands::window::set_always_on_top,
            commands::window::minimize,
            commands::window::close,
            commands::window::maximize,
            commands::window::hide_to_system_tray,
            commands::window::show_from_system_tray,
            commands::window::is_window_visible,
            commands::window::toggle_window_visibility,
            // Hotkey commands
            commands::hotkey::get_hotkey_settings,
            commands::hotkey::update_hotkey_settings,
            commands::hotkey::reset_hotkey_settings,
            commands::hotkey::get_available_modifiers,
            commands::hotkey::get_available_keys,
            // Config commands
            config::app::get_app_config,
            config::app::set_close_to_tray,
            config::app::set_clock_enabled,
            // Logging commands
            commands::logging::write_log,
            commands::logging::write_logs,
            commands::logging::get_log_dir,
            commands::logging::open_log_dir,
            commands::logging::get_recent_logs,
        ])
        .setup(|app| {
            if let Err(e) = commands::logging::init_log_file(app.handle()) {
                log::warn!("File logging disabled: {}", e);
            }

            // No dock icon; the app lives in the menu bar tray.
            #[cfg(target_os = "macos")]
            app.set_activation_policy(tauri::ActivationPolicy::Accessory);

            if let Err(e) = config::app::load(app.handle()) {
                log::warn!("Failed to load settings, using defaults: {}", e);
            }

            app::tray::init(app)?;
            hotkey::init(app.handle());

            if config::app::is_clock_enabled() {
                app::clock::start(app.handle());
            }

            if let Some(window) = app::window::main_window(app.handle()) {
                app::window::reveal(&window, true);
            }

            Ok(())
        })
        .run(tauri::generate_context!());

    if let Err(e) = result {
        log::error!("Error while running application: {}", e);
        std::process::exit(1);
    }
}
