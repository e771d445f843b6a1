//! ChessUnlocked opening trainer using egui/eframe.
//!
//! This is the main entry point for the desktop and web application.

use chessunlocked_app::ChessUnlockedApp;

#[cfg(not(target_arch = "wasm32"))]
fn main() -> eframe::Result<()> {
    use clap::Parser as _;

    const APP_ID: &str = "io.github.chessunlocked";

    better_panic::install();
    env_logger::init();

    let cli = chessunlocked_app::config::Cli::parse();
    let config = match cli.into_config() {
        Ok(config) => config,
        Err(e) => {
            log::error!("failed to load catalog: {e}");
            eprintln!("error: {e}");
            std::process::exit(1);
        }
    };

    let options = eframe::NativeOptions {
        viewport: eframe::egui::ViewportBuilder::default()
            .with_app_id(APP_ID)
            .with_resizable(true)
            .with_inner_size((960.0, 720.0))
            .with_min_inner_size((560.0, 480.0)),
        ..Default::default()
    };
    eframe::run_native(
        "ChessUnlocked",
        options,
        Box::new(move |cc| Ok(Box::new(ChessUnlockedApp::new(cc, config)))),
    )
}

#[cfg(target_arch = "wasm32")]
fn install_panic_alert_hook() {
    let previous = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        previous(panic_info);

        let message = panic_info.to_string();
        if let Some(window) = web_sys::window() {
            let _ = window.alert_with_message(&format!(
                "ChessUnlocked has crashed.\n\n{message}\n\nReloading the page may fix the issue.\n\nSee the developer console for details."
            ));
        }
    }));
}

#[cfg(target_arch = "wasm32")]
fn main() {
    use eframe::wasm_bindgen::JsCast as _;

    install_panic_alert_hook();

    // Redirect `log` message to `console.log` and friends:
    eframe::WebLogger::init(log::LevelFilter::Debug).ok();

    log::info!(
        "Starting ChessUnlocked WASM application, version={}",
        chessunlocked_app::version::build_version()
    );

    let config = chessunlocked_app::AppConfig::builtin().expect("built-in catalog is valid");
    let web_options = eframe::WebOptions::default();

    wasm_bindgen_futures::spawn_local(async move {
        let document = web_sys::window()
            .expect("No window")
            .document()
            .expect("No document");

        let canvas = document
            .get_element_by_id("the_canvas_id")
            .expect("Failed to find the_canvas_id")
            .dyn_into::<web_sys::HtmlCanvasElement>()
            .expect("the_canvas_id was not a HtmlCanvasElement");

        let start_result = eframe::WebRunner::new()
            .start(
                canvas,
                web_options,
                Box::new(move |cc| Ok(Box::new(ChessUnlockedApp::new(cc, config)))),
            )
            .await;

        // Remove the loading text and spinner:
        if let Some(loading_text) = document.get_element_by_id("loading_text") {
            match start_result {
                Ok(()) => {
                    loading_text.remove();
                }
                Err(e) => {
                    loading_text.set_inner_html(
                        "<p> The app has crashed. See the developer console for details. </p>",
                    );
                    panic!("Failed to start eframe: {e:?}");
                }
            }
        }
    });
}
