use quantumvault_core::Vault;

use super::{EVACUATION_NOTICE, EXIT_COLLAPSE, EXIT_IO_ERROR, EXIT_OK};

pub fn run(vault: Vault) -> i32 {
    let mut app = crate::tui::app::App::new(vault);
    if let Err(e) = app.run() {
        eprintln!("TUI error: {e}");
        return EXIT_IO_ERROR;
    }
    match app.collapse() {
        Some(event) => {
            println!("{EVACUATION_NOTICE}");
            println!("{event}");
            EXIT_COLLAPSE
        }
        None => EXIT_OK,
    }
}
