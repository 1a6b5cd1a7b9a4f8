//! Browser entry point. Built with `--features csr`; the native binary does nothing.

fn main() {
    #[cfg(feature = "csr")]
    {
        console_error_panic_hook::set_once();
        let _ = console_log::init_with_level(log::Level::Debug);
        leptos::mount::mount_to_body(nexus::app::App);
    }
}
