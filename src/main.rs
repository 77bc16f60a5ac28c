mod api;
mod app;
mod edit_core;
mod listing;
mod preview;
mod records;
mod views;

use app::App;

fn main() {
    console_error_panic_hook::set_once();
    leptos::mount::mount_to_body(App);
}
