use taskdesk_frontend::App;
use tracing_subscriber::prelude::*;

fn main() {
    console_error_panic_hook::set_once();

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_ansi(false)
        .without_time()
        .with_writer(tracing_web::MakeWebConsoleWriter::new());
    if tracing_subscriber::registry().with(fmt_layer).try_init().is_err() {
        web_sys::console::warn_1(&"tracing subscriber already installed".into());
    }

    yew::Renderer::<App>::new().render();
}
