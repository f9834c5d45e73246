use message_board::common::init;
use message_board::settings::AppSettings;
use message_board::{api, board};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let settings = AppSettings::get();
    init::initialize_logging(settings);
    match settings.app_component.as_str() {
        "api" => api::serve(settings).await,
        "board" => board::serve(settings).await,
        _ => panic!("Unknown app component"),
    }
}
