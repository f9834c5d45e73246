//! Terminal front end: one form and one list, driven by line commands.

pub mod input;
pub mod view;

use crate::adapters::messages_api::GraphQlClient;
use crate::board::input::Command;
use crate::board::view::{Board, Flow};
use crate::settings::AppSettings;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};

pub async fn serve(settings: &AppSettings) -> anyhow::Result<()> {
    let client = GraphQlClient::new(settings.board_api_url.as_str());
    tracing::info!("Using message API at {}", client.endpoint());

    let mut board = Board::new(client);
    let mut stdout = tokio::io::stdout();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    stdout.write_all(board.render().as_bytes()).await?;
    board.refresh().await;
    loop {
        stdout.write_all(board.render().as_bytes()).await?;
        stdout.write_all(b"> ").await?;
        stdout.flush().await?;

        let Some(line) = lines.next_line().await? else {
            break;
        };
        match line.parse::<Command>() {
            Ok(command) => {
                if board.handle(command).await == Flow::Quit {
                    break;
                }
            }
            Err(notice) => board.set_notice(notice),
        }
    }
    Ok(())
}
