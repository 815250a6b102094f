// Console loop - stdin commands in, rendered screens out
use crate::application::dashboard_poller::Update;
use crate::presentation::app_state::{AppState, Outcome};
use crate::presentation::command::Command;
use crate::presentation::render;
use tokio::io::{AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};

pub async fn run(mut app: AppState) -> anyhow::Result<()> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut out = tokio::io::stdout();

    emit(&mut out, &app.screen()).await?;

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else {
                    tracing::debug!("stdin closed");
                    break;
                };
                if line.trim().is_empty() {
                    continue;
                }
                match line.parse::<Command>() {
                    Ok(command) => match app.handle(command).await {
                        Outcome::Print(text) => emit(&mut out, &text).await?,
                        Outcome::Quit => break,
                    },
                    Err(e) => emit(&mut out, &format!("{}\n", e)).await?,
                }
            }
            Some(update) = app.next_update() => {
                if let Update::Sample(sample, assessment) = update {
                    if app.wants_ticks() {
                        emit(&mut out, &render::tick(&sample, &assessment)).await?;
                    }
                }
            }
        }
    }

    app.close().await;
    Ok(())
}

async fn emit<W: AsyncWrite + Unpin>(out: &mut W, text: &str) -> std::io::Result<()> {
    out.write_all(text.as_bytes()).await?;
    if !text.ends_with('\n') {
        out.write_all(b"\n").await?;
    }
    out.flush().await
}
