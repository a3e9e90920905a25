#[tokio::main]
async fn main() -> workshop_agent::error::Result<()> {
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or("workshop_agent=info"),
    )
    .init();
    log::info!("Starting workshop agent");

    match workshop_agent::run().await {
        Ok(()) => {
            log::info!("Agent shut down successfully");
            Ok(())
        }
        Err(e) => {
            log::error!("Agent encountered an error: {}", e);
            eprintln!("{}", e.user_message());
            Err(e)
        }
    }
}
