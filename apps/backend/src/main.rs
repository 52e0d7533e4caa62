#[tokio::main]
async fn main() -> anyhow::Result<()> {
    typing_drill_backend::run().await
}
