//! Typed RPC client demo.
//!
//! Calls `GET /test?name=Hono` on the RPC server and prints the greeting.

use anyhow::Context;
use tracing_subscriber::EnvFilter;

use routelab_api::RpcClient;
use routelab_models::GreetingQuery;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .init();

    let base_url =
        std::env::var("RPC_BASE_URL").unwrap_or_else(|_| "http://localhost:8787".to_string());

    let client = RpcClient::new(&base_url).context("Failed to create RPC client")?;
    let greeting = client
        .test(&GreetingQuery::new("Hono"))
        .await
        .context("RPC call failed")?;

    println!("{}", greeting.msg);
    Ok(())
}
