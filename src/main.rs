mod config;
mod dispatch;
mod http;
mod server;

use config::Config;
use dispatch::{App, Flow, Inline, Terminal};
use http::request::Request;
use http::response::Response;
use server::Server;

#[tokio::main]
async fn main() -> anyhow::Result<()>{
    tracing_subscriber::fmt()
        .with_target(false)
        .with_level(true)
        .init();

    let cfg = Config::load()?;

    let mut app = App::new();
    app.with(Inline(
        |req: &mut Request, _res: &mut Response| -> anyhow::Result<Flow> {
            tracing::info!(method = ?req.method, path = %req.original_path, "Request");
            Ok(Flow::Continue)
        },
    ))
    .mount(
        "/hello",
        Inline(|_req: &mut Request, res: &mut Response| -> anyhow::Result<Flow> {
            *res = Response::ok("Hello from relay\n");
            Ok(Flow::Halt)
        }),
    );

    let server = Server::new(app, Terminal::new(&cfg));

    tokio::select! {
        res = server.run(&cfg) => {
            res?;
        }

        _ = tokio::signal::ctrl_c() => {
            tracing::info!("Shutdown signal received");
        }
    }

    Ok(())
}
