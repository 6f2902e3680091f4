pub mod routes;
pub mod state;

use std::{net::SocketAddr, path::PathBuf};

use clap::Parser;
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

use crate::state::AppState;

#[derive(Debug, Parser)]
#[command(
	version = atv_cli::version!(),
	rename_all = "kebab",
	styles = atv_cli::styles(),
)]
pub struct Args {
	#[arg(long, short = 'c', value_name = "FILE")]
	pub config: PathBuf,
}

pub async fn run(args: Args) -> color_eyre::Result<()> {
	let config = atv_config::load(&args.config)?;

	init_tracing(&config)?;

	let http_addr: SocketAddr = config.service.http_bind.parse()?;
	let state = AppState::new(config);
	let app = routes::router(state);
	let listener = TcpListener::bind(http_addr).await?;

	tracing::info!(%http_addr, "HTTP server listening.");

	axum::serve(listener, app).await?;

	Ok(())
}

fn init_tracing(config: &atv_config::Config) -> color_eyre::Result<()> {
	let filter =
		EnvFilter::try_new(&config.service.log_level).unwrap_or_else(|_| EnvFilter::new("info"));

	tracing_subscriber::fmt().with_env_filter(filter).init();

	Ok(())
}

#[cfg(test)]
mod tests {
	use clap::CommandFactory;

	use super::*;

	#[test]
	fn reports_own_package_version() {
		let command = Args::command();

		assert_eq!(command.get_version(), Some(concat!("atv-api-", env!("CARGO_PKG_VERSION"))));
	}

	#[test]
	fn requires_config_path() {
		assert!(Args::try_parse_from(["atv-api"]).is_err());

		let args = Args::try_parse_from(["atv-api", "-c", "atv.toml"]).expect("parse failed");

		assert_eq!(args.config, PathBuf::from("atv.toml"));
	}
}
