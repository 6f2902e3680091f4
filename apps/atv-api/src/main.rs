use clap::Parser;

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
	color_eyre::install()?;

	let args = atv_api::Args::parse();

	atv_api::run(args).await
}
