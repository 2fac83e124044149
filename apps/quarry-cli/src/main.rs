use clap::Parser;

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
	color_eyre::install()?;

	let args = quarry_cli::Args::parse();

	quarry_cli::run(args).await
}
