#[tokio::main]
async fn main() {
  let mut args = std::env::args().skip(1);
  if let Some(arg) = args.next() {
    if arg == "--version" || arg == "-V" {
      println!("folio {}", env!("CARGO_PKG_VERSION"));
      return;
    }
    if arg == "--help" || arg == "-h" {
      eprint!("{}", folio::app::config::USAGE);
      return;
    }
  }

  if let Err(e) = folio::app::run().await {
    eprintln!("error: {e}");
    std::process::exit(1);
  }
}
