use anyhow::Context as _;
use canvas_core::{CanvasSession, SessionConfig};
use canvas_flows::{CannedFlows, FlowClient};
use clap::{Arg, ArgAction, Command};
use std::sync::Arc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let cli = Command::new("canvas-studio")
        .version(env!("CARGO_PKG_VERSION"))
        .about("ImaginAIry Canvas - prompt-to-image sessions from the command line")
        .arg_required_else_help(true)
        .subcommand(
            Command::new("generate")
                .about("Generate an image and save it for download")
                .arg(
                    Arg::new("prompt")
                        .long("prompt")
                        .required(true)
                        .help("Prompt text to generate from"),
                )
                .arg(
                    Arg::new("endpoint")
                        .long("endpoint")
                        .help("Flow server base URL (canned flows when omitted)"),
                )
                .arg(
                    Arg::new("token")
                        .long("token")
                        .help("Bearer token sent with every flow request"),
                )
                .arg(
                    Arg::new("out")
                        .long("out")
                        .default_value("downloads")
                        .help("Directory the image is saved into"),
                )
                .arg(
                    Arg::new("improve-first")
                        .long("improve-first")
                        .action(ArgAction::SetTrue)
                        .help("Run the prompt through improvement before generating"),
                ),
        )
        .subcommand(
            Command::new("improve")
                .about("Suggest an improved version of a prompt")
                .arg(
                    Arg::new("prompt")
                        .long("prompt")
                        .required(true)
                        .help("Prompt text to improve"),
                )
                .arg(
                    Arg::new("endpoint")
                        .long("endpoint")
                        .help("Flow server base URL (canned flows when omitted)"),
                )
                .arg(
                    Arg::new("token")
                        .long("token")
                        .help("Bearer token sent with every flow request"),
                ),
        );

    let matches = cli.get_matches();

    match matches.subcommand() {
        Some(("generate", args)) => {
            let prompt = args.get_one::<String>("prompt").unwrap();
            let out_dir = args.get_one::<String>("out").unwrap();
            let improve_first = args.get_flag("improve-first");

            let session = build_session(args.get_one("endpoint"), args.get_one("token"), out_dir);
            session.set_prompt(prompt.clone());

            let mut prompt = prompt.clone();
            if improve_first {
                let improved = session
                    .improve_prompt(&prompt)
                    .await
                    .context("prompt improvement failed")?;
                println!("Improved prompt: {}", improved);
                prompt = improved;
            }

            let artifact = session
                .generate(&prompt)
                .await
                .context("image generation failed")?;
            println!("Generated image for \"{}\"", artifact.source_prompt());

            match session.download() {
                Ok(path) => println!("Saved to {}", path.display()),
                Err(e) => {
                    // Remote locators cannot be saved locally; leave the URI
                    println!("Image left at {}", artifact.uri());
                    eprintln!("Download failed: {}", e);
                }
            }
        }
        Some(("improve", args)) => {
            let prompt = args.get_one::<String>("prompt").unwrap();

            let session =
                build_session(args.get_one("endpoint"), args.get_one("token"), "downloads");

            let improved = session
                .improve_prompt(prompt)
                .await
                .context("prompt improvement failed")?;
            println!("{}", improved);
        }
        _ => {}
    }

    Ok(())
}

fn build_session(
    endpoint: Option<&String>,
    token: Option<&String>,
    out_dir: &str,
) -> CanvasSession {
    let config = SessionConfig::new().with_download_dir(out_dir);

    match endpoint {
        Some(endpoint) => {
            let mut client = FlowClient::new(endpoint.as_str());
            if let Some(token) = token {
                client = client.with_bearer_token(token.as_str());
            }
            let flows = Arc::new(client);
            CanvasSession::with_log_notifier(config, flows.clone(), flows)
        }
        None => {
            let flows = Arc::new(CannedFlows::new());
            CanvasSession::with_log_notifier(config, flows.clone(), flows)
        }
    }
}
