//! Entry point for the opsdash TUI. Parses args, resolves the backend
//! connection, and runs the App.

use std::env;

use anyhow::Context;

use opsdash::api::ApiClient;
use opsdash::app::App;
use opsdash::config::{Config, ENV_API_KEY, ENV_BASE_URL};
use opsdash::profiles::{load_profiles, save_profiles, ProfileRequest, ResolvedProfile};

struct ParsedArgs {
    url: Option<String>,
    api_key: Option<String>,
    profile: Option<String>,
    save: bool,
    check: bool,
    log: Option<String>,
}

fn usage(prog: &str) -> String {
    format!(
        "Usage: {prog} [--api-key KEY|-k KEY] [--profile NAME|-P NAME] [--save] [--check] [--log FILE] [http://HOST:PORT]"
    )
}

fn parse_args<I: IntoIterator<Item = String>>(args: I) -> Result<ParsedArgs, String> {
    let mut it = args.into_iter();
    let prog = it.next().unwrap_or_else(|| "opsdash".into());
    let mut url: Option<String> = None;
    let mut api_key: Option<String> = None;
    let mut profile: Option<String> = None;
    let mut save = false;
    let mut check = false;
    let mut log: Option<String> = None;

    while let Some(arg) = it.next() {
        match arg.as_str() {
            "-h" | "--help" => return Err(usage(&prog)),
            "--api-key" | "-k" => {
                api_key = it.next();
            }
            "--profile" | "-P" => {
                profile = it.next();
            }
            "--save" => {
                save = true;
            }
            "--check" => {
                check = true;
            }
            "--log" => {
                log = it.next();
            }
            _ if arg.starts_with("--api-key=") => {
                if let Some((_, v)) = arg.split_once('=') {
                    if !v.is_empty() {
                        api_key = Some(v.to_string());
                    }
                }
            }
            _ if arg.starts_with("--profile=") => {
                if let Some((_, v)) = arg.split_once('=') {
                    if !v.is_empty() {
                        profile = Some(v.to_string());
                    }
                }
            }
            _ if arg.starts_with("--log=") => {
                if let Some((_, v)) = arg.split_once('=') {
                    if !v.is_empty() {
                        log = Some(v.to_string());
                    }
                }
            }
            _ if arg.starts_with('-') => {
                return Err(format!("Unknown flag '{arg}'. {}", usage(&prog)));
            }
            _ => {
                if url.is_none() {
                    url = Some(arg);
                } else {
                    return Err(format!("Unexpected argument. {}", usage(&prog)));
                }
            }
        }
    }
    Ok(ParsedArgs {
        url,
        api_key,
        profile,
        save,
        check,
        log,
    })
}

// The TUI owns stdout, so tracing goes to a file when requested and is
// silent otherwise.
fn init_logging(path: Option<&str>) -> anyhow::Result<()> {
    let Some(path) = path else { return Ok(()) };
    let file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("open log file {path}"))?;
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("opsdash=debug")),
        )
        .with_writer(std::sync::Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

fn resolve_config(parsed: &ParsedArgs) -> anyhow::Result<Config> {
    let mut profiles = load_profiles();
    let req = ProfileRequest {
        profile_name: parsed.profile.clone(),
        url: parsed.url.clone(),
        api_key: parsed.api_key.clone(),
        save: parsed.save,
    };
    let (resolved, changed) = req.resolve(&mut profiles);
    if changed {
        save_profiles(&profiles).context("save profiles")?;
    }
    match resolved {
        ResolvedProfile::Direct { url, api_key } | ResolvedProfile::Loaded { url, api_key } => {
            // CLI key still wins over a stored one.
            let key = parsed.api_key.clone().or(api_key).or_else(|| env::var(ENV_API_KEY).ok());
            Ok(Config::new(&url, key)?)
        }
        ResolvedProfile::Unknown(name) => {
            anyhow::bail!("profile '{name}' does not exist; pass a URL to create it")
        }
        ResolvedProfile::None => {
            let mut cfg = Config::from_env()?;
            if let Some(key) = parsed.api_key.clone().filter(|k| !k.is_empty()) {
                cfg.api_key = Some(key);
            }
            Ok(cfg)
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let parsed = match parse_args(env::args()) {
        Ok(v) => v,
        Err(msg) => {
            eprintln!("{msg}");
            return Ok(());
        }
    };

    let log_path = parsed.log.clone().or_else(|| env::var("OPSDASH_LOG").ok());
    init_logging(log_path.as_deref())?;
    let config = resolve_config(&parsed)?;

    if parsed.check {
        println!("base URL: {}", config.base_url);
        println!(
            "API key: {}",
            if config.api_key.is_some() { "configured" } else { "none" }
        );
        println!("({ENV_BASE_URL} / {ENV_API_KEY} environment fallbacks apply)");
        return Ok(());
    }

    let client = ApiClient::new(config.base_url, config.api_key);
    let mut app = App::new(client);
    app.run().await
}
