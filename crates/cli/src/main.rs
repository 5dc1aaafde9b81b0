#![deny(warnings)]

use anyhow::Context;
use clap::Parser;
use moodmate_core::capture::SyntheticFrameSource;
use moodmate_core::classify::{DemoClassifier, Emotion};
use moodmate_core::config::{
    resolve_string_with_default, AppConfig, DetectionConfig, Env, OnClassifierFailure,
    PlaylistConfig, StdEnv, DEFAULT_ANALYZE_INTERVAL_MS, DEFAULT_PLAYLIST_URI,
    DEFAULT_PLAYLIST_WEB_URL, DEFAULT_POLL_INTERVAL_MS, DEFAULT_REACTION_DEBOUNCE_MS,
    DEFAULT_ROLLING_WINDOW, DEFAULT_STABLE_THRESHOLD, ENV_PLAYLIST_URI, ENV_PLAYLIST_WEB_URL,
};
use moodmate_core::jokes::{CannedJokes, JokeSource};
use moodmate_core::launch::{LoggingLauncher, PlaylistLauncher, PlaylistLink};
use moodmate_core::pipeline::{Pipeline, PipelineConfig, PipelineHandle};
use moodmate_core::react::{Reaction, Suggestion};
use moodmate_core::speech::ConsoleSpeech;
use std::time::{Duration, SystemTime};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "moodmate")]
#[command(about = "Webcam mood companion (stable emotion detection, headless frontend)")]
struct Args {
    #[arg(long, default_value_t = DEFAULT_ANALYZE_INTERVAL_MS)]
    interval_ms: u64,

    #[arg(long, default_value_t = DEFAULT_ROLLING_WINDOW)]
    window: usize,

    #[arg(long, default_value_t = DEFAULT_STABLE_THRESHOLD)]
    threshold: usize,

    #[arg(long, default_value_t = DEFAULT_REACTION_DEBOUNCE_MS)]
    debounce_ms: u64,

    #[arg(long, default_value_t = DEFAULT_POLL_INTERVAL_MS)]
    poll_ms: u64,

    #[arg(long)]
    playlist_uri: Option<String>,

    #[arg(long)]
    playlist_url: Option<String>,

    /// Label to record when the classifier fails for a tick; ticks are
    /// skipped when unset.
    #[arg(long)]
    fallback_label: Option<String>,

    /// Exit after this many reactions.
    #[arg(long, default_value_t = 1)]
    reactions: u32,

    /// Delay before detection resumes after a reaction.
    #[arg(long, default_value_t = 2000)]
    auto_resume_ms: u64,

    /// Emit reactions as JSON lines instead of formatted text.
    #[arg(long)]
    json: bool,

    #[arg(long, default_value = "info")]
    log_level: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_tracing(&args.log_level)?;

    let env = StdEnv;
    let cfg = build_config(&args, &env)?;

    tracing::info!(
        interval_ms = cfg.detection.analyze_interval_ms,
        window = cfg.detection.rolling_window,
        threshold = cfg.detection.stable_threshold,
        "config loaded"
    );

    run(cfg, &args).await
}

async fn run(cfg: AppConfig, args: &Args) -> anyhow::Result<()> {
    let playlist = PlaylistLink::from_config(&cfg.playlist)?;
    let jokes = CannedJokes::new();
    let launcher = LoggingLauncher::new();

    let pipeline = Pipeline {
        source: SyntheticFrameSource::new(),
        classifier: DemoClassifier::new(),
        speech: ConsoleSpeech::new(),
        config: PipelineConfig::from_app(&cfg),
    };
    let mut handle = pipeline.start();

    let mut seen = 0u32;
    while seen < args.reactions {
        let Some(reaction) = handle.next_reaction().await else {
            break;
        };
        seen += 1;

        if args.json {
            println!("{}", serde_json::to_string(&reaction)?);
        } else {
            show_reaction(&reaction, &playlist, &jokes, &launcher).await;
        }

        if seen < args.reactions {
            tokio::time::sleep(Duration::from_millis(args.auto_resume_ms)).await;
            resume(&handle);
        }
    }

    handle.shutdown().await?;
    Ok(())
}

fn resume(handle: &PipelineHandle) {
    handle.resume_detection();
    tracing::info!("detection resumed");
}

async fn show_reaction(
    reaction: &Reaction,
    playlist: &PlaylistLink,
    jokes: &impl JokeSource,
    launcher: &impl PlaylistLauncher,
) {
    println!("{} {}", reaction.profile.emoji, reaction.profile.title);
    println!("   {}", reaction.profile.subtitle);
    for suggestion in &reaction.suggestions {
        match suggestion {
            Suggestion::PlayPlaylist => {
                println!("   playlist: {}", playlist.web_autoplay_url());
                if let Err(e) = launcher.open(playlist.desktop_target()).await {
                    tracing::warn!(error = %e, "playlist launch failed");
                }
            }
            Suggestion::TellJoke => match jokes.next_joke().await {
                Ok(joke) => println!("   joke: {joke}"),
                Err(e) => tracing::warn!(error = %e, "no joke available"),
            },
            Suggestion::PlayGame => {
                println!("   game: available in the desktop frontend");
            }
        }
    }
}

fn init_tracing(level: &str) -> anyhow::Result<()> {
    let filter = EnvFilter::builder()
        .with_default_directive(
            level
                .parse()
                .with_context(|| format!("invalid --log-level: {level}"))?,
        )
        .from_env_lossy();

    tracing_subscriber::fmt().with_env_filter(filter).init();
    Ok(())
}

fn build_config(args: &Args, env: &impl Env) -> anyhow::Result<AppConfig> {
    let detection = DetectionConfig::new(
        args.interval_ms,
        args.window,
        args.threshold,
        args.debounce_ms,
        args.poll_ms,
    )?;

    let playlist = PlaylistConfig {
        uri: resolve_string_with_default(
            args.playlist_uri.clone(),
            ENV_PLAYLIST_URI,
            env,
            DEFAULT_PLAYLIST_URI,
        ),
        web_url: resolve_string_with_default(
            args.playlist_url.clone(),
            ENV_PLAYLIST_WEB_URL,
            env,
            DEFAULT_PLAYLIST_WEB_URL,
        ),
    };

    let on_classifier_failure = match &args.fallback_label {
        Some(raw) => {
            let label: Emotion = raw
                .parse()
                .with_context(|| format!("invalid --fallback-label: {raw}"))?;
            OnClassifierFailure::RecordFallback(label)
        }
        None => OnClassifierFailure::SkipTick,
    };

    Ok(AppConfig {
        detection,
        playlist,
        on_classifier_failure,
        start_time: SystemTime::now(),
    })
}
