use clap::Parser;
use muji::config::{Command, EmotionCommand, ProfileCommand, RecommendArgs};
use muji::domain::model::{Coordinates, ListenerContext, ListeningRecord, NewEmotion, UserProfile};
use muji::domain::ports::{ConfigProvider, Storage};
use muji::utils::error::ErrorSeverity;
use muji::utils::{logger, validation::Validate};
use muji::{
    CliConfig, EmotionJournal, HttpRecommendationClient, HttpWeatherClient, LocalStorage,
    MujiError, RecommendationEngine, TomlConfig,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    // 初始化日誌
    logger::init_cli_logger(cli.verbose);

    tracing::info!("Starting muji CLI");
    if cli.verbose {
        tracing::debug!("CLI config: {:?}", cli);
    }

    if let Err(e) = run(cli).await {
        tracing::error!(
            "❌ muji failed: {} (Category: {:?}, Severity: {:?})",
            e,
            e.category(),
            e.severity()
        );
        tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 Suggestion: {}", e.recovery_suggestion());
        if e.is_recoverable() {
            eprintln!("🔁 This may be temporary; running the command again can succeed");
        }

        let exit_code = match e.severity() {
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        };

        std::process::exit(exit_code);
    }

    Ok(())
}

async fn run(cli: CliConfig) -> muji::Result<()> {
    let config = TomlConfig::load(cli.config.as_deref())?;
    let storage = LocalStorage::new(config.journal_path());

    match cli.command {
        Command::Recommend(args) => {
            // 金鑰缺少時在發出任何請求前就失敗
            config.validate()?;
            recommend(&config, storage, args).await
        }
        Command::Emotion(command) => emotion(storage, command).await,
        Command::Profile(command) => profile(storage, command).await,
        Command::Listen {
            artist,
            title,
            emotion,
        } => {
            let mut journal = EmotionJournal::load(storage).await?;
            journal
                .record_listening(ListeningRecord {
                    artist_name: artist,
                    title,
                    emotion,
                })
                .await?;
            println!("✅ Listening recorded ({} total)", journal.listening_history().len());
            Ok(())
        }
        Command::Playlist { name } => {
            let journal = EmotionJournal::load(storage).await?;
            let entries = journal.playlist(&name);
            if entries.is_empty() {
                println!("📭 Playlist '{}' is empty", name);
            }
            for (index, entry) in entries.iter().enumerate() {
                if entry.artist_name.is_empty() {
                    println!("{}. {}", index + 1, entry.title);
                } else {
                    println!("{}. {} - {}", index + 1, entry.artist_name, entry.title);
                }
            }
            Ok(())
        }
    }
}

async fn recommend<C: ConfigProvider>(
    config: &C,
    storage: LocalStorage,
    args: RecommendArgs,
) -> muji::Result<()> {
    let weather = HttpWeatherClient::from_config(config)?;
    let client = HttpRecommendationClient::from_config(config)?;
    let mut journal = EmotionJournal::load(storage).await?;

    let context = listener_context(&journal, &args)?;
    let engine = RecommendationEngine::new(weather, client);
    let recommendation = engine.run(&context).await?;

    if recommendation.is_empty() {
        println!("📭 No recommendations this time");
        return Ok(());
    }

    println!("🎵 {}", recommendation.request.weather_description);
    for (index, song) in recommendation.songs.iter().enumerate() {
        println!("{}. {}", index + 1, song);
    }

    if let Some(name) = &args.playlist {
        let size = journal.add_to_playlist(name, &recommendation.songs).await?;
        println!("📁 Saved to playlist '{}' ({} songs)", name, size);
    }

    Ok(())
}

/// 命令列沒有給年齡或曲風時，改用已儲存的個人資料
fn listener_context<S: Storage>(
    journal: &EmotionJournal<S>,
    args: &RecommendArgs,
) -> muji::Result<ListenerContext> {
    let profile = journal.profile();

    let age = args
        .age
        .or_else(|| profile.map(|p| p.age))
        .ok_or_else(|| MujiError::ValidationError {
            message: "age is required: pass --age or run `muji profile set`".to_string(),
        })?;

    let genre = args
        .genre
        .clone()
        .or_else(|| profile.map(UserProfile::genre_label).filter(|g| !g.is_empty()))
        .ok_or_else(|| MujiError::ValidationError {
            message: "genre is required: pass --genre or run `muji profile set`".to_string(),
        })?;

    Ok(ListenerContext {
        coordinates: Coordinates::new(args.lat, args.lon),
        location: args.location.clone(),
        emotion: args.emotion.clone(),
        age,
        genre,
    })
}

async fn emotion(storage: LocalStorage, command: EmotionCommand) -> muji::Result<()> {
    let mut journal = EmotionJournal::load(storage).await?;

    match command {
        EmotionCommand::Add {
            emotion,
            comment,
            lat,
            lon,
            address,
        } => {
            let entry = journal
                .add_emotion(NewEmotion {
                    emotion,
                    comment,
                    latitude: lat,
                    longitude: lon,
                    address,
                })
                .await?;
            println!("✅ Recorded {} at {}", entry.emotion, entry.recorded_at);
        }
        EmotionCommand::List => {
            for entry in journal.emotions() {
                println!(
                    "{} {} ({:.4}, {:.4}) {} {}",
                    entry.recorded_at.format("%Y-%m-%d %H:%M"),
                    entry.emotion,
                    entry.latitude,
                    entry.longitude,
                    entry.address,
                    entry.comment
                );
            }
        }
        EmotionCommand::Stats => {
            for (emotion, count) in journal.statistics() {
                println!("{} {}", emotion, count);
            }
        }
    }

    Ok(())
}

async fn profile(storage: LocalStorage, command: ProfileCommand) -> muji::Result<()> {
    let mut journal = EmotionJournal::load(storage).await?;

    match command {
        ProfileCommand::Set { name, age, genres } => {
            journal
                .update_profile(UserProfile { name, age, genres })
                .await?;
            println!("✅ Profile saved");
        }
        ProfileCommand::Show => match journal.profile() {
            Some(profile) => println!(
                "{} ({}) - {}",
                profile.name,
                profile.age,
                profile.genre_label()
            ),
            None => println!("No profile stored"),
        },
        ProfileCommand::Delete => {
            if journal.delete_profile().await? {
                println!("✅ Profile deleted");
            } else {
                println!("No profile stored");
            }
        }
    }

    Ok(())
}
