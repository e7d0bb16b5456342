mod args;
mod driver;
mod log;

use fit_core::model::{Exercise, ExerciseFilter, ExerciseId, WorkoutConfig};
use services::catalog::DEFAULT_LIST_LIMIT;
use services::{AppServices, Clock};

use crate::args::{Args, ArgsError, Command, FavoritesAction, ThemeAction, WorkoutArgs};

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let parsed = Args::parse(std::env::args().skip(1), std::env::var("FIT_DB_URL").ok())
        .map_err(|e| {
            eprintln!("{e}");
            args::print_usage();
            e
        })?;

    if parsed.command == Command::Help {
        args::print_usage();
        return Ok(());
    }

    // Open + migrate SQLite at startup. Keep this in the binary glue so core/services stay pure.
    prepare_sqlite_file(&parsed.db_url)?;
    let services = AppServices::new_sqlite(&parsed.db_url, Clock::system()).await?;

    match parsed.command {
        Command::Exercises {
            search,
            target,
            body_part,
            limit,
        } => list_exercises(&services, search, target, body_part, limit).await,
        Command::Show(id) => show_exercise(&services, &id).await,
        Command::Favorites(action) => favorites(&services, action).await,
        Command::Theme(action) => theme(&services, action).await,
        Command::History { limit } => history(&services, limit).await,
        Command::Workout(workout) => start_workout(&services, workout).await,
        Command::Help => Ok(()),
    }
}

async fn list_exercises(
    services: &AppServices,
    search: Option<String>,
    target: Option<String>,
    body_part: Option<String>,
    limit: Option<usize>,
) -> Result<(), Box<dyn std::error::Error>> {
    let catalog = services.catalog();
    let limit = limit.unwrap_or(DEFAULT_LIST_LIMIT);
    let exercises: Vec<Exercise> = match (search, body_part) {
        (None, Some(part)) => {
            let mut found = catalog.by_body_part(&part).await;
            found.truncate(limit);
            found
        }
        (Some(query), part) => {
            let found = catalog.search(&query).await;
            let filter = target.or(part).map_or_else(ExerciseFilter::new, |t| {
                ExerciseFilter::new().with_target(t)
            });
            filter
                .apply(&found)
                .into_iter()
                .take(limit)
                .cloned()
                .collect()
        }
        (None, None) => catalog.list(target.as_deref(), limit).await,
    };

    if exercises.is_empty() {
        println!("No exercises found.");
        return Ok(());
    }

    let favorites = services.favorites().list().await?;
    for exercise in &exercises {
        let star = if favorites.iter().any(|f| f.id() == exercise.id()) {
            "*"
        } else {
            " "
        };
        println!(
            "{star} {:<28} {:<24} {:<14} {}",
            exercise.id().as_str(),
            exercise.name(),
            exercise.target(),
            exercise.difficulty().map_or("-", |d| d.as_str())
        );
    }
    Ok(())
}

async fn show_exercise(
    services: &AppServices,
    id: &ExerciseId,
) -> Result<(), Box<dyn std::error::Error>> {
    let exercise = services.catalog().get(id).await?;
    let favorite = services.favorites().is_favorite(id).await?;
    print_exercise(&exercise, favorite);
    Ok(())
}

fn print_exercise(exercise: &Exercise, favorite: bool) {
    println!("{}{}", exercise.name(), if favorite { " (favorite)" } else { "" });
    println!("  id:         {}", exercise.id());
    println!("  target:     {}", exercise.target());
    println!("  body part:  {}", exercise.body_part());
    println!("  equipment:  {}", exercise.equipment());
    if let Some(difficulty) = exercise.difficulty() {
        println!("  difficulty: {}", difficulty.as_str());
    }
    if let Some(rating) = exercise.rating() {
        println!("  rating:     {rating:.1}");
    }
    println!("  image:      {}", exercise.image_url());
    if let Some(description) = exercise.description() {
        println!();
        println!("{description}");
    }
    if let Some(instructions) = exercise.instructions() {
        println!();
        println!("{instructions}");
    }
}

async fn favorites(
    services: &AppServices,
    action: FavoritesAction,
) -> Result<(), Box<dyn std::error::Error>> {
    let favorites = services.favorites();
    match action {
        FavoritesAction::List => {
            let items = favorites.list().await?;
            if items.is_empty() {
                println!("No favorites yet.");
            }
            for exercise in items {
                println!("{:<28} {}", exercise.id().as_str(), exercise.name());
            }
        }
        FavoritesAction::Add(id) => {
            let exercise = services.catalog().get(&id).await?;
            if favorites.add(exercise).await? {
                println!("Added {id} to favorites.");
            } else {
                println!("{id} is already a favorite.");
            }
        }
        FavoritesAction::Remove(id) => {
            if favorites.remove(&id).await? {
                println!("Removed {id} from favorites.");
            } else {
                println!("{id} is not a favorite.");
            }
        }
    }
    Ok(())
}

async fn theme(
    services: &AppServices,
    action: ThemeAction,
) -> Result<(), Box<dyn std::error::Error>> {
    let settings = services.app_settings();
    let updated = match action {
        ThemeAction::Show => settings.load().await?,
        ThemeAction::Dark => settings.set_dark_mode(true).await?,
        ThemeAction::Light => settings.set_dark_mode(false).await?,
        ThemeAction::Toggle => settings.toggle_dark_mode().await?,
    };
    println!("theme: {}", updated.theme().as_str());
    Ok(())
}

async fn history(services: &AppServices, limit: u32) -> Result<(), Box<dyn std::error::Error>> {
    let items = services.workouts().history(limit).await?;
    if items.is_empty() {
        println!("No workouts yet.");
    }
    for item in items {
        println!(
            "#{:<4} {}  {:<28} {:<9} {}/{} sets  {} reps  {}s",
            item.id,
            item.ended_at.format("%Y-%m-%d %H:%M"),
            item.exercise_id.as_str(),
            item.outcome.as_str(),
            item.completed_sets,
            item.total_sets,
            item.total_reps,
            item.duration_secs
        );
    }
    Ok(())
}

async fn start_workout(
    services: &AppServices,
    args: WorkoutArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    let workouts = services.workouts();

    if args.resume {
        match workouts.resume().await? {
            Some(run) if run.exercise().id() == &args.exercise_id => {
                driver::drive(workouts, run, None).await?;
                return Ok(());
            }
            Some(run) => {
                eprintln!(
                    "the saved workout is for {}; run `workout {} --resume` instead",
                    run.exercise().id(),
                    run.exercise().id()
                );
                return Ok(());
            }
            None => println!("No saved workout; starting a new one."),
        }
    }

    let run = workouts.prepare(&args.exercise_id).await?;
    let mut config = WorkoutConfig::default_for(args.exercise_id);
    if let Some(sets) = args.sets {
        config.total_sets = sets;
    }
    if let Some(reps) = args.reps {
        config.reps_per_set = reps;
    }
    if let Some(rest) = args.rest {
        config.rest_seconds = rest;
    }

    driver::drive(workouts, run, Some(config)).await?;
    Ok(())
}

fn prepare_sqlite_file(db_url: &str) -> Result<(), Box<dyn std::error::Error>> {
    if db_url == "sqlite::memory:" {
        return Ok(());
    }

    let path = db_url
        .strip_prefix("sqlite://")
        .ok_or_else(|| ArgsError::InvalidDbUrl {
            raw: db_url.to_string(),
        })?;
    let path = path.split('?').next().unwrap_or(path);
    if path.is_empty() {
        return Err(ArgsError::InvalidDbUrl {
            raw: db_url.to_string(),
        }
        .into());
    }

    let path = std::path::Path::new(path);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    if !path.exists() {
        std::fs::OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(false)
            .open(path)?;
    }

    Ok(())
}

#[tokio::main]
async fn main() {
    log::init_logging();
    if let Err(err) = run().await {
        // At this layer (binary glue), printing once is fine.
        eprintln!("{err}");
        std::process::exit(2);
    }
}
